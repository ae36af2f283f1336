//! # Output Configuration
//!
//! This module controls how `app-sync` prints plans and run summaries,
//! choosing between emoji markers and plain-text tags depending on terminal
//! capabilities and user preferences.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use crate::orchestrator::{PlannedSync, SyncAction, SyncOutcome, SyncReport};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` forces colors on (overriding `NO_COLOR`),
    /// `--color=never` forces them off, and anything else detects support
    /// from the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

fn action_marker(config: &OutputConfig, action: SyncAction) -> &'static str {
    match action {
        SyncAction::Update => emoji(config, "🔄", "[UPDATE]"),
        SyncAction::Clone => emoji(config, "📥", "[CLONE]"),
    }
}

/// One line describing a planned sync, with its checkout target.
pub fn plan_line(config: &OutputConfig, planned: &PlannedSync, target: &str) -> String {
    format!(
        "{} {} -> {} ({})",
        action_marker(config, planned.action),
        planned.name,
        planned.directory.display(),
        target
    )
}

/// One line describing the outcome of a sync.
pub fn outcome_line(config: &OutputConfig, outcome: &SyncOutcome) -> String {
    match &outcome.result {
        Ok(()) => format!(
            "{} {} {}",
            emoji(config, "✅", "[OK]"),
            outcome.action,
            outcome.name
        ),
        Err(e) => format!(
            "{} {} {}: {}",
            emoji(config, "❌", "[FAILED]"),
            outcome.action,
            outcome.name,
            e
        ),
    }
}

/// Final summary of a run.
pub fn summary_line(config: &OutputConfig, report: &SyncReport) -> String {
    let failed = report.failed().count();
    let marker = if failed == 0 {
        emoji(config, "✅", "[OK]")
    } else {
        emoji(config, "❌", "[FAILED]")
    };

    format!(
        "{} {} cloned, {} updated, {} failed",
        marker,
        report.count(SyncAction::Clone),
        report.count(SyncAction::Update),
        failed
    )
}

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::defaults;
use crate::error::{Error, Result};

/// Run git with `args` inside `cwd`, returning its stdout.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
pub fn run(cwd: &Path, args: &[&str]) -> Result<String> {
    run_with(&defaults::git_binary(), cwd, args)
}

/// Same as [`run`] with an explicit git binary.
pub fn run_with(binary: &str, cwd: &Path, args: &[&str]) -> Result<String> {
    let command = args.join(" ");
    debug!("Running {} {} in {}", binary, command, cwd.display());

    let output = Command::new(binary)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::GitSpawn {
            command: command.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::GitCommand {
            command,
            dir: cwd.display().to_string(),
            stderr: with_auth_hint(stderr),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// Provide helpful error message for common auth failures
fn with_auth_hint(stderr: String) -> String {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        format!(
            "{}\n  hint: make sure you have access to the repository \
            (SSH key added to ssh-agent or git credentials configured)",
            stderr
        )
    } else {
        stderr
    }
}

/// `git fetch --all` inside `dir`.
pub fn fetch_all(dir: &Path) -> Result<String> {
    run(dir, &["fetch", "--all"])
}

/// `git reset --hard origin/<target>` inside `dir`.
pub fn reset_hard(dir: &Path, target: &str) -> Result<String> {
    let remote_target = format!("origin/{}", target);
    run(dir, &["reset", "--hard", &remote_target])
}

/// `git pull origin <target>` inside `dir`.
pub fn pull(dir: &Path, target: &str) -> Result<String> {
    run(dir, &["pull", "origin", target])
}

/// `git clone -b <branch> <repository> <dir>`, run from `cwd`.
///
/// `dir` is interpreted relative to `cwd`. Missing parent directories are
/// created first.
pub fn clone_branch(cwd: &Path, repository: &str, branch: &str, dir: &Path) -> Result<String> {
    if let Some(parent) = cwd.join(dir).parent() {
        fs::create_dir_all(parent)?;
    }

    let dir = dir.to_string_lossy();
    run(cwd, &["clone", "-b", branch, repository, &dir])
}

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::log_success;
use crate::utils::child::ToolOutcome;

/// Replace the repository at `root` with a fresh one holding a single commit of the working tree.
///
/// Steps already done are not rolled back when a later one fails.
pub fn reset_history(root: &Path, message: &str) -> ToolOutcome {
  let git_dir = root.join(".git");
  if let Err(err) = fs::remove_dir_all(&git_dir) {
    return ToolOutcome::Fatal(format!("failed to remove {}: {err}", git_dir.display()));
  }
  log_success!("Removed existing git history");

  let steps: [(&[&str], String); 3] = [
    (&["init", "--quiet"], "Initialized new git repository".to_string()),
    (&["add", "."], "Staged all files".to_string()),
    (
      &["commit", "--quiet", "-m", message],
      format!("Created initial commit: '{message}'"),
    ),
  ];
  for (args, done) in steps {
    if let Err(reason) = run_git(args, root) {
      return ToolOutcome::Fatal(reason);
    }
    log_success!("{}", done);
  }
  ToolOutcome::Success
}

fn run_git(args: &[&str], cwd: &Path) -> Result<(), String> {
  log::debug!("running git {}", args.join(" "));
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .output()
    .map_err(|err| format!("failed to run git {}: {err}", args[0]))?;
  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(format!(
      "git {} exited with status {}: {}",
      args[0],
      output.status,
      stderr.trim()
    ));
  }
  Ok(())
}

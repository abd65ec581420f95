use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Result of a step that shells out to an external tool.
///
/// Callers decide per step what a failure means: the dependency sync only
/// ever reports `Recoverable`, the history reset only ever reports `Fatal`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
  Success,
  Recoverable(String),
  Fatal(String),
}

impl ToolOutcome {
  #[must_use]
  pub fn is_success(&self) -> bool {
    matches!(self, Self::Success)
  }
}

/// Spawn `program` in `cwd` with inherited stdio and wait for it.
pub fn run_child_process(program: &str, args: &[String], cwd: &Path) -> Result<ExitStatus> {
  log::debug!("running {program} {} in {}", args.join(" "), cwd.display());
  Command::new(program)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status()
    .with_context(|| format!("failed to run {program}"))
}

/// Locate an external tool before running it, so a missing tool gets its own message.
///
/// Names with a path separator are checked as given; bare names are looked up on PATH.
#[must_use]
pub fn find_tool(program: &str) -> Option<PathBuf> {
  let given = Path::new(program);
  if given.components().count() > 1 {
    return runnable(given).then(|| given.to_path_buf());
  }
  env::split_paths(&env::var_os("PATH")?)
    .map(|dir| dir.join(program))
    .find(|candidate| runnable(candidate))
}

fn runnable(path: &Path) -> bool {
  let Ok(meta) = path.metadata() else {
    return false;
  };
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt as _;
    meta.is_file() && meta.permissions().mode() & 0o111 != 0
  }
  #[cfg(not(unix))]
  {
    meta.is_file()
  }
}

//! Fatal error classes of an initialization run.
//!
//! Recoverable problems (invalid answers, a failed dependency sync, a file
//! that could not be cleaned up) never become an `InitError`; they are
//! reported as warnings and the run continues.

use std::io;

use thiserror::Error;

const GIT_HINT: &str = "Make sure git is installed and you have write permissions.";
const PERMISSION_HINT: &str = "Make sure you have write permissions to the current directory.";

#[derive(Debug, Error)]
pub enum InitError {
  #[error(
    "This doesn't appear to be a {template} repository. Missing required files: {}",
    .missing.join(", ")
  )]
  MissingTemplateFiles {
    template: String,
    missing: Vec<String>,
  },
  #[error("Not a git repository. Please clone the template first.")]
  NotAGitRepository,
  #[error("Initialization cancelled by user.")]
  Interrupted,
  #[error("Input closed before all questions were answered.")]
  InputClosed,
  #[error("Git command failed: {0}")]
  Git(String),
  #[error("invalid configuration in {origin}: {message}")]
  InvalidConfig { origin: String, message: String },
}

/// Follow-up advice printed under a fatal error, if the error class has one.
#[must_use]
pub fn hint(err: &anyhow::Error) -> Option<&'static str> {
  if let Some(InitError::Git(_)) = err.downcast_ref::<InitError>() {
    return Some(GIT_HINT);
  }
  let permission_denied = err.chain().any(|cause| {
    cause
      .downcast_ref::<io::Error>()
      .is_some_and(|io_err| io_err.kind() == io::ErrorKind::PermissionDenied)
  });
  permission_denied.then_some(PERMISSION_HINT)
}

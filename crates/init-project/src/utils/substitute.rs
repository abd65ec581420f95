use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::{Captures, NoExpand, Regex};

/// Capture group whose text is put back after the replacement.
const TAIL: &str = "tail";

/// One find-and-replace step: every match of `pattern` becomes `replacement`, inserted verbatim.
#[derive(Clone, Debug)]
pub struct Replacement {
  pattern: Regex,
  replacement: String,
  keeps_tail: bool,
}

impl Replacement {
  /// # Errors
  /// Returns an error if `pattern` is not a valid regular expression.
  pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
    let pattern =
      Regex::new(pattern).with_context(|| format!("invalid substitution pattern {pattern}"))?;
    let keeps_tail = pattern.capture_names().any(|name| name == Some(TAIL));
    Ok(Self {
      pattern,
      replacement: replacement.into(),
      keeps_tail,
    })
  }

  /// Matches `text` only when it is a whole line.
  ///
  /// # Errors
  /// Only fails if the escaped pattern exceeds the regex size limit.
  pub fn line(text: &str, replacement: impl Into<String>) -> Result<Self> {
    Self::new(&format!("(?m)^{}$", regex::escape(text)), replacement)
  }

  /// Matches `text` only when no name character (`A-Za-z0-9_-`) follows it,
  /// so `python-template` does not match inside `python-template-cli`.
  ///
  /// # Errors
  /// Only fails if the escaped pattern exceeds the regex size limit.
  pub fn token(text: &str, replacement: impl Into<String>) -> Result<Self> {
    Self::new(
      &format!("(?m){}(?P<{TAIL}>[^A-Za-z0-9_-]|$)", regex::escape(text)),
      replacement,
    )
  }
}

/// Apply `replacements` to `content` in order, each over the output of the previous one.
#[must_use]
pub fn apply(content: &str, replacements: &[Replacement]) -> String {
  let mut out = content.to_string();
  for step in replacements {
    let hits = step.pattern.find_iter(&out).count();
    log::debug!("{:?} matched {hits} time(s)", step.pattern.as_str());
    if hits == 0 {
      continue;
    }
    out = if step.keeps_tail {
      step
        .pattern
        .replace_all(&out, |caps: &Captures<'_>| {
          let tail = caps.name(TAIL).map_or("", |m| m.as_str());
          format!("{}{tail}", step.replacement)
        })
        .into_owned()
    } else {
      step
        .pattern
        .replace_all(&out, NoExpand(step.replacement.as_str()))
        .into_owned()
    };
  }
  out
}

/// Rewrite the file at `path` with `replacements` applied to its full text.
///
/// # Errors
/// Returns an error if the file cannot be read as UTF-8 or written back.
pub fn update_file(path: &Path, replacements: &[Replacement]) -> Result<()> {
  let content =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let updated = apply(&content, replacements);
  fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
  Ok(())
}

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead as _, IsTerminal as _, Write as _};

use anyhow::{Context, Result, anyhow};
use inquire::{Confirm, InquireError, Select, Text};
use owo_colors::OwoColorize as _;

use crate::errors::InitError;
use crate::{log_info, log_warn};

/// Menu entry with an optional dimmed explanation.
#[derive(Clone, Debug)]
pub struct Choice {
  pub label: String,
  pub detail: Option<String>,
}

impl Choice {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      detail: None,
    }
  }

  #[must_use]
  pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
    self.detail = Some(detail.into());
    self
  }
}

impl fmt::Display for Choice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.detail {
      Some(detail) => write!(f, "{} {}", self.label.cyan().bold(), detail.dimmed()),
      None => write!(f, "{}", self.label.cyan().bold()),
    }
  }
}

/// Where answers come from.
#[derive(Clone, Debug)]
enum Source {
  /// Attached to a TTY: rich `inquire` prompts.
  Terminal,
  /// Piped stdin: plain prompts, one answer per line.
  Stdin,
  /// Pre-recorded answers, consumed front to back.
  Scripted(VecDeque<String>),
}

/// Prompt primitives shared by the init workflow.
///
/// Every method returns the raw (trimmed) answer; validation and re-prompt
/// loops for free text belong to the caller so they behave the same for
/// every input source.
#[derive(Clone, Debug)]
pub struct Wizard {
  source: Source,
}

impl Default for Wizard {
  fn default() -> Self {
    Self::new()
  }
}

impl Wizard {
  /// Use `inquire` when stdin and stdout are terminals, plain stdin otherwise.
  #[must_use]
  pub fn new() -> Self {
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    let source = if interactive {
      Source::Terminal
    } else {
      Source::Stdin
    };
    Self { source }
  }

  /// Answer prompts from `answers` in order. Running out of answers is treated like closed stdin.
  pub fn scripted<I, S>(answers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      source: Source::Scripted(answers.into_iter().map(Into::into).collect()),
    }
  }

  /// Print informational lines through the shared logger.
  pub fn info_lines(lines: &[String]) {
    for line in lines {
      if line.is_empty() {
        log_info!("");
      } else {
        log_info!("{}", line);
      }
    }
  }

  /// Prompt for a line of text. An empty answer is returned as an empty string.
  pub fn text(&mut self, prompt: &str) -> Result<String> {
    if let Source::Terminal = self.source {
      return Text::new(prompt)
        .prompt()
        .map(|ans| ans.trim().to_string())
        .map_err(prompt_error);
    }
    self.read_answer(prompt)
  }

  /// Let the user pick one of `options` and return its 1-based position.
  ///
  /// Without a terminal only the option numbers are accepted; anything else
  /// is rejected with a warning and asked again.
  pub fn choose(&mut self, prompt: &str, options: &[Choice]) -> Result<usize> {
    if options.is_empty() {
      anyhow::bail!("cannot prompt for selection without any options");
    }
    if let Source::Terminal = self.source {
      return Select::new(prompt, options.to_vec())
        .raw_prompt()
        .map(|choice| choice.index + 1)
        .map_err(prompt_error);
    }

    for (idx, opt) in options.iter().enumerate() {
      match &opt.detail {
        Some(detail) => log_info!("{}. {} {}", idx + 1, opt.label, detail),
        None => log_info!("{}. {}", idx + 1, opt.label),
      }
    }
    let numbers: Vec<String> = (1..=options.len()).map(|n| n.to_string()).collect();
    let question = format!("{prompt} ({})", numbers.join(" or "));
    loop {
      let answer = self.read_answer(&question)?;
      if let Some(pos) = numbers.iter().position(|n| *n == answer) {
        return Ok(pos + 1);
      }
      log_warn!("Please enter {}.", numbers.join(" or "));
    }
  }

  /// Ask a yes/no question that defaults to "no".
  ///
  /// Accepts `y`/`yes` and `n`/`no` in any case; an empty answer means no.
  pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
    if let Source::Terminal = self.source {
      return Confirm::new(prompt)
        .with_default(false)
        .prompt()
        .map_err(prompt_error);
    }
    let question = format!("{prompt} (y/N)");
    loop {
      let answer = self.read_answer(&question)?.to_lowercase();
      match answer.as_str() {
        "y" | "yes" => return Ok(true),
        "n" | "no" | "" => return Ok(false),
        _ => log_warn!("Please enter 'y' for yes or 'n' for no."),
      }
    }
  }

  fn read_answer(&mut self, prompt: &str) -> Result<String> {
    log_info!("{}", prompt);
    match &mut self.source {
      Source::Scripted(answers) => {
        let answer = answers.pop_front().ok_or(InitError::InputClosed)?;
        Ok(answer.trim().to_string())
      }
      _ => {
        anstream::print!("{}", "-> ".bright_cyan());
        io::stdout().flush().ok();
        let line = read_line()?.ok_or(InitError::InputClosed)?;
        Ok(line.trim().to_string())
      }
    }
  }
}

/// Read one line from stdin; `None` once stdin is closed.
fn read_line() -> Result<Option<String>> {
  let mut line = String::new();
  let read = io::stdin()
    .lock()
    .read_line(&mut line)
    .context("failed to read from stdin")?;
  if read == 0 {
    return Ok(None);
  }
  Ok(Some(line))
}

fn prompt_error(err: InquireError) -> anyhow::Error {
  match err {
    InquireError::OperationInterrupted | InquireError::OperationCanceled => {
      InitError::Interrupted.into()
    }
    other => anyhow!(other),
  }
}

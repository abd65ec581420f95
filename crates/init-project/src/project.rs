use std::sync::OnceLock;

use regex::Regex;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static VERSION_RE: OnceLock<Regex> = OnceLock::new();

/// Everything the user decided for the new project.
///
/// Built once from the prompts and never changed after the summary was
/// confirmed; the apply phase only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectConfig {
  pub name: String,
  pub description: String,
  /// Free-form `Name` or `Name <email>`, empty when skipped.
  pub author: String,
  pub commit_msg: String,
  pub keep_mkdocs: bool,
  pub cleanup_template: bool,
  pub install_dependencies: bool,
  pub python_version: String,
}

impl ProjectConfig {
  /// Human readable title, e.g. `my-app` -> `My App`.
  #[must_use]
  pub fn title(&self) -> String {
    title_case(&self.name.replace('-', " "))
  }

  /// Compact interpreter tag used by linters, e.g. `py313`.
  #[must_use]
  pub fn python_tag(&self) -> String {
    python_version_tag(&self.python_version).unwrap_or_else(|| {
      format!("py{}", self.python_version.replace('.', ""))
    })
  }

  /// The author split into name and optional email, `None` when skipped.
  #[must_use]
  pub fn author(&self) -> Option<Author> {
    Author::parse(&self.author)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
  pub name: String,
  pub email: Option<String>,
}

impl Author {
  #[must_use]
  pub fn parse(raw: &str) -> Option<Self> {
    let raw = raw.trim();
    if raw.is_empty() {
      return None;
    }
    match raw.split_once('<') {
      Some((name, rest)) => {
        let email = rest.split('>').next().unwrap_or_default().trim();
        Some(Self {
          name: name.trim().to_string(),
          email: (!email.is_empty()).then(|| email.to_string()),
        })
      }
      None => Some(Self {
        name: raw.to_string(),
        email: None,
      }),
    }
  }
}

/// Returns true for non-empty names made of ASCII letters, digits, `-` and `_`.
#[must_use]
pub fn validate_project_name(name: &str) -> bool {
  let re = NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid name regex"));
  re.is_match(name)
}

/// Checks the email part of a `Name <email>` author.
///
/// Anything without both angle brackets is accepted as a plain name. With
/// brackets, the enclosed text needs exactly one `@` and a `.` in the domain.
#[must_use]
pub fn validate_author_email(author: &str) -> bool {
  if !author.contains('<') || !author.contains('>') {
    return true;
  }
  let enclosed = author
    .split('<')
    .nth(1)
    .and_then(|rest| rest.split('>').next())
    .unwrap_or_default()
    .trim();
  match enclosed.split_once('@') {
    Some((_, domain)) => !domain.contains('@') && domain.contains('.'),
    None => false,
  }
}

/// Maps a dotted `major.minor` version to its compact tag: `3.13` -> `py313`.
#[must_use]
pub fn python_version_tag(version: &str) -> Option<String> {
  let re = VERSION_RE.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)$").expect("valid version regex"));
  let caps = re.captures(version.trim())?;
  Some(format!("py{}{}", &caps[1], &caps[2]))
}

/// Capitalizes the first letter of every run of letters and lowercases the rest.
#[must_use]
pub fn title_case(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut in_word = false;
  for ch in input.chars() {
    if ch.is_alphabetic() {
      if in_word {
        out.extend(ch.to_lowercase());
      } else {
        out.extend(ch.to_uppercase());
      }
      in_word = true;
    } else {
      out.push(ch);
      in_word = false;
    }
  }
  out
}

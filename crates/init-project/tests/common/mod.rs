#![allow(dead_code)]

pub mod test_env;

/// Stdin for a full run: one answer per line, in prompt order.
#[derive(Clone, Debug)]
pub struct Answers {
  pub name: String,
  pub description: String,
  pub author: String,
  pub commit_msg: String,
  pub docs: &'static str,
  pub cleanup: &'static str,
  pub install: &'static str,
  pub confirm: &'static str,
}

impl Default for Answers {
  fn default() -> Self {
    Self {
      name: "my-app".to_string(),
      description: "desc".to_string(),
      author: String::new(),
      commit_msg: String::new(),
      docs: "2",
      cleanup: "1",
      install: "2",
      confirm: "y",
    }
  }
}

impl Answers {
  pub fn stdin(&self) -> String {
    [
      self.name.as_str(),
      self.description.as_str(),
      self.author.as_str(),
      self.commit_msg.as_str(),
      self.docs,
      self.cleanup,
      self.install,
      self.confirm,
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
  }
}

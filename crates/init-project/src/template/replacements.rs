//! Fixed substitution sets, one per template file.

use anyhow::Result;

use crate::config::Placeholders;
use crate::project::ProjectConfig;
use crate::utils::substitute::Replacement;

pub const PYPROJECT: &str = "pyproject.toml";
pub const MAKEFILE: &str = "Makefile";
pub const CLI_MODULE: &str = "src/cli/main.py";
pub const MKDOCS: &str = "mkdocs.yml";
pub const README: &str = "README.md";

const DOCS_SUFFIX: &str = " with best practices";

/// Escape a value for a double-quoted TOML or Python string literal.
fn quoted(value: &str) -> String {
  value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a YAML scalar, double-quoting values a plain scalar would misparse.
fn yaml_scalar(value: &str) -> String {
  let needs_quotes = value.contains(": ")
    || value.contains(" #")
    || value.ends_with(':')
    || value.starts_with(|c: char| "-?:,[]{}#&*!|>'\"%@`".contains(c) || c.is_whitespace());
  if needs_quotes {
    format!("\"{}\"", quoted(value))
  } else {
    value.to_string()
  }
}

fn authors_line(name: &str, email: Option<&str>) -> String {
  match email {
    Some(email) => format!(r#"authors = [{{ name = "{name}", email = "{email}" }}]"#),
    None => format!(r#"authors = [{{ name = "{name}" }}]"#),
  }
}

/// Build manifest: package metadata, console script and Python version pins.
pub fn pyproject(t: &Placeholders, p: &ProjectConfig) -> Result<Vec<Replacement>> {
  let mut steps = vec![
    Replacement::line(
      &format!(r#"name = "{}""#, t.name),
      format!(r#"name = "{}""#, p.name),
    )?,
    Replacement::line(
      &format!(r#"description = "{}""#, t.description),
      format!(r#"description = "{}""#, quoted(&p.description)),
    )?,
  ];
  if let Some(author) = p.author() {
    let email = author.email.as_deref().map(quoted);
    steps.push(Replacement::line(
      &authors_line(&t.author_name, Some(&t.author_email)),
      authors_line(&quoted(&author.name), email.as_deref()),
    )?);
  }
  steps.extend([
    Replacement::line(
      &format!(r#"{} = "src.cli.main:main""#, t.name),
      format!(r#"{} = "src.cli.main:main""#, p.name),
    )?,
    Replacement::new(
      r#"requires-python = ">=\d+\.\d+""#,
      format!(r#"requires-python = ">={}""#, p.python_version),
    )?,
    Replacement::new(
      r#"target-version = "py\d+""#,
      format!(r#"target-version = "{}""#, p.python_tag()),
    )?,
    Replacement::new(
      r#"python_version = "\d+\.\d+""#,
      format!(r#"python_version = "{}""#, p.python_version),
    )?,
  ]);
  Ok(steps)
}

/// Task runner variables. Anchored to whole lines so a second run cannot grow the name.
pub fn makefile(t: &Placeholders, p: &ProjectConfig) -> Result<Vec<Replacement>> {
  let name = regex::escape(&t.name);
  Ok(vec![
    Replacement::new(
      &format!(r"(?m)^PACKAGE_NAME \?= {name}$"),
      format!("PACKAGE_NAME ?= {}", p.name),
    )?,
    Replacement::new(
      &format!(r"(?m)^SCRIPT_NAME \?= {name}$"),
      format!("SCRIPT_NAME ?= {}", p.name),
    )?,
    Replacement::new(
      r"(?m)^PYTHON_VERSION \?= \d+\.\d+$",
      format!("PYTHON_VERSION ?= {}", p.python_version),
    )?,
  ])
}

/// Constants of the sample CLI.
pub fn cli_module(t: &Placeholders, p: &ProjectConfig) -> Result<Vec<Replacement>> {
  Ok(vec![
    Replacement::line(
      &format!(r#"PROJECT_NAME = "{}""#, t.name),
      format!(r#"PROJECT_NAME = "{}""#, p.name),
    )?,
    Replacement::line(
      &format!(r#"PROJECT_DESCRIPTION = "{}""#, quoted(&t.description)),
      format!(r#"PROJECT_DESCRIPTION = "{}""#, quoted(&p.description)),
    )?,
  ])
}

/// Documentation site metadata.
pub fn mkdocs(t: &Placeholders, p: &ProjectConfig) -> Result<Vec<Replacement>> {
  let mut steps = vec![
    Replacement::line(
      &format!("site_name: {}", t.title),
      format!("site_name: {}", yaml_scalar(&p.title())),
    )?,
    Replacement::line(
      &format!("site_description: {}{DOCS_SUFFIX}", t.description),
      format!(
        "site_description: {}",
        yaml_scalar(&format!("{}{DOCS_SUFFIX}", p.description))
      ),
    )?,
    Replacement::line(
      &format!("site_url: https://your-username.github.io/{}", t.name),
      format!("site_url: https://your-username.github.io/{}", p.name),
    )?,
    Replacement::line(
      &format!("repo_name: your-username/{}", t.name),
      format!("repo_name: your-username/{}", p.name),
    )?,
    Replacement::line(
      &format!("repo_url: https://github.com/your-username/{}", t.name),
      format!("repo_url: https://github.com/your-username/{}", p.name),
    )?,
  ];
  if let Some(author) = p.author() {
    steps.push(Replacement::line(
      &format!("site_author: {}", t.author_name),
      format!("site_author: {}", yaml_scalar(&author.name)),
    )?);
  }
  Ok(steps)
}

/// In-place README edits used when the template README is kept.
///
/// The run command may carry arguments or sit inside an indented block, so it
/// is matched as a token rather than a whole line.
pub fn readme(t: &Placeholders, p: &ProjectConfig) -> Result<Vec<Replacement>> {
  Ok(vec![
    Replacement::line(&format!("# {}", t.title), format!("# {}", p.title()))?,
    Replacement::token(&format!("uv run {}", t.name), format!("uv run {}", p.name))?,
    Replacement::new(
      r"make run\s+# Default package name",
      format!("make run  # Run {}", p.name),
    )?,
  ])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::load_config;
  use crate::utils::substitute::apply;
  use pretty_assertions::assert_eq;

  const PYPROJECT_TOML: &str = r#"[project]
name = "python-template"
version = "0.0.0"
description = "A modern Python project template"
authors = [{ name = "Your Name", email = "your.email@example.com" }]
requires-python = ">=3.12"

[project.scripts]
python-template = "src.cli.main:main"

[tool.ruff]
target-version = "py312"

[tool.mypy]
python_version = "3.12"
"#;

  fn placeholders() -> Placeholders {
    let dir = tempfile::TempDir::new().unwrap();
    load_config(dir.path()).unwrap().template
  }

  fn project(author: &str) -> ProjectConfig {
    ProjectConfig {
      name: "my-app".to_string(),
      description: "desc".to_string(),
      author: author.to_string(),
      commit_msg: "init".to_string(),
      keep_mkdocs: true,
      cleanup_template: false,
      install_dependencies: false,
      python_version: "3.13".to_string(),
    }
  }

  #[test]
  fn pyproject_gets_project_metadata_and_python_pins() -> Result<()> {
    let out = apply(
      PYPROJECT_TOML,
      &pyproject(&placeholders(), &project("Jane Doe <jane@example.com>"))?,
    );
    assert_eq!(
      out,
      r#"[project]
name = "my-app"
version = "0.0.0"
description = "desc"
authors = [{ name = "Jane Doe", email = "jane@example.com" }]
requires-python = ">=3.13"

[project.scripts]
my-app = "src.cli.main:main"

[tool.ruff]
target-version = "py313"

[tool.mypy]
python_version = "3.13"
"#
    );
    Ok(())
  }

  #[test]
  fn pyproject_keeps_placeholder_author_when_skipped() -> Result<()> {
    let out = apply(PYPROJECT_TOML, &pyproject(&placeholders(), &project(""))?);
    assert!(out.contains(r#"authors = [{ name = "Your Name", email = "your.email@example.com" }]"#));
    Ok(())
  }

  #[test]
  fn pyproject_author_without_email_drops_email_key() -> Result<()> {
    let out = apply(PYPROJECT_TOML, &pyproject(&placeholders(), &project("Jane"))?);
    assert!(out.contains(r#"authors = [{ name = "Jane" }]"#), "{out}");
    Ok(())
  }

  #[test]
  fn pyproject_escapes_quotes_in_description() -> Result<()> {
    let mut cfg = project("");
    cfg.description = r#"A "quoted" tool"#.to_string();
    let out = apply(PYPROJECT_TOML, &pyproject(&placeholders(), &cfg)?);
    assert!(out.contains(r#"description = "A \"quoted\" tool""#), "{out}");
    Ok(())
  }

  #[test]
  fn pyproject_second_pass_changes_nothing() -> Result<()> {
    let steps = pyproject(&placeholders(), &project("Jane <jane@example.com>"))?;
    let once = apply(PYPROJECT_TOML, &steps);
    assert_eq!(apply(&once, &steps), once);
    Ok(())
  }

  #[test]
  fn names_extending_the_template_name_are_stable_on_rerun() -> Result<()> {
    let mkdocs_yml = "site_name: Python Project Template\nsite_description: A modern Python project template with best practices\nsite_author: Your Name\nsite_url: https://your-username.github.io/python-template\nrepo_name: your-username/python-template\nrepo_url: https://github.com/your-username/python-template\n";
    let readme_md = "# Python Project Template\n\n    uv run python-template\n    uv run python-template --help\n";
    let cli_py = "PROJECT_NAME = \"python-template\"\nPROJECT_DESCRIPTION = \"A modern Python project template\"\n";
    let placeholders = placeholders();

    for name in ["python-template-cli", "my-python-template", "python-template_2"] {
      let mut cfg = project("Your Name Jr <jr@example.com>");
      cfg.name = name.to_string();
      cfg.description = "A modern Python project template for data".to_string();
      let sets = [
        (PYPROJECT_TOML, pyproject(&placeholders, &cfg)?),
        (mkdocs_yml, mkdocs(&placeholders, &cfg)?),
        (readme_md, readme(&placeholders, &cfg)?),
        (cli_py, cli_module(&placeholders, &cfg)?),
      ];
      for (input, steps) in sets {
        let once = apply(input, &steps);
        assert!(once.contains(name), "{name} missing from {once}");
        assert_eq!(apply(&once, &steps), once, "second pass changed output for {name}");
      }
    }
    Ok(())
  }

  #[test]
  fn readme_run_command_keeps_arguments() -> Result<()> {
    let mut cfg = project("");
    cfg.name = "python-template-cli".to_string();
    let out = apply(
      "uv run python-template --help\n",
      &readme(&placeholders(), &cfg)?,
    );
    assert_eq!(out, "uv run python-template-cli --help\n");
    Ok(())
  }

  #[test]
  fn makefile_is_anchored_to_whole_lines() -> Result<()> {
    let input = "PACKAGE_NAME ?= python-template\nSCRIPT_NAME ?= python-template\nPYTHON_VERSION ?= 3.12\n";
    let mut cfg = project("");
    cfg.name = "python-template-x".to_string();
    let steps = makefile(&placeholders(), &cfg)?;
    let once = apply(input, &steps);
    assert_eq!(
      once,
      "PACKAGE_NAME ?= python-template-x\nSCRIPT_NAME ?= python-template-x\nPYTHON_VERSION ?= 3.13\n"
    );
    assert_eq!(apply(&once, &steps), once);
    Ok(())
  }

  #[test]
  fn cli_module_constants_are_replaced() -> Result<()> {
    let input = "PROJECT_NAME = \"python-template\"\nPROJECT_DESCRIPTION = \"A modern Python project template\"\n";
    let out = apply(input, &cli_module(&placeholders(), &project(""))?);
    assert_eq!(out, "PROJECT_NAME = \"my-app\"\nPROJECT_DESCRIPTION = \"desc\"\n");
    Ok(())
  }

  #[test]
  fn mkdocs_uses_title_and_author_name() -> Result<()> {
    let input = "site_name: Python Project Template\nsite_description: A modern Python project template with best practices\nsite_author: Your Name\nsite_url: https://your-username.github.io/python-template\nrepo_name: your-username/python-template\nrepo_url: https://github.com/your-username/python-template\n";
    let out = apply(
      input,
      &mkdocs(&placeholders(), &project("Jane Doe <jane@example.com>"))?,
    );
    assert_eq!(
      out,
      "site_name: My App\nsite_description: desc with best practices\nsite_author: Jane Doe\nsite_url: https://your-username.github.io/my-app\nrepo_name: your-username/my-app\nrepo_url: https://github.com/your-username/my-app\n"
    );
    Ok(())
  }

  #[test]
  fn yaml_values_with_colons_are_quoted() {
    assert_eq!(yaml_scalar("plain text"), "plain text");
    assert_eq!(yaml_scalar("a: b"), "\"a: b\"");
    assert_eq!(yaml_scalar("#tag"), "\"#tag\"");
  }

  #[test]
  fn readme_title_and_run_command() -> Result<()> {
    let input = "# Python Project Template\n\n    uv run python-template\n    make run    # Default package name\n";
    let out = apply(input, &readme(&placeholders(), &project(""))?);
    assert_eq!(out, "# My App\n\n    uv run my-app\n    make run  # Run my-app\n");
    Ok(())
  }
}

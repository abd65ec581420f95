use owo_colors::OwoColorize as _;

use crate::project::ProjectConfig;

fn highlight_cmd(cmd: &str) -> String {
  format!("{}", cmd.bright_cyan().bold())
}

fn yes_no(value: bool) -> &'static str {
  if value { "Yes" } else { "No" }
}

pub fn banner_lines() -> Vec<String> {
  let rule = "=".repeat(60);
  vec![
    rule.clone(),
    "Python Template Project Initializer"
      .bright_cyan()
      .bold()
      .to_string(),
    rule,
    String::new(),
  ]
}

pub fn intro_lines() -> Vec<String> {
  vec![
    "Let's customize your new project!".to_string(),
    String::new(),
  ]
}

pub fn summary_lines(project: &ProjectConfig) -> Vec<String> {
  let rule = "=".repeat(40);
  let author = if project.author.is_empty() {
    "Not specified"
  } else {
    project.author.as_str()
  };
  vec![
    String::new(),
    "Summary of changes:".bold().to_string(),
    rule.clone(),
    format!("Project name: {}", project.name),
    format!("Description: {}", project.description),
    format!("Author: {author}"),
    format!("Commit message: {}", project.commit_msg),
    format!("Python version: {}", project.python_version),
    format!("Keep MkDocs: {}", yes_no(project.keep_mkdocs)),
    format!("Cleanup template files: {}", yes_no(project.cleanup_template)),
    format!("Install dependencies: {}", yes_no(project.install_dependencies)),
    rule,
    String::new(),
  ]
}

/// README written from scratch when the template README is cleaned up.
pub fn readme(project: &ProjectConfig, sync_cmd: &str) -> String {
  let mut out = format!(
    "# {title}

{description}

## Getting started

```bash
{sync_cmd}
uv run pre-commit install
uv run {name}
```

## Development

```bash
make test   # Run the test suite
make lint   # Run linters and type checks
make run    # Run {name}
```
",
    title = project.title(),
    description = project.description,
    name = project.name,
  );
  if project.keep_mkdocs {
    out.push_str(
      "
## Documentation

```bash
make docs   # Build and serve the documentation
```
",
    );
  }
  out
}

/// Numbered follow-up actions; steps for skipped work are only listed when they still apply.
pub fn next_steps(
  project: &ProjectConfig,
  dependencies_installed: bool,
  sync_cmd: &str,
) -> Vec<String> {
  let mut steps: Vec<(&str, Vec<String>)> = Vec::new();
  if !dependencies_installed {
    steps.push(("Install dependencies:", vec![sync_cmd.to_string()]));
  }
  steps.push((
    "Set up pre-commit hooks:",
    vec!["uv run pre-commit install".to_string()],
  ));
  steps.push((
    "Run tests:",
    vec!["uv run pytest".to_string(), "# or use: make test".to_string()],
  ));
  steps.push((
    "Run your application:",
    vec![
      format!("uv run {}", project.name),
      "# or use: make run".to_string(),
    ],
  ));
  if project.keep_mkdocs {
    steps.push(("Build documentation:", vec!["make docs".to_string()]));
  }
  steps.push((
    "Add remote repository (optional):",
    vec![
      "git remote add origin <your-repo-url>".to_string(),
      "git push -u origin main".to_string(),
    ],
  ));

  let mut lines = vec![
    String::new(),
    "Project initialization complete!"
      .bright_green()
      .bold()
      .to_string(),
    "=".repeat(60),
    String::new(),
    "Next steps:".bold().to_string(),
    String::new(),
  ];
  for (idx, (title, commands)) in steps.into_iter().enumerate() {
    lines.push(format!("{}. {title}", idx + 1));
    for cmd in commands {
      if cmd.starts_with('#') {
        lines.push(format!("   {}", cmd.dimmed()));
      } else {
        lines.push(format!("   {}", highlight_cmd(&cmd)));
      }
    }
    lines.push(String::new());
  }
  lines.push("Happy coding!".bright_green().bold().to_string());
  lines
}

use std::path::Path;

use anyhow::Result;

use crate::config::{AppContext, TemplateConfig, ToolsConfig};
use crate::errors::InitError;
use crate::project::{ProjectConfig, validate_author_email, validate_project_name};
use crate::template::Customizer;
use crate::texts;
use crate::utils::child::{ToolOutcome, find_tool, run_child_process};
use crate::utils::git;
use crate::utils::log::t;
use crate::utils::wizard::{Choice, Wizard};
use crate::{log_error, log_info, log_success, log_warn};

/// How a run ended when it did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
  /// Template customized and committed as a fresh repository.
  Committed,
  /// The user declined the summary; nothing was changed.
  Aborted,
}

pub fn run(root: &Path, wizard: &mut Wizard) -> Result<Outcome> {
  Wizard::info_lines(&texts::init::banner_lines());
  let ctx = AppContext::load(root)?;
  validate_template(&ctx)?;

  Wizard::info_lines(&texts::init::intro_lines());
  let project = collect(&ctx.template, wizard)?;

  Wizard::info_lines(&texts::init::summary_lines(&project));
  if !wizard.confirm("Proceed with initialization?")? {
    log_warn!("Initialization cancelled.");
    return Ok(Outcome::Aborted);
  }

  apply(&ctx, &project)?;
  Ok(Outcome::Committed)
}

/// Refuse to run anywhere but in an untouched template checkout.
fn validate_template(ctx: &AppContext) -> Result<()> {
  let missing: Vec<String> = ctx
    .template
    .paths
    .required
    .iter()
    .filter(|rel| !ctx.root.join(rel).exists())
    .cloned()
    .collect();
  if !missing.is_empty() {
    return Err(
      InitError::MissingTemplateFiles {
        template: ctx.template.template.name.clone(),
        missing,
      }
      .into(),
    );
  }
  // A gitfile (worktree or submodule) cannot be replaced by a fresh repository.
  if !ctx.root.join(".git").is_dir() {
    return Err(InitError::NotAGitRepository.into());
  }
  Ok(())
}

fn collect(template: &TemplateConfig, wizard: &mut Wizard) -> Result<ProjectConfig> {
  let defaults = &template.defaults;

  let name = loop {
    let answer = wizard.text("Enter your project name (e.g., 'my-awesome-project'):")?;
    if answer.is_empty() {
      log_warn!("Project name cannot be empty. Please try again.");
    } else if !validate_project_name(&answer) {
      log_warn!("Project name can only contain letters, numbers, hyphens, and underscores.");
    } else {
      break answer;
    }
  };

  let description = or_default(
    wizard.text(&format!(
      "Enter project description (default: '{}'):",
      defaults.description
    ))?,
    &defaults.description,
  );

  log_info!("");
  let author = loop {
    let answer = wizard.text("Enter your name and email (optional, press Enter to skip):")?;
    if validate_author_email(&answer) {
      break answer;
    }
    log_warn!("Invalid email format. Please use 'Name <email@domain.com>' or press Enter to skip.");
  };

  let commit_msg = or_default(
    wizard.text(&format!(
      "Enter initial commit message (default: '{}'):",
      defaults.commit_msg
    ))?,
    &defaults.commit_msg,
  );

  log_info!("");
  let keep_mkdocs = wizard.choose(
    "Documentation options:",
    &[
      Choice::new("Keep MkDocs").with_detail("(recommended for most projects)"),
      Choice::new("Remove MkDocs").with_detail("(if you prefer other documentation tools)"),
    ],
  )? == 1;

  log_info!("");
  let cleanup_template = wizard.choose(
    "Template cleanup options:",
    &[
      Choice::new("Remove template-specific files").with_detail("(recommended)"),
      Choice::new("Keep all files"),
    ],
  )? == 1;

  log_info!("");
  let sync_cmd = template.tools.sync_display();
  let install_dependencies = wizard.choose(
    "Dependency installation:",
    &[
      Choice::new(format!("Run '{sync_cmd}' now")).with_detail("(recommended)"),
      Choice::new("Skip dependency installation"),
    ],
  )? == 1;

  Ok(ProjectConfig {
    name,
    description,
    author,
    commit_msg,
    keep_mkdocs,
    cleanup_template,
    install_dependencies,
    python_version: defaults.python_version.clone(),
  })
}

fn or_default(answer: String, default: &str) -> String {
  if answer.is_empty() {
    default.to_string()
  } else {
    answer
  }
}

fn apply(ctx: &AppContext, project: &ProjectConfig) -> Result<()> {
  log_info!("");
  log_info!("Initializing project in {}...", t::path(ctx.root.display()));
  log_info!("");

  Customizer::new(&ctx.root, &ctx.template, project).apply()?;

  let dependencies_installed = if project.install_dependencies {
    install_dependencies(&ctx.root, &ctx.template.tools).is_success()
  } else {
    false
  };

  log_info!("");
  log_info!("Creating clean git history...");
  match git::reset_history(&ctx.root, &project.commit_msg) {
    ToolOutcome::Success => {}
    ToolOutcome::Recoverable(reason) | ToolOutcome::Fatal(reason) => {
      return Err(InitError::Git(reason).into());
    }
  }

  let sync_cmd = ctx.template.tools.sync_display();
  Wizard::info_lines(&texts::init::next_steps(
    project,
    dependencies_installed,
    &sync_cmd,
  ));
  Ok(())
}

/// Run the dependency sync. Never fatal: every failure comes back as `Recoverable`.
fn install_dependencies(root: &Path, tools: &ToolsConfig) -> ToolOutcome {
  log_info!("");
  log_info!("Installing dependencies...");

  let Some((program, args)) = tools.sync.split_first() else {
    log_warn!("No dependency sync command configured, skipping.");
    return ToolOutcome::Recoverable("no dependency sync command configured".to_string());
  };
  let sync_cmd = tools.sync_display();

  if find_tool(program).is_none() {
    log_error!("{} not found. Please install it first.", program);
    log_info!("Visit: {}", t::path(&tools.install_url));
    return ToolOutcome::Recoverable(format!("{program} not found"));
  }

  let reason = match run_child_process(program, args, root) {
    Ok(status) if status.success() => {
      log_success!("Dependencies installed successfully");
      return ToolOutcome::Success;
    }
    Ok(status) => format!("{sync_cmd} exited with {status}"),
    Err(err) => format!("{err:#}"),
  };
  log_error!("Failed to install dependencies: {}", reason);
  log_info!("You can run '{}' manually later.", sync_cmd);
  ToolOutcome::Recoverable(reason)
}

//! Applies a confirmed [`ProjectConfig`] to the template checkout.

mod replacements;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::TemplateConfig;
use crate::project::ProjectConfig;
use crate::texts;
use crate::utils::files::{Removed, remove_path};
use crate::utils::log::t;
use crate::utils::substitute::{Replacement, update_file};
use crate::{log_success, log_warn};

pub struct Customizer<'a> {
  root: &'a Path,
  template: &'a TemplateConfig,
  project: &'a ProjectConfig,
}

impl<'a> Customizer<'a> {
  pub fn new(root: &'a Path, template: &'a TemplateConfig, project: &'a ProjectConfig) -> Self {
    Self {
      root,
      template,
      project,
    }
  }

  /// Rewrite, create and delete template files for the project.
  ///
  /// Any failure on a core file aborts; failures while removing docs or
  /// template-only files are warnings.
  pub fn apply(&self) -> Result<()> {
    let placeholders = &self.template.template;
    let project = self.project;

    self.update(
      replacements::PYPROJECT,
      &replacements::pyproject(placeholders, project)?,
    )?;
    self.update(
      replacements::MAKEFILE,
      &replacements::makefile(placeholders, project)?,
    )?;
    self.update(
      replacements::CLI_MODULE,
      &replacements::cli_module(placeholders, project)?,
    )?;
    self.write_version_marker()?;

    if project.keep_mkdocs {
      self.update_optional(
        replacements::MKDOCS,
        &replacements::mkdocs(placeholders, project)?,
      )?;
    } else {
      self.remove_all(&self.template.paths.docs);
    }

    if project.cleanup_template {
      self.regenerate_readme()?;
      self.remove_all(&self.template.paths.cleanup);
    } else {
      self.update_optional(
        replacements::README,
        &replacements::readme(placeholders, project)?,
      )?;
    }
    Ok(())
  }

  fn update(&self, rel: &str, steps: &[Replacement]) -> Result<()> {
    update_file(&self.root.join(rel), steps)?;
    log_success!("Updated {}", rel);
    Ok(())
  }

  fn update_optional(&self, rel: &str, steps: &[Replacement]) -> Result<()> {
    if !self.root.join(rel).is_file() {
      log_warn!("Skipped {} (not found)", rel);
      return Ok(());
    }
    self.update(rel, steps)
  }

  fn write_version_marker(&self) -> Result<()> {
    let rel = &self.template.paths.version_marker;
    let path = self.root.join(rel);
    fs::write(&path, format!("{}\n", self.project.python_version))
      .with_context(|| format!("failed to write {}", path.display()))?;
    log_success!("Updated {}", rel);
    Ok(())
  }

  fn regenerate_readme(&self) -> Result<()> {
    let path = self.root.join(replacements::README);
    let body = texts::init::readme(self.project, &self.template.tools.sync_display());
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    log_success!("Regenerated {}", replacements::README);
    Ok(())
  }

  fn remove_all(&self, paths: &[String]) {
    for rel in paths {
      let rel = rel.trim_end_matches('/');
      match remove_path(&self.root.join(rel)) {
        Ok(Removed::File) => log_success!("Removed file: {}", rel),
        Ok(Removed::Dir) => log_success!("Removed directory: {}", rel),
        Ok(Removed::Missing) => log::debug!("{rel} not present, nothing to remove"),
        Err(err) => log_warn!("Could not remove {}: {}", t::path(rel), err),
      }
    }
  }
}

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use toml::Value as TomlValue;

use crate::errors::InitError;
use crate::log_warn;
use crate::project::python_version_tag;

/// Project-local override file, merged over the embedded defaults.
pub const OVERRIDE_FILE: &str = "init-project.toml";

/// Known keys per section, used to flag typos in the override file.
const KNOWN_KEYS: &[(&str, &[&str])] = &[
  (
    "template",
    &["name", "title", "description", "author_name", "author_email"],
  ),
  ("defaults", &["description", "commit_msg", "python_version"]),
  ("paths", &["required", "cleanup", "docs", "version_marker"]),
  ("tools", &["sync", "install_url"]),
];

// Embed the template contract
const DEFAULT_TOML: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/template.toml"));

/// Placeholder strings baked into the template files.
#[derive(Debug, Clone, Deserialize)]
pub struct Placeholders {
  pub name: String,
  pub title: String,
  pub description: String,
  pub author_name: String,
  pub author_email: String,
}

/// Fallbacks for prompts left empty, plus the unprompted Python version.
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
  pub description: String,
  pub commit_msg: String,
  pub python_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
  pub required: Vec<String>,
  pub cleanup: Vec<String>,
  pub docs: Vec<String>,
  pub version_marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
  /// Dependency sync argv; empty disables the step.
  #[serde(default)]
  pub sync: Vec<String>,
  pub install_url: String,
}

impl ToolsConfig {
  #[must_use]
  pub fn sync_display(&self) -> String {
    self.sync.join(" ")
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
  pub template: Placeholders,
  pub defaults: Defaults,
  pub paths: PathsConfig,
  pub tools: ToolsConfig,
}

/// Working directory plus the template contract that applies to it.
#[derive(Debug, Clone)]
pub struct AppContext {
  pub root: PathBuf,
  pub template: TemplateConfig,
}

impl AppContext {
  /// # Errors
  /// Fails when the configuration cannot be loaded, see [`load_config`].
  pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
    let root = root.into();
    let template = load_config(&root)?;
    Ok(Self { root, template })
  }
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Arrays and scalars: replace last-wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys in the override file so typos do not go unnoticed.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };
  let sections: Vec<&str> = KNOWN_KEYS.iter().map(|(name, _)| *name).collect();

  for (key, value) in table {
    let Some((_, known)) = KNOWN_KEYS.iter().find(|(name, _)| name == key) else {
      log_warn!(
        "warning: unknown config key '{}' in {} (did you mean one of: {}?)",
        key,
        file_path.display(),
        sections.join(", ")
      );
      continue;
    };
    let TomlValue::Table(section) = value else {
      continue;
    };
    for inner in section.keys() {
      if !known.contains(&inner.as_str()) {
        log_warn!(
          "warning: unknown config key '{}.{}' in {} (known keys: {})",
          key,
          inner,
          file_path.display(),
          known.join(", ")
        );
      }
    }
  }
}

fn invalid(origin: &str, message: impl Into<String>) -> InitError {
  InitError::InvalidConfig {
    origin: origin.to_string(),
    message: message.into(),
  }
}

/// Load the embedded template contract and merge `init-project.toml` from `root` over it.
///
/// # Errors
/// Returns an error if the override file cannot be read, is not valid TOML,
/// or the merged result is incomplete or names an unusable Python version.
pub fn load_config(root: &Path) -> Result<TemplateConfig> {
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;
  let mut origin = "embedded defaults".to_string();

  let override_path = root.join(OVERRIDE_FILE);
  if override_path.is_file() {
    let data = fs::read_to_string(&override_path)
      .with_context(|| format!("failed to read {}", override_path.display()))?;
    let val: TomlValue = toml::from_str(&data)
      .map_err(|err| invalid(&override_path.display().to_string(), err.to_string()))?;
    warn_unknown_keys(&val, &override_path);
    merge_values(&mut merged, val);
    origin = override_path.display().to_string();
    log::debug!("merged config override from {origin}");
  }

  let merged_str = toml::to_string(&merged).context("failed to serialize merged config")?;
  let cfg: TemplateConfig =
    toml::from_str(&merged_str).map_err(|err| invalid(&origin, err.to_string()))?;

  if python_version_tag(&cfg.defaults.python_version).is_none() {
    return Err(
      invalid(
        &origin,
        format!(
          "python_version '{}' must look like MAJOR.MINOR",
          cfg.defaults.python_version
        ),
      )
      .into(),
    );
  }
  let paths = &cfg.paths;
  let all_paths = paths
    .required
    .iter()
    .chain(&paths.cleanup)
    .chain(&paths.docs)
    .chain(std::iter::once(&paths.version_marker));
  for rel in all_paths {
    if !is_inside_root(rel) {
      return Err(
        invalid(
          &origin,
          format!("path '{rel}' must be relative to the project root"),
        )
        .into(),
      );
    }
  }
  Ok(cfg)
}

/// True for non-empty relative paths that cannot climb out of the working directory.
fn is_inside_root(rel: &str) -> bool {
  let path = Path::new(rel);
  !rel.trim().is_empty()
    && path
      .components()
      .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

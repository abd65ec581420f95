use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use anyhow::{Context, Result, bail};
use assert_cmd::Command;
use fs_extra::dir::CopyOptions;
use tempfile::{Builder, TempDir};

const FIXTURE: &str = "tests/fixtures/python-template";

/// A throwaway clone of the fixture template with two commits of history.
#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
  bin_dir: PathBuf,
  git_config: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("init-project-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).expect("bin dir");
    let git_config = temp.path().join("gitconfig");
    std::fs::write(&git_config, "").expect("empty git config");
    let env = Self {
      temp,
      bin_dir,
      git_config,
    };
    if let Err(err) = std::fs::create_dir_all(env.path()) {
      panic!("create project dir failed: {err}");
    }
    env
  }

  /// Copy the fixture and give it some history, like a fresh clone would have.
  pub fn with_template() -> Result<Self> {
    let env = Self::new();
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(FIXTURE);
    let options = CopyOptions::new().content_only(true);
    fs_extra::dir::copy(&fixture, env.path(), &options)
      .map_err(|err| anyhow::anyhow!("copy fixture {}: {err}", fixture.display()))?;
    env.git(&["init", "--quiet"])?;
    env.git(&["add", "."])?;
    env.git(&["commit", "--quiet", "-m", "template: initial import"])?;
    env.write_file("CHANGELOG.md", "# Changelog\n\n## 0.1.0\n\n- Upstream fixes.\n")?;
    env.git(&["commit", "--quiet", "-am", "template: release 0.1.0"])?;
    Ok(env)
  }

  /// The template checkout. A subdirectory so helper files stay out of the commit.
  pub fn path(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn file(&self, relative: &str) -> PathBuf {
    self.path().join(relative)
  }

  pub fn read(&self, relative: &str) -> Result<String> {
    std::fs::read_to_string(self.file(relative))
      .with_context(|| format!("read {relative}"))
  }

  pub fn write_file(&self, relative: &str, body: &str) -> Result<PathBuf> {
    let path = self.file(relative);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("create parent dir for {}", path.display()))?;
    }
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
  }

  pub fn bin_dir(&self) -> &Path {
    &self.bin_dir
  }

  /// Put an executable script named `name` first on the binary's PATH.
  pub fn add_bin(&self, name: &str, body: &str) -> Result<PathBuf> {
    let path = self.bin_dir.join(name);
    std::fs::write(&path, body).with_context(|| format!("write script {}", path.display()))?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt as _;
      let mut perms = std::fs::metadata(&path)?.permissions();
      perms.set_mode(0o755);
      std::fs::set_permissions(&path, perms)
        .with_context(|| format!("set script executable at {}", path.display()))?;
    }
    Ok(path)
  }

  fn path_var(&self) -> String {
    match std::env::var("PATH") {
      Ok(existing) if !existing.is_empty() => {
        format!("{}:{existing}", self.bin_dir.display())
      }
      _ => self.bin_dir.display().to_string(),
    }
  }

  /// Environment shared by the binary and helper git calls: fake tools first
  /// on PATH, no user git config, a fixed identity.
  fn env_vars(&self) -> Vec<(&'static str, OsString)> {
    vec![
      ("PATH", self.path_var().into()),
      ("GIT_CONFIG_GLOBAL", self.git_config.clone().into_os_string()),
      ("GIT_CONFIG_NOSYSTEM", "1".into()),
      ("GIT_AUTHOR_NAME", "Test User".into()),
      ("GIT_AUTHOR_EMAIL", "test@example.com".into()),
      ("GIT_COMMITTER_NAME", "Test User".into()),
      ("GIT_COMMITTER_EMAIL", "test@example.com".into()),
    ]
  }

  pub fn init_project(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("init-project")?;
    cmd.current_dir(self.path());
    cmd.envs(self.env_vars());
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
  }

  pub fn git(&self, args: &[&str]) -> Result<String> {
    let out = StdCommand::new("git")
      .current_dir(self.path())
      .envs(self.env_vars())
      .args(args)
      .output()
      .with_context(|| format!("run git {}", args.join(" ")))?;
    if !out.status.success() {
      bail!(
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stderr)
      );
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
  }

  pub fn commit_count(&self) -> Result<usize> {
    Ok(self.git(&["rev-list", "--count", "HEAD"])?.trim().parse()?)
  }

  /// Every file below the checkout (outside `.git`) with its contents.
  pub fn snapshot(&self) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    collect(&self.path(), &self.path(), &mut files)?;
    Ok(files)
  }
}

fn collect(base: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) -> Result<()> {
  for entry in std::fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    if entry.file_name() == ".git" {
      continue;
    }
    if entry.file_type()?.is_dir() {
      collect(base, &path, files)?;
    } else {
      let rel = path.strip_prefix(base)?.display().to_string();
      files.insert(rel, std::fs::read(&path)?);
    }
  }
  Ok(())
}

/// Returns a workspace-local temp root for tests under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // crates/init-project -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}

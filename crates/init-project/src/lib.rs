use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod commands;
mod config;
pub mod errors;
pub mod project;
mod template;
mod texts;
mod utils;

use crate::errors::InitError;
use crate::utils::wizard::Wizard;

/// init-project - Turn a freshly cloned Python template into your own project.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// Template checkout to customize. Defaults to the current directory.
  #[arg(long, value_name = "DIR")]
  dir: Option<PathBuf>,
  /// Print diagnostic output (same as RUST_LOG=debug)
  #[arg(short, long)]
  verbose: bool,
}

pub fn parse() -> Cli {
  Cli::parse()
}

pub fn run() -> Result<()> {
  let cli = parse();
  init_logging(cli.verbose);
  install_interrupt_handler()?;

  let root = match cli.dir {
    Some(dir) => dir,
    None => std::env::current_dir().context("failed to resolve the current directory")?,
  };
  let mut wizard = Wizard::new();
  commands::init::run(&root, &mut wizard)?;
  Ok(())
}

fn init_logging(verbose: bool) {
  let default_filter = if verbose { "debug" } else { "warn" };
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .try_init();
}

/// Ctrl-C outside an interactive prompt ends the run immediately; nothing is rolled back.
fn install_interrupt_handler() -> Result<()> {
  ctrlc::set_handler(|| {
    anstream::eprintln!();
    crate::log_error!("{}", InitError::Interrupted);
    std::process::exit(1);
  })
  .context("failed to install Ctrl-C handler")
}

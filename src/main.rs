mod commands;
mod core;
mod manifest;
mod release;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::error::{BuildError, print_error};
use std::path::PathBuf;

/// Render reproducible setup.py manifests for Ansible community releases
#[derive(Parser)]
#[command(name = "ansible-build-meta")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate the packaging manifest for one release
  Generate {
    /// Release dependency file (ansible-X.Y.Z.deps)
    #[arg(long)]
    deps: PathBuf,
    /// The release's ansible_collections directory
    #[arg(long)]
    collections_dir: PathBuf,
    /// Config file (default: search build-meta.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output path (default: `output` from config, in the current directory)
    #[arg(long, conflicts_with = "stdout")]
    out: Option<PathBuf>,
    /// Print the manifest instead of writing it
    #[arg(long)]
    stdout: bool,
    /// Print the packaging description as JSON instead of rendering it
    #[arg(long, conflicts_with_all = ["stdout", "out"])]
    json: bool,
  },

  /// Check that a published manifest regenerates byte for byte
  Verify {
    /// Release dependency file (ansible-X.Y.Z.deps)
    #[arg(long)]
    deps: PathBuf,
    /// The release's ansible_collections directory
    #[arg(long)]
    collections_dir: PathBuf,
    /// Config file (default: search build-meta.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Manifest to compare against
    #[arg(long)]
    manifest: PathBuf,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Generate manifests for several releases in parallel
  Batch {
    /// Release dependency files (repeatable)
    #[arg(long = "deps", required = true, num_args = 1..)]
    deps: Vec<PathBuf>,
    /// Shared ansible_collections directory
    #[arg(long)]
    collections_dir: PathBuf,
    /// Config file (default: search build-meta.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory receiving ansible-<version>/<output> for each release
    #[arg(long)]
    out_dir: PathBuf,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the collection inventory scanned from a collections directory
  Inventory {
    /// The ansible_collections directory to scan
    #[arg(long)]
    collections_dir: PathBuf,
    /// Config file (default: search build-meta.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output inventory in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Generate {
      deps,
      collections_dir,
      config,
      out,
      stdout,
      json,
    } => commands::run_generate(deps, collections_dir, config, out, stdout, json),
    Commands::Verify {
      deps,
      collections_dir,
      config,
      manifest,
      json,
    } => commands::run_verify(deps, collections_dir, config, manifest, json),
    Commands::Batch {
      deps,
      collections_dir,
      config,
      out_dir,
      json,
    } => commands::run_batch(deps, collections_dir, config, out_dir, json),
    Commands::Inventory {
      collections_dir,
      config,
      json,
    } => commands::run_inventory(collections_dir, config, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: BuildError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

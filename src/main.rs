mod changelog;
mod commands;
mod core;
mod release;
mod ui;
mod version;

use clap::{Parser, Subcommand};
use commands::{ApplyArgs, ChangelogArgs, OutputMode};
use crate::core::context::ScribeContext;
use crate::core::error::{ScribeError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Version bumps and changelog entries for release pull requests
#[derive(Parser)]
#[command(name = "release-scribe")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Config file (default: search scribe.toml, .scribe.toml, .config/scribe.toml)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Increase diagnostic output (-v debug, -vv trace); RUST_LOG takes precedence
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bump the version and add changelog entries for a release pull request
  Apply {
    /// Pull request title; only titles starting with the release marker proceed
    #[arg(long, env = "PR_TITLE")]
    title: Option<String>,
    /// File holding the pull request description
    #[arg(long)]
    description_file: Option<PathBuf>,
    /// File holding pre-written change notes (used verbatim when non-blank)
    #[arg(long)]
    changes_file: Option<PathBuf>,
    /// File holding the pull request diff
    #[arg(long)]
    diff_file: Option<PathBuf>,
    /// Entry date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,
    /// Actually write the files (default: dry-run showing plan and diffs)
    #[arg(long)]
    apply: bool,
    /// Output plan in JSON format (useful for CI/automation)
    #[arg(long)]
    json: bool,
    /// Fail when any file is skipped or cannot be written
    #[arg(long)]
    strict: bool,
  },

  /// Show the current and next version of the source file
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Insert one entry into a single changelog file
  Changelog {
    /// Changelog file to update
    #[arg(long)]
    file: PathBuf,
    /// Header regex, matched against two adjacent lines joined together
    #[arg(long)]
    header_pattern: Option<String>,
    /// Version of the new entry (default: next version from the config)
    #[arg(long)]
    version: Option<String>,
    /// Entry date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,
    /// Entry body text; may start with a `-` bullet
    #[arg(long, conflicts_with = "body_file", allow_hyphen_values = true)]
    body: Option<String>,
    /// File holding the entry body
    #[arg(long)]
    body_file: Option<PathBuf>,
    /// Actually write the file (default: dry-run)
    #[arg(long)]
    apply: bool,
    /// Output plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write a starter scribe.toml
  Init {
    /// Source file carrying the version declaration
    #[arg(long, default_value = "plugin.php")]
    source: PathBuf,
    /// Changelog file to receive entries
    #[arg(long, default_value = "CHANGELOG.md")]
    changelog: PathBuf,
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  let heading = anstyle::Style::new()
    .bold()
    .underline()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)));
  let failure = anstyle::Style::new()
    .bold()
    .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red)));

  clap::builder::Styles::styled()
    .usage(heading)
    .header(heading)
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(failure)
    .error(failure)
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr so stdout stays parseable with --json
fn init_logging(verbose: u8) {
  let default_level = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let ctx = match ScribeContext::from_process(cli.config) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Apply {
      title,
      description_file,
      changes_file,
      diff_file,
      date,
      apply,
      json,
      strict,
    } => commands::run_apply(
      &ctx,
      ApplyArgs {
        title,
        description_file,
        changes_file,
        diff_file,
        date,
        mode: OutputMode { apply, json, strict },
      },
    ),
    Commands::Version { json } => commands::run_version(&ctx, json),
    Commands::Changelog {
      file,
      header_pattern,
      version,
      date,
      body,
      body_file,
      apply,
      json,
    } => commands::run_changelog(
      &ctx,
      ChangelogArgs {
        file,
        header_pattern,
        version,
        date,
        body,
        body_file,
        mode: OutputMode {
          apply,
          json,
          strict: false,
        },
      },
    ),
    Commands::Init {
      source,
      changelog,
      force,
    } => commands::run_init(&ctx, source, changelog, force),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ScribeError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

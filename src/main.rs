use crate::cli::{apply, inspect};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

mod cli;
pub(crate) mod data;
pub(crate) mod signature;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Don't output anything
    #[arg(global = true, short, long, default_value = "false")]
    quiet: bool,

    /// Increase verbosity level
    #[arg(global = true, short, long, action=clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write detached signatures (.asc) for the artifacts of a repository
    Apply {
        /// The directory of the local repository
        #[arg()]
        repository: PathBuf,
        /// The sign result file
        #[arg()]
        manifest: PathBuf,
        /// The name of the repository root, as used in the sign results
        #[arg(long, default_value = "maven-repository")]
        root_name: String,
        /// How to handle the checksums of the sign results
        #[arg(default_value_t, long, value_enum)]
        checksum: data::ChecksumPolicy,
        /// Only show which signatures would be written
        #[arg(long)]
        dry_run: bool,
        /// Fail if any signature could not be written
        #[arg(long)]
        strict: bool,
    },
    /// Show the content of a sign result file
    Inspect {
        /// The sign result file
        #[arg()]
        manifest: PathBuf,
    },
}

fn setup_logger(cli: &Cli) {
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Off,
        (_, 0) => LevelFilter::Warn,
        (_, 1) => LevelFilter::Info,
        (_, 2) => LevelFilter::Debug,
        (_, _) => LevelFilter::Trace,
    };

    if let Err(err) = TermLogger::init(
        log_level,
        ConfigBuilder::new()
            .set_time_level(LevelFilter::Debug)
            .set_max_level(LevelFilter::Debug)
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to setup logging: {err}");
    }

    log::debug!("Log Level: {log_level}");
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(&cli);

    match cli.command {
        Command::Apply {
            repository,
            manifest,
            root_name,
            checksum,
            dry_run,
            strict,
        } => apply::run(apply::Options {
            repository,
            manifest,
            root_name,
            checksum,
            dry_run,
            strict,
        })?,
        Command::Inspect { manifest } => inspect::run(inspect::Options { manifest })?,
    }

    Ok(())
}

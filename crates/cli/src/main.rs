// alvic - CUBRO part list to ALVIC panel translation

mod catalog;
mod exit_codes;
mod settings;
mod translate;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalog::{cmd_catalog, CatalogCommands};
use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use translate::{cmd_preview, cmd_translate};

#[derive(Parser)]
#[command(name = "alvic")]
#[command(about = "Translate CUBRO part lists into ALVIC catalog panels")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides when no -v is given.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Translator config file (TOML)
    #[arg(long, global = true, env = "ALVIC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a part list and write the machined / non-machined CSV files
    #[command(after_help = "\
Examples:
  alvic translate despiece.csv
  alvic translate despiece.csv --catalog data/base_datos_alvic_2026.csv
  alvic translate despiece.csv --machined-out mec.csv --non-machined-out sin_mec.csv
  alvic translate despiece.csv --json --fail-on-no-match")]
    Translate {
        /// CUBRO part list (CSV, header or 14-column headerless layout)
        input: PathBuf,

        /// Path to the ALVIC catalog CSV
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output file for machined parts
        #[arg(long)]
        machined_out: Option<PathBuf>,

        /// Output file for non-machined parts
        #[arg(long)]
        non_machined_out: Option<PathBuf>,

        /// Print the run summary as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON run summary to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit with code 8 when any LAC part has no catalog panel
        #[arg(long)]
        fail_on_no_match: bool,
    },

    /// Show how a part list is read, without translating it
    #[command(after_help = "\
Examples:
  alvic preview despiece.csv
  alvic preview despiece.csv --rows 20")]
    Preview {
        /// CUBRO part list
        input: PathBuf,

        /// Number of data rows to print
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },

    /// ALVIC catalog inspection
    #[command(subcommand)]
    Catalog(CatalogCommands),
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Translate {
            input,
            catalog,
            machined_out,
            non_machined_out,
            json,
            output,
            fail_on_no_match,
        } => cmd_translate(
            input,
            catalog,
            cli.config,
            machined_out,
            non_machined_out,
            json,
            output,
            fail_on_no_match,
        ),
        Commands::Preview { input, rows } => cmd_preview(input, rows, cli.config),
        Commands::Catalog(cmd) => cmd_catalog(cmd, cli.config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(if code == EXIT_SUCCESS { EXIT_ERROR } else { code })
        }
    }
}

//! langmap CLI - prepare the country dataset for the language map
//!
//! # Commands
//!
//! ```bash
//! langmap convert-languages countries.json converted.json   # languages mapping → array
//! langmap merge-flags                                       # add cca2 + flag by common name
//! langmap build-maps extended_countries.json                # write countryMap/languageMap
//! ```
//!
//! Default file names come from `LANGMAP_*` environment variables (or a
//! `.env` file); flags override them.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use langmap_helpers::{
    run_build_maps, run_convert, run_merge, CommandError, HelperConfig, Logger, RunOptions,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "langmap", version)]
#[command(about = "Prepare the country dataset for the language map", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert each country's `languages` mapping into an array of language records
    ConvertLanguages {
        /// Input JSON file (array of countries)
        input_file_path: PathBuf,

        /// Output JSON file
        output_file_path: PathBuf,
    },

    /// Merge `cca2` and `flag` from a second dataset, matching on common name
    MergeFlags {
        /// Primary dataset (default: countries.json)
        #[arg(long)]
        countries: Option<PathBuf>,

        /// Dataset providing codes and flags (default: flags_codes.json)
        #[arg(long)]
        flags: Option<PathBuf>,

        /// Output file (default: extended_countries.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the static country and language maps
    BuildMaps {
        /// Prepared dataset (languages converted, flags merged)
        input: PathBuf,

        /// Output directory (default: static/data)
        #[arg(short = 'd', long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    let (mut logger, result) = match Cli::try_parse() {
        Ok(cli) => {
            let mut logger = logger_for(&cli.command);
            let result = run(cli, &mut logger);
            (logger, result)
        }
        Err(e) => match usage_error(e) {
            Ok(usage) => (Logger::new(), Err(usage)),
            Err(e) => e.exit(),
        },
    };

    if let Err(e) = &result {
        logger.error(failure_message(e));
    }
    std::process::exit(exit_code(&result));
}

/// Map a clap parse failure to `CommandError::Usage`.
///
/// `--help` and `--version` are handed back so clap can print them and exit 0.
fn usage_error(e: clap::Error) -> Result<CommandError, clap::Error> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Err(e),
        _ => Ok(CommandError::Usage(e.render().to_string().trim_end().to_string())),
    }
}

/// The merger reports everything, failures included, on stdout.
fn logger_for(command: &Commands) -> Logger {
    match command {
        Commands::MergeFlags { .. } => Logger::new().errors_on_stdout(),
        _ => Logger::new(),
    }
}

fn failure_message(e: &CommandError) -> String {
    match e {
        CommandError::Usage(_) => e.to_string(),
        _ => format!("An error occurred: {}", e),
    }
}

fn exit_code(result: &Result<(), CommandError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn run(cli: Cli, logger: &mut Logger) -> Result<(), CommandError> {
    let config = HelperConfig::from_env()?;
    let options = RunOptions::from(&config);

    match cli.command {
        Commands::ConvertLanguages {
            input_file_path,
            output_file_path,
        } => {
            run_convert(&input_file_path, &output_file_path, &options, logger)?;
        }

        Commands::MergeFlags {
            countries,
            flags,
            output,
        } => {
            let mut paths = config.merge.clone();
            if let Some(p) = countries {
                paths.countries = p;
            }
            if let Some(p) = flags {
                paths.flags_codes = p;
            }
            if let Some(p) = output {
                paths.output = p;
            }
            run_merge(&paths, &options, logger)?;
        }

        Commands::BuildMaps { input, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.static_dir.clone());
            run_build_maps(&input, &out_dir, logger)?;
        }
    }

    Ok(())
}

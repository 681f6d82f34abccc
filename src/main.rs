use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use phrasebook::DictionaryFormat;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "phrasebook")]
#[command(about = "A translation-memory cache backed by a phrase dictionary", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Configuration file (YAML or JSON), defaults to phrasebook.yml")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Dictionary file, overrides the configuration")]
    dictionary: Option<PathBuf>,

    #[arg(long, global = true, value_enum, help = "Dictionary format, overrides the configuration")]
    format: Option<DictionaryFormat>,

    #[arg(long, global = true, help = "Target language tag written into JSON dictionaries")]
    target_language: Option<String>,

    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Print nothing instead of a placeholder for unknown phrases (--omit-missing-keys=false to disable)"
    )]
    omit_missing_keys: Option<bool>,

    #[arg(long, global = true, help = "Enable verbose debug output")]
    verbose: bool,

    #[arg(long, global = true, help = "Perform a dry run without writing the dictionary")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Translate phrases from the arguments, or from stdin lines if none are given")]
    Translate {
        #[arg(long, short = 's', help = "Language of the source phrases")]
        source_language: String,

        #[arg(help = "Phrases to translate")]
        phrases: Vec<String>,
    },

    #[command(about = "List dictionary entries that have no translation yet")]
    Missing {
        #[arg(long, short = 's', help = "Language of the source phrases")]
        source_language: String,
    },

    #[command(about = "Show entry counts for the dictionary")]
    Stats {
        #[arg(long, short = 's', help = "Language of the source phrases")]
        source_language: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli::Config {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
    };

    let overrides = cli::ConfigOverrides {
        config_file: cli.config,
        dictionary: cli.dictionary,
        format: cli.format,
        target_language: cli.target_language,
        omit_missing_keys: cli.omit_missing_keys,
    };
    let cache_config = cli::resolve_cache_config(&overrides)?;

    match cli.command {
        Commands::Translate { source_language, phrases } => {
            cli::translate(&source_language, phrases, cache_config, &config)?;
        }
        Commands::Missing { source_language } => {
            cli::missing(&source_language, cache_config)?;
        }
        Commands::Stats { source_language } => {
            cli::stats(&source_language, cache_config)?;
        }
    }

    Ok(())
}

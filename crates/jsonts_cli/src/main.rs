//! jsonts CLI
//!
//! Inspect and validate the UI message catalogs of the JSON to TypeScript
//! converter, and translate keys the same way the UI does.

mod config;
mod project;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonts_i18n::{I18n, Language};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{load_catalog_dir, JsontsConfig};

#[derive(Parser)]
#[command(name = "jsonts")]
#[command(version)]
#[command(about = "Inspect and validate jsonts UI message catalogs")]
#[command(long_about = None)]
struct Cli {
    /// Config file (defaults to ./jsonts.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate message keys (e.g. `toolbar.reset`)
    T {
        /// Dotted key paths
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,

        /// Language to translate into
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// List every key and its text
    Keys {
        /// Language to list
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// List supported languages
    Langs,

    /// Check that catalogs parse and share one schema
    Check {
        /// Directory with en.yaml and zh.yaml (defaults to the configured or built-in catalogs)
        #[arg(long, value_name = "DIR")]
        catalog_dir: Option<PathBuf>,
    },

    /// Write a jsonts.toml
    Init {
        /// Directory to write into
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Initial UI language
        #[arg(short, long)]
        lang: Option<Language>,

        /// Also export the built-in catalogs for editing
        #[arg(long)]
        with_catalogs: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::T { keys, lang } => {
            let i18n = resolver(cli.config.as_deref(), lang)?;
            for key in keys {
                println!("{}", i18n.t(&key));
            }
        }
        Commands::Keys { lang } => {
            let i18n = resolver(cli.config.as_deref(), lang)?;
            for (path, value) in i18n.table().tree(i18n.current_lang()).leaves() {
                println!("{path} = {value}");
            }
        }
        Commands::Langs => {
            for lang in Language::ALL {
                println!("{}\t{}", lang.code(), lang.native_name());
            }
        }
        Commands::Check { catalog_dir } => {
            let table = match catalog_dir {
                Some(dir) => Arc::new(load_catalog_dir(&dir)?),
                None => load_config(cli.config.as_deref())?.message_table()?,
            };
            let keys = table.tree(Language::PRIMARY).leaf_paths().len();
            println!(
                "ok: {} keys in {} languages",
                keys,
                Language::ALL.len()
            );
        }
        Commands::Init {
            path,
            lang,
            with_catalogs,
            force,
        } => {
            let written = project::init_project(&path, lang, with_catalogs, force)?;
            println!("Created {}", written.display());
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<JsontsConfig> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    JsontsConfig::discover(explicit, &cwd)
}

fn resolver(config_path: Option<&std::path::Path>, lang: Option<Language>) -> Result<I18n> {
    let config = load_config(config_path)?;
    let table = config.message_table()?;
    let lang = config.initial_language(lang);
    info!(language = %lang, "resolving messages");
    Ok(I18n::with_language(table, lang))
}

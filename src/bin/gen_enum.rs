//! gen-enum CLI
//!
//! Builds enumerations, constant sets and bitmaps from the command line,
//! restores serialized enumerants, and renders Rust enums.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gen_enum::codegen::rust::emit_enumeration;
use gen_enum::config::OutputFormat;
use gen_enum::{make_bitmap_with, make_constants_with, restore_with, EnumBuilder, GenEnumConfig, Input};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gen-enum")]
#[command(about = "Build named, immutable enumerations from flexible input")]
#[command(version)]
struct Cli {
    /// Config file (defaults to gen-enum.toml and the XDG config dir)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct KeysArgs {
    /// Keys: one delimited string, several keys, or JSON with --json
    #[arg(required = true)]
    keys: Vec<String>,

    /// Parse the single argument as JSON (array or object)
    #[arg(long)]
    json: bool,
}

impl KeysArgs {
    fn into_args(self) -> Result<Vec<Value>> {
        if self.json {
            self.keys
                .iter()
                .map(|k| serde_json::from_str(k).with_context(|| format!("invalid JSON argument {}", k)))
                .collect()
        } else {
            Ok(self.keys.into_iter().map(Value::String).collect())
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print an enumeration's JSON wire form
    Enum {
        #[command(flatten)]
        keys: KeysArgs,
        /// Omit predicate metadata (the output cannot be restored)
        #[arg(long)]
        opaque: bool,
    },

    /// Print a constant set
    Constants {
        #[command(flatten)]
        keys: KeysArgs,
    },

    /// Print a bitmap
    Bitmap {
        #[command(flatten)]
        keys: KeysArgs,
        /// Default value for keys without an explicit boolean
        #[arg(long)]
        default: bool,
    },

    /// Restore enumerants from JSON and print their predicate tables
    Restore {
        /// Input file (stdin when absent)
        file: Option<PathBuf>,
        /// Also look for enumerants inside arrays
        #[arg(long)]
        descend_into_sequences: bool,
    },

    /// Print a Rust enum for the keys
    Codegen {
        #[command(flatten)]
        keys: KeysArgs,
        /// Generated type name
        #[arg(short, long)]
        name: String,
        /// Derive serde traits
        #[arg(long = "serde")]
        with_serde: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    println!("{}", text);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = GenEnumConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    if cli.compact {
        config.output.format = OutputFormat::Compact;
    }
    let format = config.output.format;

    match cli.command {
        Commands::Enum { keys, opaque } => {
            let mut build = config.build.clone();
            if opaque {
                build.serializable = false;
            }
            let input = Input::from_args(keys.into_args()?)?;
            let enumeration = EnumBuilder::from_config(&build).build(input)?;
            print_json(&enumeration, format)
        }

        Commands::Constants { keys } => {
            let input = Input::from_args(keys.into_args()?)?;
            let constants = make_constants_with(input, config.build.duplicates)?;
            print_json(&constants, format)
        }

        Commands::Bitmap { keys, default } => {
            let input = Input::from_args(keys.into_args()?)?;
            let bitmap = make_bitmap_with(default, input, config.build.duplicates)?;
            print_json(&bitmap, format)
        }

        Commands::Restore { file, descend_into_sequences } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut restore = config.restore.clone();
            if descend_into_sequences {
                restore.descend_into_sequences = true;
            }

            let restored = restore_with(text.as_str(), &restore)?;
            let found = restored.enumerants();
            if found.is_empty() {
                println!("No enumerants found");
            }
            for (path, enumerant) in found {
                let path = if path.is_empty() { "<root>" } else { path.as_str() };
                println!("{} = {}", path, enumerant);
                for (predicate, truth) in enumerant.predicates() {
                    println!("   └─ {}() = {}", predicate, truth);
                }
            }
            Ok(())
        }

        Commands::Codegen { keys, name, with_serde } => {
            let input = Input::from_args(keys.into_args()?)?;
            let enumeration = EnumBuilder::from_config(&config.build).build(input)?;
            let mut codegen = config.codegen.clone();
            if with_serde {
                codegen.serde = true;
            }
            print!("{}", emit_enumeration(&enumeration, &name, &codegen)?);
            Ok(())
        }
    }
}

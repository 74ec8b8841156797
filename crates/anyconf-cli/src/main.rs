//! `anyconf` CLI: render, query and validate configuration documents.
//!
//! ## Usage
//!
//! ```sh
//! # Dump a JSON document in the indented diagnostic format (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"]}' | anyconf render
//!
//! # Re-emit as strict pretty JSON using case-insensitive maps
//! anyconf render -i config.json --strategy hashed-case-insensitive --format json
//!
//! # Resolve a dotted path (negative indices count from the end)
//! anyconf get items.-1.name -i config.json
//!
//! # Validate a component manifest and print the parsed records
//! anyconf manifest -i manifest.json
//! ```

use anyconf_core::{parse_manifest, Strategy, Value};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "anyconf",
    version,
    about = "Render, query and validate heterogeneous configuration values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Read JSON and print it as a value tree
    Render {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Map storage strategy: ordered, hashed or hashed-case-insensitive
        #[arg(long, default_value_t = Strategy::Ordered)]
        strategy: Strategy,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Dump)]
        format: Format,
    },
    /// Resolve a dotted path such as `items.-1.name`
    Get {
        /// Dotted path to resolve
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Map storage strategy: ordered, hashed or hashed-case-insensitive
        #[arg(long, default_value_t = Strategy::Ordered)]
        strategy: Strategy,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Dump)]
        format: Format,
    },
    /// Validate a component manifest and print its records as JSON
    Manifest {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented diagnostic dump
    Dump,
    /// Strict pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Render {
            input,
            output,
            strategy,
            format,
        } => {
            let value = load_value(input.as_deref(), strategy)?;
            write_output(output.as_deref(), &render(&value, format)?)?;
        }
        Commands::Get {
            path,
            input,
            strategy,
            format,
        } => {
            let value = load_value(input.as_deref(), strategy)?;
            let found = value
                .resolve_ref(&path)
                .with_context(|| format!("Failed to resolve path: {path}"))?;
            debug!(%path, kind = %found.kind(), "resolved path");
            write_output(None, &render(found, format)?)?;
        }
        Commands::Manifest { input, output } => {
            let json = read_input(input.as_deref())?;
            let components = parse_manifest(&json).context("Invalid component manifest")?;
            info!(count = components.len(), "validated manifest");
            let mut pretty = serde_json::to_string_pretty(&components)?;
            pretty.push('\n');
            write_output(output.as_deref(), &pretty)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "anyconf=warn",
        1 => "anyconf=info",
        _ => "anyconf=debug",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();
    Ok(())
}

fn load_value(input: Option<&str>, strategy: Strategy) -> Result<Value> {
    let json = read_input(input)?;
    let value = Value::from_json_str(&json, strategy).context("Failed to read JSON document")?;
    info!(%strategy, kind = %value.kind(), "loaded document");
    Ok(value)
}

fn render(value: &Value, format: Format) -> Result<String> {
    Ok(match format {
        Format::Dump => value.to_json(),
        Format::Json => {
            let mut pretty = value
                .to_json_pretty()
                .context("Failed to serialize value as JSON")?;
            pretty.push('\n');
            pretty
        }
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            print!("{content}");
        }
    }
    Ok(())
}

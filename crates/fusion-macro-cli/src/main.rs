//! `fusion-macro` CLI: convert Fusion clipboard table literals from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Table literal to pretty-printed JSON (stdin → stdout)
//! echo "Input { SourceOp = 'Merge1', Source = 'Output' }" | fusion-macro parse
//!
//! # JSON back to a table literal, file to file
//! fusion-macro manifest -i settings.json -o settings.setting
//!
//! # Normalize a copied composition
//! fusion-macro fmt -i clip.setting
//!
//! # Keep logs somewhere else, or nowhere
//! fusion-macro --log-dir /tmp/fusion-logs parse -i clip.setting
//! fusion-macro --no-log-files parse -i clip.setting
//! ```

mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(
    name = "fusion-macro",
    version,
    about = "Convert Fusion clipboard table literals to and from JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for the per-level log files
    /// [default: $XDG_DATA_HOME/davinci-cli]
    #[arg(long, global = true, env = "FUSION_MACRO_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Do not write log files; errors still go to stderr
    #[arg(long, global = true)]
    no_log_files: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a table literal and print it as JSON
    Parse(IoArgs),
    /// Render JSON as a table literal
    Manifest(IoArgs),
    /// Parse a table literal and print it back in canonical form
    Fmt(IoArgs),
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = if cli.no_log_files {
        None
    } else {
        cli.log_dir.clone().or_else(logging::default_log_dir)
    };
    if let Err(err) = logging::init(log_dir.as_deref()) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Parse(args) => {
            info!(command = "parse", "converting table literal to JSON");
            let text = read_input(&args)?;
            let json = fusion_macro::parse_to_json(&text)
                .context("Failed to convert table literal to JSON")?;
            write_output(&args, &json)
        }
        Commands::Manifest(args) => {
            info!(command = "manifest", "converting JSON to table literal");
            let json = read_input(&args)?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Error parsing JSON")?;
            let value = fusion_macro::from_json(&value)
                .context("Failed to convert JSON to a table literal")?;
            let literal = fusion_macro::manifest(&value);
            write_output(&args, &literal)
        }
        Commands::Fmt(args) => {
            info!(command = "fmt", "normalizing table literal");
            let text = read_input(&args)?;
            let literal = fusion_macro::manifest(&fusion_macro::parse(&text));
            write_output(&args, &literal)
        }
    }
}

fn read_input(args: &IoArgs) -> Result<String> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    debug!(bytes = text.len(), "read input");
    Ok(text)
}

fn write_output(args: &IoArgs, content: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            debug!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use extractors::ContactFieldExtractor;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

mod commands;
mod config;
mod input;

#[derive(Parser, Debug)]
#[command(
    name = "fieldscan",
    author,
    version,
    about = "Pull names, emails, phone numbers and addresses out of document text"
)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every field and print a JSON report
    Extract {
        /// Text file to read, or `-` for stdin
        input: String,

        /// Print only the extracted fields, without report metadata
        #[arg(long)]
        data_only: bool,

        /// Single-line JSON regardless of the config
        #[arg(long)]
        compact: bool,
    },
    /// Extract a single field kind (email, phone or address) as a JSON list
    Field {
        kind: String,

        /// Text file to read, or `-` for stdin
        input: String,
    },
    /// Show how the name classifier treated each line
    Explain {
        /// Text file to read, or `-` for stdin
        input: String,
    },
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout carries JSON output, so logs go to stderr
    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("fieldscan.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file_path.as_deref());

    let (config, config_path) =
        config::CliConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!("Using config at {:?}", config_path);

    let extractor = ContactFieldExtractor::with_settings(&config.extraction())
        .with_context(|| format!("Invalid extraction settings in {:?}", config_path))?;
    let output = config.output();

    let rendered = match cli.command {
        Command::Extract {
            input,
            data_only,
            compact,
        } => {
            let report = commands::extract(&extractor, &input, output.preview_chars)?;
            let pretty = output.pretty && !compact;
            if data_only {
                commands::to_json(&report.data, pretty)?
            } else {
                commands::to_json(&report, pretty)?
            }
        }
        Command::Field { kind, input } => {
            let values = commands::extract_field(&extractor, &kind, &input)?;
            commands::to_json(&values, output.pretty)?
        }
        Command::Explain { input } => commands::explain(&extractor, &input)?,
    };

    println!("{}", rendered);

    Ok(())
}

//! msggen code generator
//!
//! Generates Rust request/response declarations from a service field model.

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use msggen_gen::errors::GeneratorError;
use msggen_gen::input::load_service;
use msggen_gen::output::generate_and_write;
use msggen_gen::typemap::TypeMapper;
use msggen_model::Service;
use msggen_model::services::lightning::define_lightning_service;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// msggen - transforms service field models into typed Rust declarations
#[derive(Parser, Debug)]
#[command(name = "msggen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Built-in service to generate code for (e.g., "lightning")
    #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
    service: Option<String>,

    /// JSON snapshot of a service model to generate code for
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for generated code
    #[arg(short, long, default_value = "src/model.rs")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let service = resolve_service(&cli)?;
    let mapper = TypeMapper::rust();

    generate_and_write(&service, &mapper, &cli.output, &invocation(), cli.dry_run)?;

    if !cli.dry_run && cli.verbose > 0 {
        eprintln!(
            "{} {} methods to {}",
            "Generated".green().bold(),
            service.methods.len(),
            cli.output.display().to_string().cyan()
        );
    }

    Ok(())
}

fn resolve_service(cli: &Cli) -> Result<Service, GeneratorError> {
    if let Some(path) = &cli.input {
        return load_service(path);
    }

    match cli.service.as_deref() {
        Some("lightning") => Ok(define_lightning_service()),
        Some(other) => Err(GeneratorError::ConfigError(format!(
            "Unknown service: '{}'. Available services: lightning",
            other
        ))),
        None => Err(GeneratorError::ConfigError(
            "Either --service or --input is required".to_string(),
        )),
    }
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// The command line as typed, with the program reduced to its file name.
fn invocation() -> String {
    let mut args = std::env::args();
    let program = args
        .next()
        .map(|p| {
            Path::new(&p)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.clone())
        })
        .unwrap_or_else(|| "msggen".to_string());

    std::iter::once(program)
        .chain(args)
        .collect::<Vec<_>>()
        .join(" ")
}

//! wdfladder validation CLI
//!
//! Compare the WDF filters against their analog references.
//!
//! ```bash
//! wdfladder-validate run
//! wdfladder-validate run --config validate.yaml --case lpf_100hz --report out/report.json
//! wdfladder-validate list
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wdfladder_validate::{ValidationConfig, ValidationRunner};

#[derive(Parser)]
#[command(name = "wdfladder-validate")]
#[command(about = "Validate WDF filters against bilinear analog references")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a validation config YAML. The built-in suite is used if absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run validation cases
    Run {
        /// Run only this case
        #[arg(long)]
        case: Option<String>,

        /// Write a JSON report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List configured cases
    List,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_config(&cli).and_then(|config| match cli.command {
        Some(Commands::List) => {
            list_cases(&config);
            Ok(true)
        }
        Some(Commands::Run { case, report }) => run_validation(config, case, report),
        None => run_validation(config, None, None),
    });

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(2);
        }
    }
}

fn load_config(cli: &Cli) -> Result<ValidationConfig, Box<dyn Error>> {
    match &cli.config {
        Some(path) => Ok(ValidationConfig::load(path)?),
        None => Ok(ValidationConfig::default_config()),
    }
}

fn list_cases(config: &ValidationConfig) {
    println!("{}", "Validation cases:".bold());
    for (name, case) in &config.cases {
        println!(
            "  {} [{}] {}",
            name.bold(),
            case.kind.name(),
            case.description.dimmed()
        );
    }
}

/// `Ok(true)` when every case passed.
fn run_validation(
    config: ValidationConfig,
    case: Option<String>,
    report_path: Option<PathBuf>,
) -> Result<bool, Box<dyn Error>> {
    println!(
        "{} Running validation at {} Hz...",
        "▶".blue(),
        config.global.sample_rate
    );
    let runner = ValidationRunner::new(config);
    let report = match case {
        Some(name) => runner.run_single(&name)?,
        None => runner.run_all(),
    };

    report.print_summary();

    if let Some(path) = report_path {
        report.save_json(&path)?;
        println!("{} Report saved to {}", "✓".green(), path.display());
    }

    Ok(report.all_passed())
}

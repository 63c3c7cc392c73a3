mod cli;

use clap::{Parser, Subcommand};
use cli::FilterArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wdfladder", about = "Render and measure wave digital RLC ladder filters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a filter over an input WAV file.
    Process {
        /// Input WAV file.
        input: String,
        /// Output WAV file (mono, 32-bit float).
        output: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the magnitude response measured with steady-state sines.
    Response {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sample rate in Hz (overrides the preset).
        #[arg(long)]
        sample_rate: Option<f64>,
        /// Number of log-spaced frequency points.
        #[arg(long, default_value_t = 24)]
        points: usize,
        /// Lowest frequency in Hz.
        #[arg(long, default_value_t = 20.0)]
        min_freq: f64,
        /// Highest frequency in Hz (clamped below Nyquist).
        #[arg(long, default_value_t = 20_000.0)]
        max_freq: f64,
    },
    /// Write a preset YAML for the given filter settings.
    Preset {
        /// Output YAML path.
        output: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Process {
            input,
            output,
            filter,
        } => cli::process::run(&input, &output, &filter),
        Command::Response {
            filter,
            sample_rate,
            points,
            min_freq,
            max_freq,
        } => cli::response::run(&filter, sample_rate, points, min_freq, max_freq),
        Command::Preset { output, filter } => cli::write_preset(&output, &filter),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

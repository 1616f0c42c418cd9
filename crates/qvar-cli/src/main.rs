//! CLI for qvar — quantum-assisted portfolio Value-at-Risk estimation.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qvar")]
#[command(about = "qvar — quantum-assisted portfolio Value-at-Risk estimation")]
#[command(version = qvar_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full VaR pipeline: portfolio statistics, PCA scaling,
    /// remote tail sampling (or demo fallback), quantile reconstruction.
    Estimate {
        /// Backend to run the tail circuit on
        #[arg(long, default_value = qvar_core::DEFAULT_BACKEND)]
        backend: String,

        /// Runtime service base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Shot count for the tail circuit
        #[arg(long, default_value_t = qvar_core::DEFAULT_SHOTS)]
        shots: u64,

        /// Confidence level α of the tail estimate
        #[arg(long, default_value_t = qvar_core::CONFIDENCE_LEVEL)]
        alpha: f64,

        /// Skip the remote call and use the published demo tail probability
        #[arg(long)]
        offline: bool,

        /// Write the full report as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Check a previously submitted runtime job: print its status and, when
    /// complete, the measurement counts and empirical tail probability.
    Job {
        /// Job identifier returned at submission time
        job_id: String,

        /// Runtime service base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            backend,
            base_url,
            shots,
            alpha,
            offline,
            output,
        } => commands::estimate::run(commands::estimate::EstimateCommandConfig {
            backend: &backend,
            base_url: base_url.as_deref(),
            shots,
            alpha,
            offline,
            output_path: output.as_deref(),
        }),
        Commands::Job { job_id, base_url } => commands::job::run(&job_id, base_url.as_deref()),
    }
}

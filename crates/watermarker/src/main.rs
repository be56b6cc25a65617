//! Watermarker CLI - batch resize photos and stamp them with watermarks.
//!
//! Every `.png`/`.jpg` in the input folder is resized onto a fixed canvas in
//! the output folder, then the output folder is stamped with a rotated text
//! watermark and/or an image watermark in the bottom-right corner.
//!
//! # Usage
//!
//! ```bash
//! # Resize and stamp text
//! watermarker ./photos ./proofs -r 900 600 -t "PROOF" -o 0.5
//!
//! # Stamp an existing folder with a logo
//! watermarker . ./proofs -i logo.png
//!
//! # Take every setting from a config file
//! watermarker -c watermarker.toml
//! ```

use clap::Parser;

mod cli;
mod logging;

/// Watermarker - batch resize photos and stamp them with watermarks.
#[derive(Parser, Debug)]
#[command(name = "watermarker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,

    /// Print the batch report as JSON on stdout
    #[arg(long)]
    report: bool,

    #[command(flatten)]
    run: cli::RunArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized until the config file (if any) is read.
    let (config, logging_config) = cli.run.load()?;
    logging::init_from_config(&logging_config, cli.verbose, cli.json_logs);

    tracing::debug!("Watermarker v{}", watermarker_core::VERSION);

    cli::batch::execute(config, cli.report)
}

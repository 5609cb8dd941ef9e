//! wavefx - apply one destructive edit to a WAV file
//!
//! # Usage
//!
//! ```bash
//! # Remove frames 44100..88200 (second 1 to 2 at 44.1 kHz)
//! wavefx input.wav -o output.wav cut 44100 88200
//!
//! # Fade out the last part and smooth a selection's edges
//! wavefx input.wav -o output.wav fade-out 200000 220500
//! wavefx input.wav -o output.wav smooth 1000 50000
//! ```
//!
//! Frame arguments are frame indices (one unit per L/R pair for stereo).
//! Set `RUST_LOG=debug` for verbose output.

mod command;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use wavefx_core::audio_file::{load_wave, save_wave};
use wavefx_core::config::{default_config_path, load_config, read_config, EditConfig};
use wavefx_core::WaveEditor;

use command::EditCommand;

/// Apply a destructive edit to a WAV file
#[derive(Parser, Debug)]
#[command(name = "wavefx")]
#[command(version)]
struct Cli {
    /// Input WAV file (mono or stereo)
    input: PathBuf,

    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Editing config (YAML); must exist when given. Without it the user
    /// config file is used if present
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: EditCommand,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = resolve_config(&cli)?;
    run(&cli, &config)
}

fn resolve_config(cli: &Cli) -> Result<EditConfig> {
    match &cli.config {
        Some(path) => read_config(path),
        None => Ok(load_config(&default_config_path())),
    }
}

fn run(cli: &Cli, config: &EditConfig) -> Result<()> {
    let editor = WaveEditor::from_config(config);

    let mut wave = load_wave(&cli.input)?;
    log::info!(
        "Loaded {} frames ({}) from {:?}",
        wave.frames(),
        wave.layout().name(),
        cli.input
    );

    if config.normalize_on_load {
        editor.normalize(&mut wave);
    }

    command::apply(&editor, &mut wave, &cli.command)?;

    if !wave.is_edited() {
        log::info!("Wave content unchanged");
    }

    save_wave(&wave, &cli.output, config.output_format)?;
    Ok(())
}

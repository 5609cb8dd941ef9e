//! WAV file handling
//!
//! Loads mono or stereo WAV files (integer PCM or 32-bit float) into a
//! [`Wave`] and writes a `Wave` back out. Integer samples are scaled to and
//! from the -1.0..=1.0 float range; nothing is resampled or remixed.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::config::OutputFormat;
use crate::types::Sample;
use crate::wave::Wave;

/// Load a WAV file into a new, unedited wave
pub fn load_wave(path: &Path) -> Result<Wave> {
    let reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {:?}", path))?;
    let spec = reader.spec();

    log::info!(
        "load_wave: {:?} ({} ch, {} Hz, {} bit {:?})",
        path,
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    let samples = read_samples(reader)
        .with_context(|| format!("Failed to decode WAV file: {:?}", path))?;

    Wave::from_interleaved(samples, spec.channels, spec.sample_rate)
        .map_err(|e| anyhow!("{}: {:?}", e, path))
}

fn read_samples(reader: WavReader<BufReader<File>>) -> Result<Vec<Sample>> {
    let spec = reader.spec();
    match spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                bail!("Unsupported float bit depth: {}", spec.bits_per_sample);
            }
            reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(Into::into)
        }
        SampleFormat::Int => {
            if !(8..=32).contains(&spec.bits_per_sample) {
                bail!("Unsupported PCM bit depth: {}", spec.bits_per_sample);
            }
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(Into::into)
        }
    }
}

/// Write a wave to a WAV file in the requested sample format
///
/// Integer formats clamp samples to -1.0..=1.0 before quantizing.
pub fn save_wave(wave: &Wave, path: &Path, format: OutputFormat) -> Result<()> {
    let spec = WavSpec {
        channels: wave.channels() as u16,
        sample_rate: wave.sample_rate(),
        bits_per_sample: format.bits_per_sample(),
        sample_format: match format {
            OutputFormat::Float32 => SampleFormat::Float,
            OutputFormat::Pcm16 | OutputFormat::Pcm24 => SampleFormat::Int,
        },
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create WAV file: {:?}", path))?;
    let mut writer =
        WavWriter::new(BufWriter::new(file), spec).context("Failed to create WAV writer")?;

    match format {
        OutputFormat::Float32 => {
            for &sample in wave.samples() {
                writer.write_sample(sample).context("Failed to write WAV sample")?;
            }
        }
        OutputFormat::Pcm16 => {
            for &sample in wave.samples() {
                let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer.write_sample(quantized).context("Failed to write WAV sample")?;
            }
        }
        OutputFormat::Pcm24 => {
            const MAX_24: f32 = 8_388_607.0;
            for &sample in wave.samples() {
                let quantized = (sample.clamp(-1.0, 1.0) * MAX_24) as i32;
                writer.write_sample(quantized).context("Failed to write WAV sample")?;
            }
        }
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    log::info!(
        "save_wave: wrote {} frames ({} ch) to {:?}",
        wave.frames(),
        wave.channels(),
        path
    );
    Ok(())
}

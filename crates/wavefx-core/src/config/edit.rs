//! Editing configuration

use serde::{Deserialize, Serialize};

/// Sample format used when writing WAV files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// 32-bit IEEE float, lossless for edited buffers
    #[default]
    Float32,
    /// 16-bit integer PCM
    Pcm16,
    /// 24-bit integer PCM
    Pcm24,
}

impl OutputFormat {
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            OutputFormat::Float32 => 32,
            OutputFormat::Pcm16 => 16,
            OutputFormat::Pcm24 => 24,
        }
    }
}

/// Editing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Width in frames of each fade applied by `smooth`
    /// Default: 32 frames
    pub smooth_edge_frames: usize,

    /// Apply normalization gain right after loading a file
    /// Default: false
    pub normalize_on_load: bool,

    /// Sample format for saved files
    /// Default: 32-bit float
    pub output_format: OutputFormat,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            smooth_edge_frames: 32,
            normalize_on_load: false,
            output_format: OutputFormat::Float32,
        }
    }
}

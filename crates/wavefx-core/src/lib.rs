//! wavefx core - destructive editing of interleaved audio buffers

pub mod audio_file;
pub mod config;
pub mod edit;
pub mod types;
pub mod wave;

pub use edit::{EditError, FadeKind, FrameRange, WaveEditor};
pub use types::*;
pub use wave::Wave;

//! Editing error types

use thiserror::Error;

/// Errors that can occur during wave editing
///
/// Every operation that returns one of these leaves the wave exactly as it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Replacement buffer could not be allocated
    #[error("Unable to allocate {requested} samples for replacement buffer")]
    Allocation { requested: usize },

    /// Range start lies after its end
    #[error("Invalid frame range: {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    /// Zero-length range where a non-empty one is required (fades)
    #[error("Frame range is empty")]
    EmptyRange,

    /// In-place operation reaching past the last frame
    #[error("Frame range ends at {end}, wave has {frames} frames")]
    OutOfBounds { end: usize, frames: usize },

    /// Only mono and stereo buffers are supported
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(u16),

    /// Buffer length is not a whole number of frames
    #[error("Buffer of {len} samples is not a multiple of {channels} channels")]
    MisalignedBuffer { len: usize, channels: usize },
}

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;

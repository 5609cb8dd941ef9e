//! Frame ranges and frame → sample index conversion

use std::ops::Range;

use super::error::{EditError, EditResult};

/// Half-open range of frames `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRange {
    pub start: usize,
    pub end: usize,
}

impl FrameRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of frames covered (0 for inverted ranges)
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Reject ranges whose start lies after their end
    pub fn validated(self) -> EditResult<Self> {
        if self.start > self.end {
            return Err(EditError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self)
    }

    /// Clamp both ends to a wave of `frames` frames
    pub fn clamped(self, frames: usize) -> Self {
        Self {
            start: self.start.min(frames),
            end: self.end.min(frames),
        }
    }

    /// Fail unless the whole range lies inside a wave of `frames` frames
    pub fn within(self, frames: usize) -> EditResult<Self> {
        if self.end > frames {
            return Err(EditError::OutOfBounds { end: self.end, frames });
        }
        Ok(self)
    }

    /// Interleaved sample indices for a buffer with `channels` channels
    #[inline]
    pub fn to_samples(&self, channels: usize) -> Range<usize> {
        self.start * channels..self.end * channels
    }
}

impl From<Range<usize>> for FrameRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

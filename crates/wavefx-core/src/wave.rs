//! Wave container
//!
//! A `Wave` exclusively owns one interleaved sample buffer together with its
//! channel layout, sample rate and edited flag. The buffer length is always a
//! whole number of frames.

use crate::edit::{EditError, EditResult};
use crate::types::{ChannelLayout, Sample, StereoSample};

/// Default sample rate for waves built in memory
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// An owned, interleaved audio buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    samples: Vec<Sample>,
    layout: ChannelLayout,
    sample_rate: u32,
    edited: bool,
}

impl Wave {
    /// Build a wave from interleaved samples
    ///
    /// Fails if `channels` is not 1 or 2, or if the buffer does not hold a
    /// whole number of frames.
    pub fn from_interleaved(
        samples: Vec<Sample>,
        channels: u16,
        sample_rate: u32,
    ) -> EditResult<Self> {
        let layout =
            ChannelLayout::from_count(channels).ok_or(EditError::UnsupportedChannels(channels))?;
        if samples.len() % layout.count() != 0 {
            return Err(EditError::MisalignedBuffer {
                len: samples.len(),
                channels: layout.count(),
            });
        }
        Ok(Self {
            samples,
            layout,
            sample_rate,
            edited: false,
        })
    }

    /// Build a mono wave at the default sample rate
    pub fn mono(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            layout: ChannelLayout::Mono,
            sample_rate: DEFAULT_SAMPLE_RATE,
            edited: false,
        }
    }

    /// Build a stereo wave from frames at the default sample rate
    pub fn stereo(frames: &[StereoSample]) -> Self {
        Self {
            samples: bytemuck::cast_slice(frames).to_vec(),
            layout: ChannelLayout::Stereo,
            sample_rate: DEFAULT_SAMPLE_RATE,
            edited: false,
        }
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// Interleaved sample count (frames × channels)
    #[inline]
    pub fn total_samples(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn frames(&self) -> usize {
        self.samples.len() / self.layout.count()
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.count()
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn set_edited(&mut self, edited: bool) {
        self.edited = edited;
    }

    /// Zero-copy frame view, available for stereo waves only
    pub fn stereo_frames(&self) -> Option<&[StereoSample]> {
        match self.layout {
            ChannelLayout::Stereo => Some(bytemuck::cast_slice(&self.samples)),
            ChannelLayout::Mono => None,
        }
    }

    /// Swap in a fully built replacement buffer, dropping the old one
    ///
    /// The caller guarantees `samples.len()` is a multiple of `layout.count()`.
    pub(crate) fn replace_buffer(&mut self, samples: Vec<Sample>, layout: ChannelLayout) {
        debug_assert_eq!(samples.len() % layout.count(), 0);
        self.samples = samples;
        self.layout = layout;
    }
}

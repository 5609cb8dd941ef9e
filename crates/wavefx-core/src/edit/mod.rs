//! Waveform editing engine
//!
//! Destructive editing of a [`Wave`]'s interleaved buffer. Operations fall in
//! two groups with different costs:
//!
//! - In place, O(range), never allocate: [`WaveEditor::silence`],
//!   [`WaveEditor::fade`], [`WaveEditor::smooth`], [`WaveEditor::apply_gain`]
//! - Reallocating, O(buffer): [`WaveEditor::cut`], [`WaveEditor::trim`],
//!   [`WaveEditor::mono_to_stereo`]
//!
//! Reallocating operations build the complete replacement buffer before
//! touching the wave, so a failed allocation leaves the wave unchanged.
//! All ranges are frame indices; conversion to sample indices uses the
//! wave's own channel count.
//!
//! # Example
//!
//! ```
//! use wavefx_core::edit::{FrameRange, WaveEditor};
//! use wavefx_core::Wave;
//!
//! let samples = vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0];
//! let mut wave = Wave::from_interleaved(samples, 2, 44100).unwrap();
//! WaveEditor::new().cut(&mut wave, FrameRange::new(1, 3)).unwrap();
//! assert_eq!(wave.samples(), &[1.0, 1.0, 4.0, 4.0]);
//! assert!(wave.is_edited());
//! ```

mod alloc;
mod diagnostics;
mod error;
mod range;

pub use alloc::{SampleAllocator, SystemAllocator};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, Severity};
pub use error::{EditError, EditResult};
pub use range::FrameRange;

use crate::config::EditConfig;
use crate::types::{ChannelLayout, Sample, StereoSample};
use crate::wave::Wave;

/// Default width in frames of each edge fade applied by `smooth`
pub const DEFAULT_SMOOTH_EDGE_FRAMES: usize = 32;

/// Direction of a linear fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeKind {
    /// Gain ramps 0.0 → 1.0
    In,
    /// Gain ramps 1.0 → 0.0
    Out,
}

/// Stateless set of editing operations
///
/// Holds only its collaborators: where diagnostics go, where replacement
/// buffers come from, and the smoothing edge width.
pub struct WaveEditor {
    sink: Box<dyn DiagnosticSink>,
    allocator: Box<dyn SampleAllocator>,
    smooth_edge_frames: usize,
}

impl Default for WaveEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveEditor {
    /// Editor logging through `log` and allocating from the global heap
    pub fn new() -> Self {
        Self {
            sink: Box::new(LogSink),
            allocator: Box::new(SystemAllocator),
            smooth_edge_frames: DEFAULT_SMOOTH_EDGE_FRAMES,
        }
    }

    pub fn from_config(config: &EditConfig) -> Self {
        Self::new().with_smooth_edge_frames(config.smooth_edge_frames)
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_allocator(mut self, allocator: impl SampleAllocator + 'static) -> Self {
        self.allocator = Box::new(allocator);
        self
    }

    pub fn with_smooth_edge_frames(mut self, frames: usize) -> Self {
        self.smooth_edge_frames = frames;
        self
    }

    pub fn smooth_edge_frames(&self) -> usize {
        self.smooth_edge_frames
    }

    fn report(&self, diagnostic: Diagnostic) {
        self.sink.report(diagnostic);
    }

    fn allocate(&self, len: usize, purpose: &str) -> EditResult<Vec<Sample>> {
        self.allocator.allocate(len).inspect_err(|_| {
            self.report(Diagnostic::error(format!(
                "unable to allocate memory for {} ({} samples)",
                purpose, len
            )));
        })
    }

    // ------------------------------------------------------------------
    // Gain
    // ------------------------------------------------------------------

    /// Gain that brings the peak absolute amplitude to unity
    ///
    /// Returns 1.0 for silence (nothing to amplify) and for buffers already
    /// peaking above 1.0 (never attenuate).
    pub fn normalize_gain(&self, wave: &Wave) -> f32 {
        let peak = match wave.stereo_frames() {
            Some(frames) => frames.iter().map(StereoSample::peak).fold(0.0, Sample::max),
            None => wave.samples().iter().map(|s| s.abs()).fold(0.0, Sample::max),
        };

        if peak == 0.0 || peak > 1.0 {
            return 1.0;
        }
        1.0 / peak
    }

    /// Multiply every sample by `gain`
    ///
    /// Unity gain is a no-op and does not mark the wave as edited.
    pub fn apply_gain(&self, wave: &mut Wave, gain: f32) {
        if gain == 1.0 {
            return;
        }
        for sample in wave.samples_mut() {
            *sample *= gain;
        }
        wave.set_edited(true);
    }

    /// Compute and apply the normalization gain, returning the gain used
    pub fn normalize(&self, wave: &mut Wave) -> f32 {
        let gain = self.normalize_gain(wave);
        self.report(Diagnostic::info(format!("normalizing with gain {:.4}", gain)));
        self.apply_gain(wave, gain);
        gain
    }

    // ------------------------------------------------------------------
    // Reallocating operations
    // ------------------------------------------------------------------

    /// Duplicate every mono sample into both channels of a new stereo buffer
    ///
    /// Changes the channel layout only; the edited flag is left as is.
    /// A wave that is already stereo is left untouched.
    pub fn mono_to_stereo(&self, wave: &mut Wave) -> EditResult<()> {
        if wave.layout() == ChannelLayout::Stereo {
            self.report(Diagnostic::info("wave is already stereo, nothing to do"));
            return Ok(());
        }

        // Saturates so an impossible size fails inside the allocator
        let new_len = wave.total_samples().saturating_mul(2);
        let mut stereo = self.allocate(new_len, "mono>stereo conversion")?;
        stereo.resize(new_len, 0.0);

        let frames: &mut [StereoSample] = bytemuck::cast_slice_mut(&mut stereo);
        for (frame, &sample) in frames.iter_mut().zip(wave.samples()) {
            *frame = StereoSample::mono(sample);
        }

        wave.replace_buffer(stereo, ChannelLayout::Stereo);
        Ok(())
    }

    /// Remove frames `[start, end)`, joining what lies on either side
    ///
    /// The range is clamped to the wave.
    pub fn cut(&self, wave: &mut Wave, range: FrameRange) -> EditResult<()> {
        let range = range.validated()?.clamped(wave.frames());
        let removed = range.to_samples(wave.channels());
        let new_len = wave.total_samples() - removed.len();

        let mut kept = self.allocate(new_len, "cutting")?;

        self.report(Diagnostic::info(format!(
            "cutting from {} to {}, new size={} ({} frames)",
            removed.start,
            removed.end,
            new_len,
            new_len / wave.channels()
        )));

        kept.extend_from_slice(&wave.samples()[..removed.start]);
        kept.extend_from_slice(&wave.samples()[removed.end..]);

        let layout = wave.layout();
        wave.replace_buffer(kept, layout);
        wave.set_edited(true);
        Ok(())
    }

    /// Keep only frames `[start, end)`
    ///
    /// The range is clamped to the wave.
    pub fn trim(&self, wave: &mut Wave, range: FrameRange) -> EditResult<()> {
        let range = range.validated()?.clamped(wave.frames());
        let kept_range = range.to_samples(wave.channels());

        let mut kept = self.allocate(kept_range.len(), "trimming")?;

        self.report(Diagnostic::info(format!(
            "trimming from {} to {} (area = {})",
            kept_range.start,
            kept_range.end,
            kept_range.len()
        )));

        kept.extend_from_slice(&wave.samples()[kept_range]);

        let layout = wave.layout();
        wave.replace_buffer(kept, layout);
        wave.set_edited(true);
        Ok(())
    }

    // ------------------------------------------------------------------
    // In-place operations
    // ------------------------------------------------------------------

    /// Zero every sample of frames `[start, end)`
    pub fn silence(&self, wave: &mut Wave, range: FrameRange) -> EditResult<()> {
        let range = range.validated()?.within(wave.frames())?;
        let samples = range.to_samples(wave.channels());

        self.report(Diagnostic::info(format!(
            "silencing from {} to {}",
            samples.start, samples.end
        )));

        wave.samples_mut()[samples].fill(0.0);
        wave.set_edited(true);
        Ok(())
    }

    /// Apply a linear gain ramp across frames `[start, end)`
    ///
    /// The gain starts at 0.0 (in) or 1.0 (out) on the first frame and moves
    /// by `1 / len` per frame, so the last frame of a fade-in is scaled by
    /// `1 - 1/len`.
    pub fn fade(&self, wave: &mut Wave, range: FrameRange, kind: FadeKind) -> EditResult<()> {
        let range = range.validated()?.within(wave.frames())?;
        if range.is_empty() {
            return Err(EditError::EmptyRange);
        }

        let step = 1.0 / range.len() as f32;
        let (mut gain, step) = match kind {
            FadeKind::In => (0.0_f32, step),
            FadeKind::Out => (1.0_f32, -step),
        };

        let channels = wave.channels();
        let samples = range.to_samples(channels);
        for frame in wave.samples_mut()[samples].chunks_exact_mut(channels) {
            for sample in frame {
                *sample *= gain;
            }
            gain += step;
        }

        wave.set_edited(true);
        Ok(())
    }

    /// Fade in the first and fade out the last edge frames of a selection
    ///
    /// Suppresses clicks at freshly cut boundaries. Selections narrower than
    /// both edges together are left untouched.
    pub fn smooth(&self, wave: &mut Wave, range: FrameRange) -> EditResult<()> {
        let range = range.validated()?.within(wave.frames())?;
        let edge = self.smooth_edge_frames;

        if edge == 0 {
            return Ok(());
        }
        if edge > range.len() / 2 {
            self.report(Diagnostic::warning("selection is too small, nothing to do"));
            return Ok(());
        }

        self.fade(wave, FrameRange::new(range.start, range.start + edge), FadeKind::In)?;
        self.fade(wave, FrameRange::new(range.end - edge, range.end), FadeKind::Out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FailingAllocator;

    impl SampleAllocator for FailingAllocator {
        fn allocate(&self, len: usize) -> EditResult<Vec<Sample>> {
            Err(EditError::Allocation { requested: len })
        }
    }

    fn stereo(interleaved: &[f32]) -> Wave {
        Wave::from_interleaved(interleaved.to_vec(), 2, 44100).unwrap()
    }

    fn constant_stereo(frames: usize, value: f32) -> Wave {
        stereo(&vec![value; frames * 2])
    }

    fn recording_editor() -> (WaveEditor, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (WaveEditor::new().with_sink(sink.clone()), sink)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_normalize_gain_silence_is_unity() {
        let editor = WaveEditor::new();
        assert_eq!(editor.normalize_gain(&Wave::mono(vec![0.0; 16])), 1.0);
        assert_eq!(editor.normalize_gain(&Wave::mono(Vec::new())), 1.0);
    }

    #[test]
    fn test_normalize_gain_reaches_unity_peak() {
        let editor = WaveEditor::new();
        let mut wave = stereo(&[0.1, -0.4, 0.25, 0.0]);

        let gain = editor.normalize_gain(&wave);
        assert_close(gain, 2.5);
        assert!(!wave.is_edited());

        assert_close(editor.normalize(&mut wave), 2.5);
        let peak = wave.samples().iter().fold(0.0_f32, |p, s| p.max(s.abs()));
        assert_close(peak, 1.0);
        assert!(wave.is_edited());
    }

    #[test]
    fn test_normalize_gain_never_attenuates() {
        let editor = WaveEditor::new();
        let mut wave = stereo(&[1.5, -0.2, 0.3, 0.3]);
        assert_eq!(editor.normalize_gain(&wave), 1.0);

        editor.normalize(&mut wave);
        assert_eq!(wave.samples(), &[1.5, -0.2, 0.3, 0.3]);
        assert!(!wave.is_edited());
    }

    #[test]
    fn test_mono_to_stereo_duplicates_samples() {
        let editor = WaveEditor::new();
        let mut wave = Wave::mono(vec![0.1, -0.2, 0.3]);

        editor.mono_to_stereo(&mut wave).unwrap();

        assert_eq!(wave.samples(), &[0.1, 0.1, -0.2, -0.2, 0.3, 0.3]);
        assert_eq!(wave.channels(), 2);
        assert_eq!(wave.total_samples(), 6);
        assert_eq!(wave.frames(), 3);
        assert!(!wave.is_edited());
    }

    #[test]
    fn test_mono_to_stereo_on_stereo_is_noop() {
        let (editor, sink) = recording_editor();
        let mut wave = stereo(&[0.1, 0.2]);

        editor.mono_to_stereo(&mut wave).unwrap();

        assert_eq!(wave.samples(), &[0.1, 0.2]);
        assert_eq!(sink.count(Severity::Info), 1);
    }

    #[test]
    fn test_silence_zeroes_range_in_place() {
        let editor = WaveEditor::new();
        let mut wave = stereo(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0]);

        editor.silence(&mut wave, FrameRange::new(1, 3)).unwrap();

        assert_eq!(wave.samples(), &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 4.0, 4.0]);
        assert!(wave.is_edited());
    }

    #[test]
    fn test_silence_mono_uses_single_channel_stride() {
        let editor = WaveEditor::new();
        let mut wave = Wave::mono(vec![1.0, 2.0, 3.0, 4.0]);

        editor.silence(&mut wave, FrameRange::new(1, 2)).unwrap();

        assert_eq!(wave.samples(), &[1.0, 0.0, 3.0, 4.0]);
    }

    #[test]
    fn test_silence_out_of_bounds_is_rejected() {
        let editor = WaveEditor::new();
        let mut wave = constant_stereo(4, 1.0);
        let before = wave.clone();

        let result = editor.silence(&mut wave, FrameRange::new(2, 5));

        assert_eq!(result, Err(EditError::OutOfBounds { end: 5, frames: 4 }));
        assert_eq!(wave, before);
    }

    #[test]
    fn test_cut_removes_range() {
        let editor = WaveEditor::new();
        let mut wave = stereo(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0]);

        editor.cut(&mut wave, FrameRange::new(1, 3)).unwrap();

        assert_eq!(wave.samples(), &[1.0, 1.0, 4.0, 4.0]);
        assert_eq!(wave.total_samples(), 8 - 2 * 2);
        assert!(wave.is_edited());
    }

    #[test]
    fn test_cut_equals_prefix_plus_suffix() {
        let editor = WaveEditor::new();
        let original: Vec<f32> = (0..40).map(|i| i as f32 * 0.01).collect();
        let mut wave = stereo(&original);

        editor.cut(&mut wave, FrameRange::new(5, 12)).unwrap();

        let mut expected = original[..10].to_vec();
        expected.extend_from_slice(&original[24..]);
        assert_eq!(wave.samples(), expected.as_slice());
        assert_eq!(wave.total_samples(), original.len() - 2 * 7);
    }

    #[test]
    fn test_cut_clamps_range_end() {
        let editor = WaveEditor::new();
        let mut wave = stereo(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);

        editor.cut(&mut wave, FrameRange::new(1, 100)).unwrap();

        assert_eq!(wave.samples(), &[1.0, 1.0]);
    }

    #[test]
    fn test_cut_mono() {
        let editor = WaveEditor::new();
        let mut wave = Wave::mono(vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        editor.cut(&mut wave, FrameRange::new(1, 3)).unwrap();

        assert_eq!(wave.samples(), &[1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_cut_inverted_range_is_rejected() {
        let editor = WaveEditor::new();
        let mut wave = constant_stereo(4, 0.5);
        let before = wave.clone();

        assert_eq!(
            editor.cut(&mut wave, FrameRange::new(3, 1)),
            Err(EditError::InvalidRange { start: 3, end: 1 })
        );
        assert_eq!(wave, before);
    }

    #[test]
    fn test_trim_keeps_range() {
        let editor = WaveEditor::new();
        let original: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let mut wave = stereo(&original);

        editor.trim(&mut wave, FrameRange::new(2, 7)).unwrap();

        assert_eq!(wave.samples(), &original[4..14]);
        assert_eq!(wave.frames(), 5);
        assert!(wave.is_edited());
    }

    #[test]
    fn test_trim_clamps_range_end() {
        let editor = WaveEditor::new();
        let mut wave = stereo(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);

        editor.trim(&mut wave, FrameRange::new(1, 10)).unwrap();

        assert_eq!(wave.samples(), &[2.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_allocation_failure_leaves_wave_untouched() {
        let sink = Arc::new(MemorySink::new());
        let editor = WaveEditor::new()
            .with_sink(sink.clone())
            .with_allocator(FailingAllocator);

        let mut wave = stereo(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let before = wave.clone();

        assert!(matches!(
            editor.cut(&mut wave, FrameRange::new(0, 1)),
            Err(EditError::Allocation { .. })
        ));
        assert!(matches!(
            editor.trim(&mut wave, FrameRange::new(0, 1)),
            Err(EditError::Allocation { .. })
        ));
        assert_eq!(wave, before);
        assert!(!wave.is_edited());

        let mut mono = Wave::mono(vec![0.1, 0.2]);
        let mono_before = mono.clone();
        assert_eq!(
            editor.mono_to_stereo(&mut mono),
            Err(EditError::Allocation { requested: 4 })
        );
        assert_eq!(mono, mono_before);
        assert_eq!(mono.channels(), 1);

        assert_eq!(sink.count(Severity::Error), 3);
    }

    #[test]
    fn test_fade_in_ramps_up() {
        let editor = WaveEditor::new();
        let mut wave = constant_stereo(10, 1.0);

        editor.fade(&mut wave, FrameRange::new(2, 6), FadeKind::In).unwrap();

        let frames = wave.stereo_frames().unwrap();
        assert_eq!(frames[0], StereoSample::mono(1.0));
        assert_eq!(frames[1], StereoSample::mono(1.0));
        assert_close(frames[2].left, 0.0);
        assert_close(frames[3].left, 0.25);
        assert_close(frames[4].right, 0.5);
        assert_close(frames[5].left, 1.0 - 1.0 / 4.0);
        assert_eq!(frames[6], StereoSample::mono(1.0));
        for pair in frames[2..6].windows(2) {
            assert!(pair[1].left > pair[0].left);
        }
        assert!(wave.is_edited());
    }

    #[test]
    fn test_fade_out_ramps_down() {
        let editor = WaveEditor::new();
        let mut wave = Wave::mono(vec![1.0; 4]);

        editor.fade(&mut wave, FrameRange::new(0, 4), FadeKind::Out).unwrap();

        let expected = [1.0, 0.75, 0.5, 0.25];
        for (actual, expected) in wave.samples().iter().zip(expected) {
            assert_close(*actual, expected);
        }
    }

    #[test]
    fn test_fade_empty_range_is_rejected() {
        let editor = WaveEditor::new();
        let mut wave = constant_stereo(4, 1.0);

        assert_eq!(
            editor.fade(&mut wave, FrameRange::new(2, 2), FadeKind::In),
            Err(EditError::EmptyRange)
        );
        assert!(!wave.is_edited());
    }

    #[test]
    fn test_smooth_small_selection_is_noop() {
        let (editor, sink) = recording_editor();
        let mut wave = constant_stereo(100, 1.0);
        let before = wave.clone();

        editor.smooth(&mut wave, FrameRange::new(10, 73)).unwrap();

        assert_eq!(wave, before);
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_smooth_matches_explicit_fades() {
        let editor = WaveEditor::new();
        let source: Vec<f32> = (0..400).map(|i| ((i as f32) * 0.05).sin()).collect();

        let mut smoothed = stereo(&source);
        editor.smooth(&mut smoothed, FrameRange::new(50, 150)).unwrap();

        let mut explicit = stereo(&source);
        editor.fade(&mut explicit, FrameRange::new(50, 82), FadeKind::In).unwrap();
        editor.fade(&mut explicit, FrameRange::new(118, 150), FadeKind::Out).unwrap();

        assert_eq!(smoothed, explicit);
        assert_ne!(smoothed.samples(), source.as_slice());
    }

    #[test]
    fn test_smooth_exact_double_edge_width_is_applied() {
        let editor = WaveEditor::new().with_smooth_edge_frames(2);
        let mut wave = Wave::mono(vec![1.0; 4]);

        editor.smooth(&mut wave, FrameRange::new(0, 4)).unwrap();

        let expected = [0.0, 0.5, 1.0, 0.5];
        for (actual, expected) in wave.samples().iter().zip(expected) {
            assert_close(*actual, expected);
        }
    }

    #[test]
    fn test_smooth_huge_edge_width_is_noop() {
        let config: EditConfig =
            serde_yaml::from_str("smooth_edge_frames: 18446744073709551615").unwrap();
        let sink = Arc::new(MemorySink::new());
        let editor = WaveEditor::from_config(&config).with_sink(sink.clone());
        assert_eq!(editor.smooth_edge_frames(), usize::MAX);

        let mut wave = Wave::mono(vec![1.0; 100]);
        let before = wave.clone();
        editor.smooth(&mut wave, FrameRange::new(0, 100)).unwrap();

        assert_eq!(wave, before);
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_smooth_odd_width_uses_both_edges() {
        let editor = WaveEditor::new().with_smooth_edge_frames(2);
        let mut wave = Wave::mono(vec![1.0; 5]);

        editor.smooth(&mut wave, FrameRange::new(0, 5)).unwrap();

        let expected = [0.0, 0.5, 1.0, 1.0, 0.5];
        for (actual, expected) in wave.samples().iter().zip(expected) {
            assert_close(*actual, expected);
        }
    }

    #[test]
    fn test_smooth_past_end_leaves_wave_untouched() {
        let editor = WaveEditor::new();
        let mut wave = constant_stereo(100, 1.0);
        let before = wave.clone();

        let result = editor.smooth(&mut wave, FrameRange::new(0, 101));

        assert_eq!(result, Err(EditError::OutOfBounds { end: 101, frames: 100 }));
        assert_eq!(wave, before);
        assert!(!wave.is_edited());
    }

    #[test]
    fn test_unsatisfiable_allocation_is_reported() {
        let (editor, sink) = recording_editor();

        let result = editor.allocate(usize::MAX, "mono>stereo conversion");

        assert_eq!(result, Err(EditError::Allocation { requested: usize::MAX }));
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, Severity::Error);
        assert!(events[0].message.contains("mono>stereo conversion"));
    }

    #[test]
    fn test_normalize_gain_mono_and_stereo_agree() {
        let editor = WaveEditor::new();
        let samples = vec![0.2, -0.8, 0.5, 0.1];

        let mono = Wave::mono(samples.clone());
        let stereo = stereo(&samples);

        assert_close(editor.normalize_gain(&mono), 1.25);
        assert_close(editor.normalize_gain(&stereo), 1.25);
    }

    #[test]
    fn test_from_config_uses_edge_width() {
        let config = EditConfig {
            smooth_edge_frames: 8,
            ..EditConfig::default()
        };
        assert_eq!(WaveEditor::from_config(&config).smooth_edge_frames(), 8);
    }
}

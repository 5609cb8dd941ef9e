//! Edit commands accepted on the command line

use anyhow::Result;
use clap::Subcommand;
use wavefx_core::{FadeKind, FrameRange, Wave, WaveEditor};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Scale the wave so its peak reaches 0 dBFS (never attenuates)
    Normalize,

    /// Duplicate a mono wave into both stereo channels
    MonoToStereo,

    /// Zero frames [START, END)
    Silence { start: usize, end: usize },

    /// Remove frames [START, END) and join the remaining audio
    Cut { start: usize, end: usize },

    /// Keep only frames [START, END)
    Trim { start: usize, end: usize },

    /// Linear fade-in across frames [START, END)
    FadeIn { start: usize, end: usize },

    /// Linear fade-out across frames [START, END)
    FadeOut { start: usize, end: usize },

    /// Short fade-in/fade-out at both edges of frames [START, END)
    Smooth { start: usize, end: usize },
}

/// Run one command against a loaded wave
pub fn apply(editor: &WaveEditor, wave: &mut Wave, command: &EditCommand) -> Result<()> {
    match *command {
        EditCommand::Normalize => {
            let gain = editor.normalize(wave);
            log::info!("normalize: applied gain {:.4}", gain);
        }
        EditCommand::MonoToStereo => editor.mono_to_stereo(wave)?,
        EditCommand::Silence { start, end } => editor.silence(wave, FrameRange::new(start, end))?,
        EditCommand::Cut { start, end } => editor.cut(wave, FrameRange::new(start, end))?,
        EditCommand::Trim { start, end } => editor.trim(wave, FrameRange::new(start, end))?,
        EditCommand::FadeIn { start, end } => {
            editor.fade(wave, FrameRange::new(start, end), FadeKind::In)?
        }
        EditCommand::FadeOut { start, end } => {
            editor.fade(wave, FrameRange::new(start, end), FadeKind::Out)?
        }
        EditCommand::Smooth { start, end } => editor.smooth(wave, FrameRange::new(start, end))?,
    }
    Ok(())
}

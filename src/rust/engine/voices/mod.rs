//! Voice templates - each voice turns semantic knobs into one Csound instrument
pub mod kick;
pub mod subtractive;
pub mod tone;

pub use kick::KickVoice;
pub use subtractive::{ReleaseTail, SubtractiveVoice};
pub use tone::ToneVoice;

use crate::engine::csound::{CsdDocument, Instrument};

/// Number given to the single instrument of every generated script.
pub const INSTRUMENT_NUMBER: u32 = 1;

/// Trait for voice template behavior
pub trait Voice {
    /// Get the name of this voice
    fn name(&self) -> &'static str;

    /// Build the instrument definition with mapped parameters interpolated
    fn instrument(&self) -> Instrument;

    /// Length of the single score event, in seconds
    fn score_duration(&self) -> f64;

    fn document(&self) -> CsdDocument {
        CsdDocument::new(self.instrument(), self.score_duration())
    }

    /// Complete `.csd` text for this voice
    fn script(&self) -> String {
        self.document().render()
    }
}

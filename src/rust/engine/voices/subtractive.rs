//! Subtractive voice - sawtooth through a Moog ladder with its own filter sweep
//! Characteristics:
//! - madsr amplitude envelope from four 0-255 knobs
//! - band-limited saw (vco2 mode 0)
//! - cutoff sweeps from 3x down to the requested value over attack + decay
//! - 0.5 master headroom
use super::{INSTRUMENT_NUMBER, Voice};
use crate::engine::csound::Instrument;
use crate::engine::mapping::{EnvelopeParams, MappedEnvelope, format_number};

pub const FILTER_RESONANCE: f64 = 0.4;
pub const FILTER_SWEEP_RATIO: f64 = 3.0;
pub const HEADROOM: f64 = 0.5;

/// How the score event treats the release stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseTail {
    /// Note length is exactly the requested duration; madsr stretches the
    /// note past its end to play the release.
    #[default]
    Truncate,
    /// Note length is the requested duration plus the mapped release time.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubtractiveVoice {
    pub pitch: f64,
    pub duration: f64,
    pub cutoff_hz: f64,
    pub envelope: EnvelopeParams,
    pub release_tail: ReleaseTail,
}

impl SubtractiveVoice {
    pub fn new(pitch: f64, duration: f64, cutoff_hz: f64, envelope: EnvelopeParams) -> Self {
        Self {
            pitch,
            duration,
            cutoff_hz,
            envelope,
            release_tail: ReleaseTail::default(),
        }
    }

    pub fn with_release_tail(mut self, release_tail: ReleaseTail) -> Self {
        self.release_tail = release_tail;
        self
    }

    pub fn mapped_envelope(&self) -> MappedEnvelope {
        self.envelope.mapped()
    }
}

impl Voice for SubtractiveVoice {
    fn name(&self) -> &'static str {
        "subtractive"
    }

    fn instrument(&self) -> Instrument {
        let env = self.mapped_envelope();
        let att = format_number(env.attack_secs);
        let dec = format_number(env.decay_secs);
        let cutoff = format_number(self.cutoff_hz);

        Instrument::new(INSTRUMENT_NUMBER)
            .comment("amplitude envelope, madsr extends the note for its release")
            .line(format!(
                "kamp madsr {}, {}, {}, {}",
                att,
                dec,
                format_number(env.sustain_level),
                format_number(env.release_secs)
            ))
            .blank()
            .comment("band-limited sawtooth")
            .line(format!("asig vco2 1.0, {}, 0", format_number(self.pitch)))
            .blank()
            .comment("moog ladder lowpass with a decaying cutoff sweep")
            .line(format!(
                "kfilt_env expseg {}*{}, {}+{}, {}",
                cutoff, FILTER_SWEEP_RATIO, att, dec, cutoff
            ))
            .line(format!("afil moogladder asig, kfilt_env, {}", FILTER_RESONANCE))
            .blank()
            .line(format!("out (afil * kamp) * {}", HEADROOM))
    }

    fn score_duration(&self) -> f64 {
        match self.release_tail {
            ReleaseTail::Truncate => self.duration,
            ReleaseTail::Extend => self.duration + self.mapped_envelope().release_secs,
        }
    }
}

#[cfg(test)]
#[path = "test_subtractive.rs"]
mod tests;

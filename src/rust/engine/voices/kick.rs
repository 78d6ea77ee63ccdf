//! Kick drum - sine with exponential pitch drop, tanh drive and no release stage
use super::{INSTRUMENT_NUMBER, Voice};
use crate::engine::csound::Instrument;
use crate::engine::mapping::{KickParams, MappedKick, format_number};

/// Level the amplitude envelope decays to (expseg cannot reach zero).
pub const DECAY_FLOOR: f64 = 0.001;
pub const HEADROOM: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickVoice {
    pub fundamental_hz: f64,
    pub params: KickParams,
}

impl KickVoice {
    pub fn new(fundamental_hz: f64, params: KickParams) -> Self {
        Self {
            fundamental_hz,
            params,
        }
    }

    pub fn mapped(&self) -> MappedKick {
        self.params.mapped(self.fundamental_hz)
    }
}

impl Voice for KickVoice {
    fn name(&self) -> &'static str {
        "kick"
    }

    fn instrument(&self) -> Instrument {
        let kick = self.mapped();
        let dec = format_number(kick.decay_secs);
        let fundamental = format_number(self.fundamental_hz);

        Instrument::new(INSTRUMENT_NUMBER)
            .comment("amplitude, exponential decay")
            .line(format!("kamp expseg 1.0, {}, {}", dec, DECAY_FLOOR))
            .blank()
            .comment("pitch drop from the click down to the fundamental")
            .line(format!(
                "kpitch expseg {}, {}, {}, {}, {}",
                format_number(kick.pitch_start_hz),
                format_number(kick.drop_secs),
                fundamental,
                dec,
                fundamental
            ))
            .blank()
            .line("asig poscil kamp, kpitch")
            .blank()
            .comment("tanh soft clipping")
            .line(format!("asig = tanh(asig * {})", format_number(kick.drive_mult)))
            .blank()
            .line(format!("out asig * {}", HEADROOM))
    }

    fn score_duration(&self) -> f64 {
        self.mapped().decay_secs
    }
}

#[cfg(test)]
#[path = "test_kick.rs"]
mod tests;

//! Plain tone - a single sine oscillator at fixed amplitude
use super::{INSTRUMENT_NUMBER, Voice};
use crate::engine::csound::Instrument;
use crate::engine::mapping::format_number;

pub const TONE_AMPLITUDE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneVoice {
    pub pitch: f64,
    pub duration: f64,
}

impl ToneVoice {
    pub fn new(pitch: f64, duration: f64) -> Self {
        Self { pitch, duration }
    }
}

impl Voice for ToneVoice {
    fn name(&self) -> &'static str {
        "tone"
    }

    fn instrument(&self) -> Instrument {
        Instrument::new(INSTRUMENT_NUMBER)
            .line(format!(
                "a1 poscil {}, {}",
                TONE_AMPLITUDE,
                format_number(self.pitch)
            ))
            .line("out a1")
    }

    fn score_duration(&self) -> f64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a440_tone_script() {
        let script = ToneVoice::new(440.0, 1.0).script();

        assert!(script.contains("a1 poscil 0.5, 440.0"));
        assert!(script.contains("\ni 1 0 1.0\n"));
        assert_eq!(script.lines().filter(|l| l.starts_with("instr ")).count(), 1);
        assert_eq!(script.lines().filter(|l| l.starts_with("i ")).count(), 1);
    }

    #[test]
    fn test_unvalidated_inputs_pass_through() {
        let script = ToneVoice::new(-10.0, 0.0).script();
        assert!(script.contains("a1 poscil 0.5, -10.0"));
        assert!(script.contains("i 1 0 0.0"));
    }
}

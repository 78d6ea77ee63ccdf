//! Control value mapping - turns 0-255 knob values into Csound units
//! Every bounded knob goes through `clamp_control` first, then `map_linear`.

/// Upper bound of a control knob.
pub const CONTROL_MAX: u8 = u8::MAX;

/// Saturate a caller-supplied knob into `0..=255`.
pub fn clamp_control(raw: i64) -> u8 {
    raw.clamp(0, CONTROL_MAX as i64) as u8
}

/// Linearly rescale a knob into `[min, max]`.
///
/// `min` may be larger than `max`, in which case the mapping runs downwards
/// (used by the kick punch drop time).
pub fn map_linear(value: u8, min: f64, max: f64) -> f64 {
    if value == CONTROL_MAX {
        return max;
    }
    min + (max - min) * (value as f64 / CONTROL_MAX as f64)
}

/// Format a number for embedding in a Csound script.
///
/// Integral values keep a trailing `.0` (`440.0`), everything else uses the
/// shortest round-trip decimal. Non-finite values are written as-is and left
/// for the engine to reject.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Raw ADSR knobs, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvelopeParams {
    pub attack: u8,
    pub decay: u8,
    pub sustain: u8,
    pub release: u8,
}

/// ADSR in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedEnvelope {
    pub attack_secs: f64,
    pub decay_secs: f64,
    pub sustain_level: f64,
    pub release_secs: f64,
}

impl EnvelopeParams {
    pub const ATTACK_RANGE: (f64, f64) = (0.001, 2.0);
    pub const DECAY_RANGE: (f64, f64) = (0.001, 2.0);
    pub const SUSTAIN_RANGE: (f64, f64) = (0.0, 1.0);
    pub const RELEASE_RANGE: (f64, f64) = (0.001, 5.0);

    pub fn from_raw(attack: i64, decay: i64, sustain: i64, release: i64) -> Self {
        Self {
            attack: clamp_control(attack),
            decay: clamp_control(decay),
            sustain: clamp_control(sustain),
            release: clamp_control(release),
        }
    }

    pub fn mapped(&self) -> MappedEnvelope {
        let (a_min, a_max) = Self::ATTACK_RANGE;
        let (d_min, d_max) = Self::DECAY_RANGE;
        let (s_min, s_max) = Self::SUSTAIN_RANGE;
        let (r_min, r_max) = Self::RELEASE_RANGE;
        MappedEnvelope {
            attack_secs: map_linear(self.attack, a_min, a_max),
            decay_secs: map_linear(self.decay, d_min, d_max),
            sustain_level: map_linear(self.sustain, s_min, s_max),
            release_secs: map_linear(self.release, r_min, r_max),
        }
    }
}

/// Raw kick drum knobs, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KickParams {
    pub punch: u8,
    pub decay: u8,
    pub drive: u8,
}

/// Kick drum parameters in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedKick {
    pub decay_secs: f64,
    pub pitch_start_hz: f64,
    pub drop_secs: f64,
    pub drive_mult: f64,
}

impl KickParams {
    pub const DECAY_RANGE: (f64, f64) = (0.1, 3.0);
    pub const PUNCH_OFFSET_RANGE: (f64, f64) = (100.0, 3000.0);
    // Inverted: more punch means a faster drop.
    pub const DROP_RANGE: (f64, f64) = (0.1, 0.01);
    pub const DRIVE_RANGE: (f64, f64) = (1.0, 20.0);

    pub fn from_raw(punch: i64, decay: i64, drive: i64) -> Self {
        Self {
            punch: clamp_control(punch),
            decay: clamp_control(decay),
            drive: clamp_control(drive),
        }
    }

    pub fn mapped(&self, fundamental_hz: f64) -> MappedKick {
        let (dec_min, dec_max) = Self::DECAY_RANGE;
        let (off_min, off_max) = Self::PUNCH_OFFSET_RANGE;
        let (drop_min, drop_max) = Self::DROP_RANGE;
        let (drv_min, drv_max) = Self::DRIVE_RANGE;
        MappedKick {
            decay_secs: map_linear(self.decay, dec_min, dec_max),
            pitch_start_hz: fundamental_hz + map_linear(self.punch, off_min, off_max),
            drop_secs: map_linear(self.punch, drop_min, drop_max),
            drive_mult: map_linear(self.drive, drv_min, drv_max),
        }
    }
}

#[cfg(test)]
#[path = "test_mapping.rs"]
mod tests;

use super::*;

#[test]
fn test_map_linear_endpoints() {
    for (min, max) in [(0.001, 2.0), (0.0, 1.0), (0.001, 5.0), (100.0, 3000.0), (0.1, 0.01)] {
        assert_eq!(map_linear(0, min, max), min);
        assert_eq!(map_linear(255, min, max), max);
    }
}

#[test]
fn test_map_linear_monotonic() {
    let mut previous = map_linear(0, 0.001, 5.0);
    for v in 1..=255u8 {
        let current = map_linear(v, 0.001, 5.0);
        assert!(current >= previous, "not monotonic at {}", v);
        previous = current;
    }
}

#[test]
fn test_map_linear_midpoint() {
    let mid = map_linear(51, 0.0, 1.0);
    assert!((mid - 0.2).abs() < 1e-12);
}

#[test]
fn test_clamp_control_saturates() {
    assert_eq!(clamp_control(-1), 0);
    assert_eq!(clamp_control(i64::MIN), 0);
    assert_eq!(clamp_control(0), 0);
    assert_eq!(clamp_control(128), 128);
    assert_eq!(clamp_control(255), 255);
    assert_eq!(clamp_control(256), 255);
    assert_eq!(clamp_control(i64::MAX), 255);
}

#[test]
fn test_zero_envelope_is_instant_pluck() {
    let env = EnvelopeParams::from_raw(0, 0, 0, 0).mapped();
    assert!((env.attack_secs - 0.001).abs() < 1e-12);
    assert_eq!(env.sustain_level, 0.0);
    assert!((env.release_secs - 0.001).abs() < 1e-12);
}

#[test]
fn test_envelope_clamps_out_of_range() {
    let params = EnvelopeParams::from_raw(-40, 999, 300, -1);
    assert_eq!(
        params,
        EnvelopeParams {
            attack: 0,
            decay: 255,
            sustain: 255,
            release: 0,
        }
    );
    let env = params.mapped();
    assert_eq!(env.decay_secs, 2.0);
    assert_eq!(env.sustain_level, 1.0);
}

#[test]
fn test_full_punch_is_inverted() {
    let kick = KickParams::from_raw(255, 0, 0).mapped(50.0);
    assert_eq!(kick.drop_secs, 0.01);
    assert_eq!(kick.pitch_start_hz, 50.0 + 3000.0);

    let soft = KickParams::from_raw(0, 0, 0).mapped(50.0);
    assert_eq!(soft.drop_secs, 0.1);
    assert_eq!(soft.pitch_start_hz, 150.0);
    assert!(soft.drop_secs > kick.drop_secs);
}

#[test]
fn test_kick_decay_and_drive_ranges() {
    let min = KickParams::from_raw(0, 0, 0).mapped(45.0);
    assert_eq!(min.decay_secs, 0.1);
    assert_eq!(min.drive_mult, 1.0);

    let max = KickParams::from_raw(0, 1000, 1000).mapped(45.0);
    assert_eq!(max.decay_secs, 3.0);
    assert_eq!(max.drive_mult, 20.0);
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(440.0), "440.0");
    assert_eq!(format_number(1.0), "1.0");
    assert_eq!(format_number(0.001), "0.001");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(-2.0), "-2.0");
}

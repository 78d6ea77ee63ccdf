use super::*;

fn house_kick() -> KickVoice {
    KickVoice::new(55.0, KickParams::from_raw(150, 80, 50))
}

#[test]
fn test_kick_script_structure() {
    let script = house_kick().script();

    assert_eq!(script.lines().filter(|l| l.starts_with("instr 1")).count(), 1);
    let events: Vec<&str> = script.lines().filter(|l| l.starts_with("i ")).collect();
    assert_eq!(events.len(), 1);
    assert!(events[0].starts_with("i 1 0 "));
}

#[test]
fn test_score_length_equals_decay() {
    let voice = KickVoice::new(45.0, KickParams::from_raw(20, 255, 10));

    assert_eq!(voice.score_duration(), 3.0);
    assert!(voice.script().contains("\ni 1 0 3.0\n"));
    assert!(voice.script().contains("kamp expseg 1.0, 3.0, 0.001"));
}

#[test]
fn test_full_punch_pitch_envelope() {
    let voice = KickVoice::new(50.0, KickParams::from_raw(255, 0, 0));
    let mapped = voice.mapped();

    assert_eq!(mapped.drop_secs, 0.01);
    assert_eq!(mapped.pitch_start_hz, 3050.0);
    assert!(voice.script().contains("kpitch expseg 3050.0, 0.01, 50.0, 0.1, 50.0"));
}

#[test]
fn test_drive_and_headroom() {
    let voice = KickVoice::new(50.0, KickParams::from_raw(200, 150, 255));
    let script = voice.script();

    assert!(script.contains("asig poscil kamp, kpitch"));
    assert!(script.contains("asig = tanh(asig * 20.0)"));
    assert!(script.contains("out asig * 0.8"));
}

#[test]
fn test_negative_knobs_clamp_to_zero() {
    let voice = KickVoice::new(60.0, KickParams::from_raw(-1, -1, -1));

    assert_eq!(voice.params, KickParams::default());
    assert!(voice.script().contains("asig = tanh(asig * 1.0)"));
}

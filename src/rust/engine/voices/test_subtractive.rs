use super::*;

fn bass() -> SubtractiveVoice {
    SubtractiveVoice::new(55.0, 1.0, 400.0, EnvelopeParams::from_raw(5, 80, 0, 50))
}

#[test]
fn test_script_structure() {
    let script = bass().script();

    assert_eq!(script.lines().filter(|l| l.starts_with("instr ")).count(), 1);
    assert_eq!(script.lines().filter(|l| *l == "endin").count(), 1);
    let events: Vec<&str> = script.lines().filter(|l| l.starts_with("i ")).collect();
    assert_eq!(events, vec!["i 1 0 1.0"]);
}

#[test]
fn test_opcode_chain() {
    let script = bass().script();

    assert!(script.contains("kamp madsr "));
    assert!(script.contains("asig vco2 1.0, 55.0, 0"));
    assert!(script.contains("kfilt_env expseg 400.0*3, "));
    assert!(script.contains("afil moogladder asig, kfilt_env, 0.4"));
    assert!(script.contains("out (afil * kamp) * 0.5"));
}

#[test]
fn test_instant_pluck_envelope() {
    let voice = SubtractiveVoice::new(110.0, 0.5, 800.0, EnvelopeParams::from_raw(0, 40, 0, 0));
    let env = voice.mapped_envelope();

    assert!((env.attack_secs - 0.001).abs() < 1e-12);
    assert_eq!(env.sustain_level, 0.0);
    assert!((env.release_secs - 0.001).abs() < 1e-12);
    assert!(voice.script().contains("kamp madsr 0.001, "));
}

#[test]
fn test_out_of_range_knobs_are_clamped() {
    let voice = SubtractiveVoice::new(440.0, 1.0, 3000.0, EnvelopeParams::from_raw(-5, 300, 1000, 255));
    let script = voice.script();

    assert!(script.contains("kamp madsr 0.001, 2.0, 1.0, 5.0"));
}

#[test]
fn test_truncated_release_is_default() {
    let voice = SubtractiveVoice::new(440.0, 2.0, 1000.0, EnvelopeParams::from_raw(0, 0, 255, 255));

    assert_eq!(voice.release_tail, ReleaseTail::Truncate);
    assert_eq!(voice.score_duration(), 2.0);
}

#[test]
fn test_extended_release_tail() {
    let voice = SubtractiveVoice::new(440.0, 2.0, 1000.0, EnvelopeParams::from_raw(0, 0, 255, 255))
        .with_release_tail(ReleaseTail::Extend);

    assert_eq!(voice.score_duration(), 7.0);
    assert!(voice.script().contains("\ni 1 0 7.0\n"));
}

#[test]
fn test_script_is_deterministic() {
    assert_eq!(bass().script(), bass().script());
}

use super::*;

fn sample_document() -> CsdDocument {
    let instrument = Instrument::new(1)
        .comment("test")
        .line("a1 poscil 0.5, 440")
        .blank()
        .line("out a1");
    CsdDocument::new(instrument, 1.5)
}

#[test]
fn test_header_is_fixed() {
    let text = sample_document().render();
    assert!(text.starts_with("<CsoundSynthesizer>\n<CsOptions>\n</CsOptions>\n"));
    assert!(text.contains("sr = 44100\n"));
    assert!(text.contains("ksmps = 32\n"));
    assert!(text.contains("nchnls = 1\n"));
    assert!(text.contains("0dbfs = 1\n"));
    assert!(text.ends_with("</CsoundSynthesizer>"));
}

#[test]
fn test_instrument_block_layout() {
    let text = sample_document().render();
    assert!(text.contains("instr 1\n    ; test\n    a1 poscil 0.5, 440\n\n    out a1\nendin\n"));
}

#[test]
fn test_score_references_instrument() {
    let instrument = Instrument::new(7).line("out 0");
    let text = CsdDocument::new(instrument, 2.0).render();
    assert!(text.contains("instr 7\n"));
    assert!(text.contains("<CsScore>\ni 7 0 2.0\n</CsScore>"));
}

#[test]
fn test_note_event_render() {
    assert_eq!(NoteEvent::new(1, 0.25).render(), "i 1 0 0.25");
    let delayed = NoteEvent {
        instrument: 2,
        start: 0.5,
        duration: 3.0,
    };
    assert_eq!(delayed.render(), "i 2 0.5 3.0");
}

#[test]
fn test_render_is_deterministic() {
    assert_eq!(sample_document().render(), sample_document().render());
}

//! Csound `.csd` document model
//!
//! A document is one orchestra header, one instrument and one score event.
//! Rendering is pure string assembly; the same document always produces the
//! same bytes.

use std::fmt::Write;

use crate::engine::mapping::format_number;

pub const SAMPLE_RATE: u32 = 44_100;
pub const KSMPS: u32 = 32;
pub const CHANNELS: u32 = 1;
pub const ZERO_DBFS: f64 = 1.0;

/// File extension Csound expects for unified orchestra/score files.
pub const SCRIPT_EXTENSION: &str = "csd";

const INDENT: &str = "    ";

/// Global orchestra settings. Fixed for every voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestraHeader {
    pub sample_rate: u32,
    pub ksmps: u32,
    pub channels: u32,
    pub zero_dbfs: f64,
}

impl Default for OrchestraHeader {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            ksmps: KSMPS,
            channels: CHANNELS,
            zero_dbfs: ZERO_DBFS,
        }
    }
}

/// A numbered instrument and its opcode lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub number: u32,
    lines: Vec<String>,
}

impl Instrument {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, code: impl Into<String>) -> Self {
        self.lines.push(code.into());
        self
    }

    pub fn comment(self, text: impl AsRef<str>) -> Self {
        let line = format!("; {}", text.as_ref());
        self.line(line)
    }

    /// Separator between opcode groups.
    pub fn blank(self) -> Self {
        self.line("")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// `i <instr> <start> <duration>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub instrument: u32,
    pub start: f64,
    pub duration: f64,
}

impl NoteEvent {
    pub fn new(instrument: u32, duration: f64) -> Self {
        Self {
            instrument,
            start: 0.0,
            duration,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "i {} {} {}",
            self.instrument,
            // Csound scores conventionally write the start as a bare integer.
            if self.start == 0.0 {
                "0".to_string()
            } else {
                format_number(self.start)
            },
            format_number(self.duration)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsdDocument {
    pub header: OrchestraHeader,
    pub instrument: Instrument,
    pub score: NoteEvent,
}

impl CsdDocument {
    /// Build a document whose single note plays `instrument` for `duration` seconds.
    pub fn new(instrument: Instrument, duration: f64) -> Self {
        let score = NoteEvent::new(instrument.number, duration);
        Self {
            header: OrchestraHeader::default(),
            instrument,
            score,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<CsoundSynthesizer>\n");
        out.push_str("<CsOptions>\n");
        out.push_str("</CsOptions>\n");
        out.push_str("<CsInstruments>\n");

        // Writing into a String cannot fail.
        let _ = writeln!(out, "sr = {}", self.header.sample_rate);
        let _ = writeln!(out, "ksmps = {}", self.header.ksmps);
        let _ = writeln!(out, "nchnls = {}", self.header.channels);
        let _ = writeln!(out, "0dbfs = {}", self.header.zero_dbfs);
        out.push('\n');

        let _ = writeln!(out, "instr {}", self.instrument.number);
        for line in self.instrument.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(INDENT);
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("endin\n");

        out.push_str("</CsInstruments>\n");
        out.push_str("<CsScore>\n");
        out.push_str(&self.score.render());
        out.push('\n');
        out.push_str("</CsScore>\n");
        out.push_str("</CsoundSynthesizer>");
        out
    }
}

#[cfg(test)]
#[path = "test_document.rs"]
mod tests;

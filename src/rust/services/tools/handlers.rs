use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use super::{
    KICK_TOOL, RAW_SCRIPT_TOOL, SUBTRACTIVE_TOOL, TONE_TOOL, ToolContext, ToolError, ToolHandler,
    ToolOutput, decode_arguments,
};
use crate::engine::mapping::{EnvelopeParams, KickParams};
use crate::engine::voices::{KickVoice, SubtractiveVoice, ToneVoice, Voice};

pub const SUBTRACTIVE_DESCRIPTION: &str = "\
Generate a tone using a subtractive sawtooth oscillator and lowpass filter. \
Suited to classic synthesizer basses, leads and plucks.

cutoff_hz sets filter brightness: 100-400 dark and muffled, 800-1500 warm, \
2000-5000 bright and piercing.
attack (0-255): 0-10 instant hit, 50-100 medium swell, 150-255 slow fade in.
decay (0-255): 10-50 fast drop, 80-150 natural decay.
sustain (0-255): 0 dies out entirely, 255 holds at full volume.
release (0-255): 10-30 stops immediately, 150-255 long ringing tail.
Knob values outside 0-255 are clamped.

Returns the absolute path of the rendered .wav file, or the Csound diagnostics.";

pub const KICK_DESCRIPTION: &str = "\
Generate an analog-style kick drum: a sine oscillator with a pitch envelope \
and tanh saturation.

fundamental_hz is the resting sub frequency (40-80 Hz typical).
punch (0-255): 0-50 soft thump, 100-150 punchy EDM/house, 200-255 hard laser-like click.
decay (0-255): 10-50 short and tight, 100-150 club kick, 200-255 long booming 808.
drive (0-255): 0-20 clean sub, 100-150 warm saturation, 200-255 heavily distorted.
Knob values outside 0-255 are clamped.

Returns the absolute path of the rendered .wav file, or the Csound diagnostics.";

pub const TONE_DESCRIPTION: &str = "\
Generate a plain monophonic sine tone at the given pitch (Hz) for the given \
duration (seconds).

Returns the absolute path of the rendered .wav file, or the Csound diagnostics.";

pub const RAW_SCRIPT_DESCRIPTION: &str = "\
Render a complete Csound .csd document (orchestra and score) to a WAV file.

Returns the absolute path of the rendered .wav file, or the Csound diagnostics.";

fn output_filename_schema() -> Value {
    json!({
        "type": "string",
        "description": "Optional output file name in the working directory, e.g. 'warm_pad.wav'. '.wav' is appended when missing."
    })
}

fn knob_schema(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

pub fn subtractive_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "pitch": { "type": "number", "description": "Fundamental frequency in Hz (e.g. 55.0 for bass, 440.0 for lead)" },
            "duration": { "type": "number", "description": "Note length in seconds" },
            "cutoff_hz": { "type": "number", "description": "Lowpass cutoff in Hz" },
            "attack": knob_schema("Time to reach full volume (0-255)"),
            "decay": knob_schema("Time to fall to the sustain level (0-255)"),
            "sustain": knob_schema("Level held after the decay (0-255)"),
            "release": knob_schema("Fade out time after the note ends (0-255)"),
            "output_filename": output_filename_schema()
        },
        "required": ["pitch", "duration", "cutoff_hz", "attack", "decay", "sustain", "release"]
    })
}

pub fn kick_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fundamental_hz": { "type": "number", "description": "Resting sub-bass frequency in Hz" },
            "punch": knob_schema("Speed and intensity of the transient click (0-255)"),
            "decay": knob_schema("Length of the amplitude decay (0-255)"),
            "drive": knob_schema("Amount of saturation (0-255)"),
            "output_filename": output_filename_schema()
        },
        "required": ["fundamental_hz", "punch", "decay", "drive"]
    })
}

pub fn tone_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "pitch": { "type": "number", "description": "Frequency in Hz" },
            "duration": { "type": "number", "description": "Length in seconds" },
            "output_filename": output_filename_schema()
        },
        "required": ["pitch", "duration"]
    })
}

pub fn raw_script_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "csd_content": { "type": "string", "description": "Complete Csound orchestra and score" },
            "output_filename": output_filename_schema()
        },
        "required": ["csd_content"]
    })
}

#[derive(Debug, Deserialize)]
struct SubtractiveArgs {
    pitch: f64,
    duration: f64,
    cutoff_hz: f64,
    #[serde(deserialize_with = "saturating_knob")]
    attack: i64,
    #[serde(deserialize_with = "saturating_knob")]
    decay: i64,
    #[serde(deserialize_with = "saturating_knob")]
    sustain: i64,
    #[serde(deserialize_with = "saturating_knob")]
    release: i64,
    #[serde(default)]
    output_filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KickArgs {
    fundamental_hz: f64,
    #[serde(deserialize_with = "saturating_knob")]
    punch: i64,
    #[serde(deserialize_with = "saturating_knob")]
    decay: i64,
    #[serde(deserialize_with = "saturating_knob")]
    drive: i64,
    #[serde(default)]
    output_filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToneArgs {
    pitch: f64,
    duration: f64,
    #[serde(default)]
    output_filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScriptArgs {
    csd_content: String,
    #[serde(default)]
    output_filename: Option<String>,
}

/// Accept any whole JSON number for a knob, saturating at the `i64` bounds so
/// `clamp_control` sees every integer. Fractional values are rejected.
fn saturating_knob<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if let Some(value) = number.as_u64() {
        return Ok(i64::try_from(value).unwrap_or(i64::MAX));
    }
    match number.as_f64() {
        // `as` saturates out-of-range floats.
        Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(serde::de::Error::custom(format!(
            "invalid knob value {}, expected a whole number",
            number
        ))),
    }
}

/// Empty names behave like an omitted name.
fn non_empty(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|n| !n.is_empty())
}

async fn render_script(
    ctx: &ToolContext,
    script: String,
    output_filename: &Option<String>,
) -> ToolOutput {
    let result = ctx.renderer.render(&script, non_empty(output_filename)).await;
    ToolOutput { result }
}

pub struct SubtractiveTool;

#[async_trait]
impl ToolHandler for SubtractiveTool {
    async fn call(&self, ctx: &ToolContext, arguments: Value) -> Result<ToolOutput, ToolError> {
        let args: SubtractiveArgs = decode_arguments(SUBTRACTIVE_TOOL, arguments)?;
        let envelope = EnvelopeParams::from_raw(args.attack, args.decay, args.sustain, args.release);
        let voice = SubtractiveVoice::new(args.pitch, args.duration, args.cutoff_hz, envelope)
            .with_release_tail(ctx.release_tail);
        Ok(render_script(ctx, voice.script(), &args.output_filename).await)
    }
}

pub struct KickTool;

#[async_trait]
impl ToolHandler for KickTool {
    async fn call(&self, ctx: &ToolContext, arguments: Value) -> Result<ToolOutput, ToolError> {
        let args: KickArgs = decode_arguments(KICK_TOOL, arguments)?;
        let params = KickParams::from_raw(args.punch, args.decay, args.drive);
        let voice = KickVoice::new(args.fundamental_hz, params);
        Ok(render_script(ctx, voice.script(), &args.output_filename).await)
    }
}

pub struct ToneTool;

#[async_trait]
impl ToolHandler for ToneTool {
    async fn call(&self, ctx: &ToolContext, arguments: Value) -> Result<ToolOutput, ToolError> {
        let args: ToneArgs = decode_arguments(TONE_TOOL, arguments)?;
        let voice = ToneVoice::new(args.pitch, args.duration);
        Ok(render_script(ctx, voice.script(), &args.output_filename).await)
    }
}

pub struct RawScriptTool;

#[async_trait]
impl ToolHandler for RawScriptTool {
    async fn call(&self, ctx: &ToolContext, arguments: Value) -> Result<ToolOutput, ToolError> {
        let args: RawScriptArgs = decode_arguments(RAW_SCRIPT_TOOL, arguments)?;
        Ok(render_script(ctx, args.csd_content, &args.output_filename).await)
    }
}

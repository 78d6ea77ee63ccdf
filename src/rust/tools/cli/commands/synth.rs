use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::engine::mapping::{EnvelopeParams, KickParams};
use crate::engine::voices::{KickVoice, ReleaseTail, SubtractiveVoice, ToneVoice, Voice};
use crate::tools::cli::state::CliContext;

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output file name ('.wav' is appended when missing); a temp file when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the generated Csound script instead of rendering it
    #[arg(long)]
    pub script: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ToneCommand {
    /// Frequency in Hz
    #[arg(long, default_value_t = 440.0)]
    pub pitch: f64,

    /// Length in seconds
    #[arg(long, default_value_t = 1.0)]
    pub duration: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct LeadCommand {
    /// Fundamental frequency in Hz
    #[arg(long, default_value_t = 440.0)]
    pub pitch: f64,

    /// Note length in seconds
    #[arg(long, default_value_t = 1.0)]
    pub duration: f64,

    /// Lowpass cutoff in Hz
    #[arg(long, default_value_t = 4000.0)]
    pub cutoff: f64,

    /// Attack knob (0-255)
    #[arg(long, default_value_t = 10)]
    pub attack: i64,

    /// Decay knob (0-255)
    #[arg(long, default_value_t = 50)]
    pub decay: i64,

    /// Sustain knob (0-255)
    #[arg(long, default_value_t = 255)]
    pub sustain: i64,

    /// Release knob (0-255)
    #[arg(long, default_value_t = 30)]
    pub release: i64,

    /// Extend the note by the release time (overrides the config)
    #[arg(long)]
    pub extend_release: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct KickCommand {
    /// Resting frequency in Hz
    #[arg(long, default_value_t = 55.0)]
    pub fundamental: f64,

    /// Transient punch (0-255)
    #[arg(long, default_value_t = 150)]
    pub punch: i64,

    /// Amplitude decay (0-255)
    #[arg(long, default_value_t = 80)]
    pub decay: i64,

    /// Saturation (0-255)
    #[arg(long, default_value_t = 50)]
    pub drive: i64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RenderCommand {
    /// Path to the .csd file
    pub path: PathBuf,

    /// Output file name ('.wav' is appended when missing); a temp file when omitted
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ToneCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let voice = ToneVoice::new(self.pitch, self.duration);
        emit(ctx, &voice, &self.output).await
    }
}

impl LeadCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let envelope = EnvelopeParams::from_raw(self.attack, self.decay, self.sustain, self.release);
        let release_tail = if self.extend_release {
            ReleaseTail::Extend
        } else {
            ctx.config().release_tail()
        };
        let voice = SubtractiveVoice::new(self.pitch, self.duration, self.cutoff, envelope)
            .with_release_tail(release_tail);

        let env = voice.mapped_envelope();
        ctx.logger().debug(format!(
            "Envelope: attack {:.3}s, decay {:.3}s, sustain {:.3}, release {:.3}s",
            env.attack_secs, env.decay_secs, env.sustain_level, env.release_secs
        ));
        emit(ctx, &voice, &self.output).await
    }
}

impl KickCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let params = KickParams::from_raw(self.punch, self.decay, self.drive);
        let voice = KickVoice::new(self.fundamental, params);

        let kick = voice.mapped();
        ctx.logger().debug(format!(
            "Kick: {:.1} Hz -> {:.1} Hz in {:.3}s, decay {:.3}s, drive x{:.2}",
            kick.pitch_start_hz, self.fundamental, kick.drop_secs, kick.decay_secs, kick.drive_mult
        ));
        emit(ctx, &voice, &self.output).await
    }
}

impl RenderCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let script = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read script: {}", self.path.display()))?;
        render(ctx, &script, self.output.as_deref()).await
    }
}

async fn emit(ctx: &CliContext, voice: &dyn Voice, output: &OutputArgs) -> Result<()> {
    let script = voice.script();
    if output.script {
        println!("{}", script);
        return Ok(());
    }

    ctx.logger().action(format!("Rendering {} voice", voice.name()));
    render(ctx, &script, output.output.as_deref()).await
}

async fn render(ctx: &CliContext, script: &str, output: Option<&str>) -> Result<()> {
    let path = ctx.renderer().render(script, output).await?;
    println!("{}", path.display());
    Ok(())
}

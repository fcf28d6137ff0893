//! Tactile CLI: replay and inspect accessibility pan recognition.
//!
//! Usage:
//!   tactile replay <PATH>      Recognize pan gestures in a JSONL touch stream
//!   tactile synth <KIND>       Emit a synthetic touch trace as JSONL
//!   tactile config             Show the effective recognizer configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "tactile",
    about = "Accessibility pan gesture recognition from touch streams",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/tactile/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize pan gestures in a JSONL touch stream
    Replay {
        /// Path to the touch stream
        path: PathBuf,

        /// Write gestures as JSONL to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print gestures as JSONL instead of a table
        #[arg(long)]
        jsonl: bool,

        /// Minimum pan distance (device-independent pixels)
        #[arg(long)]
        min_distance: Option<f32>,

        /// Motion events required before a pan starts
        #[arg(long)]
        min_motion_events: Option<u32>,

        /// Minimum touch points for a pan
        #[arg(long)]
        min_touches: Option<u32>,

        /// Maximum touch points for a pan
        #[arg(long)]
        max_touches: Option<u32>,

        /// Only deliver gestures between Started and its Finished/Cancelled
        #[arg(long)]
        panning_only: bool,
    },

    /// Emit a synthetic touch trace as JSONL
    Synth {
        /// Gesture to script
        #[arg(value_enum)]
        kind: SynthKind,

        /// Origin X coordinate
        #[arg(long, default_value = "100.0")]
        x: f32,

        /// Origin Y coordinate
        #[arg(long, default_value = "100.0")]
        y: f32,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective recognizer configuration
    Config {
        /// Persist the effective configuration to the standard location
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SynthKind {
    Tap,
    Flick,
    SlowPan,
    FastPan,
    Interrupted,
    MultiTouch,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = commands::load_config(cli.config.as_deref())?;

    let mut logging = app_config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    tactile_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay {
            path,
            output,
            jsonl,
            min_distance,
            min_motion_events,
            min_touches,
            max_touches,
            panning_only,
        } => commands::replay::run(
            path,
            app_config.pan,
            commands::replay::Overrides {
                min_distance,
                min_motion_events,
                min_touches,
                max_touches,
                panning_only,
            },
            output,
            jsonl,
        ),
        Commands::Synth { kind, x, y, output } => {
            commands::synth::run(kind.into(), x, y, output)
        }
        Commands::Config { save } => commands::config::run(&app_config, save),
    }
}

impl From<SynthKind> for tactile_touch_model::synth::SyntheticGesture {
    fn from(kind: SynthKind) -> Self {
        use tactile_touch_model::synth::SyntheticGesture;
        match kind {
            SynthKind::Tap => SyntheticGesture::Tap,
            SynthKind::Flick => SyntheticGesture::Flick,
            SynthKind::SlowPan => SyntheticGesture::SlowPan,
            SynthKind::FastPan => SyntheticGesture::FastPan,
            SynthKind::Interrupted => SyntheticGesture::Interrupted,
            SynthKind::MultiTouch => SyntheticGesture::MultiTouch,
        }
    }
}

//! Recognize pan gestures in a recorded touch stream.

use std::path::PathBuf;

use tactile_common::config::{DeliveryPolicy, PanConfig};
use tactile_gesture_core::PanGestureRecognizer;
use tactile_replay::sources::JsonlSource;
use tactile_replay::writer::{GestureStreamHeader, GestureWriter};
use tactile_replay::ReplayDriver;

/// Command-line threshold overrides.
pub struct Overrides {
    pub min_distance: Option<f32>,
    pub min_motion_events: Option<u32>,
    pub min_touches: Option<u32>,
    pub max_touches: Option<u32>,
    pub panning_only: bool,
}

impl Overrides {
    fn apply(&self, config: &mut PanConfig) {
        if let Some(distance) = self.min_distance {
            config.minimum_distance = distance;
        }
        if let Some(events) = self.min_motion_events {
            config.minimum_motion_events = events;
        }
        if let Some(touches) = self.min_touches {
            config.minimum_touches = touches;
        }
        if let Some(touches) = self.max_touches {
            config.maximum_touches = touches;
        }
        if self.panning_only {
            config.delivery = DeliveryPolicy::PanningOnly;
        }
    }
}

pub fn run(
    path: PathBuf,
    mut config: PanConfig,
    overrides: Overrides,
    output: Option<PathBuf>,
    jsonl: bool,
) -> anyhow::Result<()> {
    overrides.apply(&mut config);

    let recognizer = PanGestureRecognizer::new(config.clone())
        .map_err(|e| anyhow::anyhow!("Invalid recognizer configuration: {e}"))?;
    let source = JsonlSource::open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open touch stream: {e}"))?;

    let mut writer = match &output {
        Some(out) => {
            let header = GestureStreamHeader::new(path.display().to_string(), config);
            Some(
                GestureWriter::create(out, &header)
                    .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", out.display()))?,
            )
        }
        None => None,
    };

    if !jsonl {
        println!("Replaying touch stream: {}", path.display());
        println!(
            "  {:>8}  {:<10}  {:>9}  {:>9}  {:>9}  {:>9}  {:>5}  {:>7}",
            "t(ms)", "phase", "x", "y", "prev x", "prev y", "dt", "touches"
        );
    }

    let mut driver = ReplayDriver::new(Box::new(source), recognizer);
    let summary = driver.run(|gesture| {
        if let Some(writer) = writer.as_mut() {
            writer.write_gesture(gesture)?;
        }
        if jsonl {
            println!("{}", serde_json::to_string(gesture)?);
        } else {
            println!(
                "  {:>8}  {:<10}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}  {:>5}  {:>7}",
                gesture.time_ms,
                gesture.phase,
                gesture.current_position.x,
                gesture.current_position.y,
                gesture.previous_position.x,
                gesture.previous_position.y,
                gesture.time_delta_ms,
                gesture.number_of_touches
            );
        }
        Ok(())
    })?;

    if let Some(writer) = writer.as_mut() {
        writer.flush()?;
    }

    if jsonl {
        tracing::info!(
            events = summary.events_processed,
            gestures = summary.gestures(),
            "Replay summary"
        );
    } else {
        println!();
        println!("Summary:");
        println!("  Touch events: {}", summary.events_processed);
        if summary.events_skipped > 0 {
            println!("  Skipped (malformed): {}", summary.events_skipped);
        }
        println!(
            "  Gestures: {} (possible {}, started {}, continuing {}, finished {}, cancelled {})",
            summary.gestures(),
            summary.possible,
            summary.started,
            summary.continuing,
            summary.finished,
            summary.cancelled
        );
        println!("  Final state: {}", summary.final_state);
        if let Some(out) = &output {
            println!("  Gestures written to: {}", out.display());
        }
    }

    Ok(())
}

//! Generate a synthetic touch trace.

use std::path::PathBuf;

use tactile_touch_model::stream::serialize_touch_events;
use tactile_touch_model::synth::SyntheticGesture;
use tactile_touch_model::vector::Vector2;

pub fn run(kind: SyntheticGesture, x: f32, y: f32, output: Option<PathBuf>) -> anyhow::Result<()> {
    let events = kind.trace(Vector2::new(x, y));
    let jsonl = serialize_touch_events(&events)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let kind_json = serde_json::to_string(&kind)?;
            std::fs::write(&path, format!("# {{\"synthetic\":{kind_json}}}\n{jsonl}"))?;
            tracing::info!(events = events.len(), path = %path.display(), "Wrote synthetic trace");
        }
        None => print!("{jsonl}"),
    }

    Ok(())
}

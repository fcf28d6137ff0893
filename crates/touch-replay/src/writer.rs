//! Append-only gesture writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use tactile_common::config::PanConfig;
use tactile_common::error::{TactileError, TactileResult};
use tactile_touch_model::gesture::PanGestureEvent;

/// Metadata written as the first line of a gesture stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time the stream was written (RFC 3339).
    pub created_wall: String,

    /// Where the touch events came from.
    pub source: String,

    /// Recognizer thresholds used to produce the gestures.
    pub config: PanConfig,
}

impl GestureStreamHeader {
    pub fn new(source: impl Into<String>, config: PanConfig) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            created_wall: chrono::Utc::now().to_rfc3339(),
            source: source.into(),
            config,
        }
    }
}

/// Writes gestures to a JSONL sink, one per line.
pub struct GestureWriter<W: Write> {
    writer: BufWriter<W>,
    gestures_written: u64,
}

impl GestureWriter<File> {
    /// Create a gesture file, truncating any existing one.
    pub fn create(path: &Path, header: &GestureStreamHeader) -> TactileResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Self::new(file, header)
    }
}

impl<W: Write> GestureWriter<W> {
    /// Wrap a sink, writing the header as a `#` comment line.
    pub fn new(sink: W, header: &GestureStreamHeader) -> TactileResult<Self> {
        let mut writer = BufWriter::new(sink);
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| TactileError::replay(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            gestures_written: 0,
        })
    }

    /// Write a single gesture as a JSONL line.
    pub fn write_gesture(&mut self, gesture: &PanGestureEvent) -> TactileResult<()> {
        let json = serde_json::to_string(gesture)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| TactileError::replay(format!("Failed to write gesture: {e}")))?;
        self.gestures_written += 1;

        if self.gestures_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes.
    pub fn flush(&mut self) -> TactileResult<()> {
        self.writer
            .flush()
            .map_err(|e| TactileError::replay(format!("Failed to flush gestures: {e}")))
    }

    pub fn gestures_written(&self) -> u64 {
        self.gestures_written
    }
}

impl<W: Write> Drop for GestureWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_touch_model::gesture::GesturePhase;
    use tactile_touch_model::vector::Vector2;

    fn gesture(phase: GesturePhase, t: u64) -> PanGestureEvent {
        PanGestureEvent {
            phase,
            current_position: Vector2::new(0.0, t as f32),
            previous_position: Vector2::ZERO,
            time_delta_ms: 0,
            time_ms: t,
            number_of_touches: 1,
        }
    }

    #[test]
    fn test_gesture_writer_file() {
        let dir = std::env::temp_dir().join("tactile_test_writer");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("gestures.jsonl");

        {
            let header = GestureStreamHeader::new("stub", PanConfig::default());
            let mut writer = GestureWriter::create(&path, &header).unwrap();
            writer.write_gesture(&gesture(GesturePhase::Possible, 0)).unwrap();
            writer.write_gesture(&gesture(GesturePhase::Started, 60)).unwrap();
            writer.write_gesture(&gesture(GesturePhase::Finished, 90)).unwrap();
            assert_eq!(writer.gestures_written(), 3);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# "));
        let header: GestureStreamHeader = serde_json::from_str(&lines[0][2..]).unwrap();
        assert_eq!(header.schema_version, "1.0");
        assert_eq!(header.source, "stub");

        let phases: Vec<GesturePhase> = lines[1..]
            .iter()
            .map(|line| serde_json::from_str::<PanGestureEvent>(line).unwrap().phase)
            .collect();
        assert_eq!(
            phases,
            vec![
                GesturePhase::Possible,
                GesturePhase::Started,
                GesturePhase::Finished
            ]
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}

//! Touch source implementations.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tactile_common::error::{TactileError, TactileResult};
use tactile_touch_model::stream::parse_touch_line;
use tactile_touch_model::touch::TouchEvent;

use crate::TouchSource;

/// Stub source for testing. Replays pre-loaded events.
pub struct StubSource {
    events: VecDeque<TouchEvent>,
}

impl StubSource {
    /// Create a stub source with pre-loaded events.
    pub fn new(events: Vec<TouchEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Create an empty stub that never produces events.
    pub fn empty() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl TouchSource for StubSource {
    fn poll(&mut self) -> TactileResult<Option<TouchEvent>> {
        Ok(self.events.pop_front())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Reads a JSONL touch stream one line at a time.
pub struct JsonlSource<R> {
    reader: R,
    line: Vec<u8>,
    line_no: usize,
    name: String,
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_no: 0,
            name: "jsonl".to_string(),
        }
    }

    /// Lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl JsonlSource<BufReader<File>> {
    /// Open a touch stream file.
    pub fn open(path: &Path) -> TactileResult<Self> {
        if !path.exists() {
            return Err(TactileError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let mut source = Self::new(BufReader::new(file));
        source.name = format!("jsonl:{}", path.display());
        Ok(source)
    }
}

impl<R: BufRead> TouchSource for JsonlSource<R> {
    fn poll(&mut self) -> TactileResult<Option<TouchEvent>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let text = std::str::from_utf8(&self.line).map_err(|e| {
                TactileError::invalid_touch_event(format!("line {}: {e}", self.line_no))
            })?;
            match parse_touch_line(text) {
                Ok(Some(event)) => return Ok(Some(event)),
                Ok(None) => continue,
                Err(e) => {
                    return Err(TactileError::invalid_touch_event(format!(
                        "line {}: {e}",
                        self.line_no
                    )))
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

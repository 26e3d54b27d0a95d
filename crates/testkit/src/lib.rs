#![warn(missing_docs)]
//! Deterministic testing surfaces (event stream + snapshot plumbing).

mod micro_worldtest;
mod snapshot;

use anyhow::{Context, Result};
use library_core::SimTick;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use micro_worldtest::*;
pub use snapshot::*;

/// Primary event record captured by headless runs and tests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, P: Serialize = &'a str> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Event payload.
    pub payload: P,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write<T: Serialize>(&mut self, event: &T) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered events to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        tracing::debug!(events = self.written, "event log flushed");
        Ok(())
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Writes a single pretty JSON report (session summaries, layouts) for CI artifacts.
pub struct JsonReportSink {
    file: File,
}

impl JsonReportSink {
    /// Create a sink pointed at the supplied path, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Persist the provided report as pretty JSON.
    pub fn write<T: Serialize>(&mut self, report: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(stem: &str, ext: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "{stem}-{}.{ext}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[derive(Serialize)]
    struct Summary {
        found: usize,
        label: &'static str,
    }

    #[test]
    fn report_sink_writes_file() {
        let path = temp_path("session-summary", "json");
        let mut sink = JsonReportSink::create(&path).expect("sink create");
        sink.write(&Summary {
            found: 3,
            label: "key_book_2",
        })
        .expect("write succeeds");
        let contents = fs::read_to_string(&path).expect("file readable");
        assert!(contents.contains("key_book_2"));
        assert!(contents.contains("found"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = temp_path("events", "jsonl");
        {
            let mut sink = JsonlSink::create(&path).expect("sink create");
            sink.write(&EventRecord {
                tick: SimTick(4),
                kind: "BookOpened",
                payload: 1u32,
            })
            .expect("write");
            sink.write(&EventRecord {
                tick: SimTick(9),
                kind: "Note",
                payload: "ok",
            })
            .expect("write");
            assert_eq!(sink.written(), 2);
            sink.flush().expect("flush");
        }
        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"BookOpened\""));
        let _ = fs::remove_file(&path);
    }
}

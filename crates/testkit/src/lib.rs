#![warn(missing_docs)]
//! Deterministic testing surfaces: golden snapshots, micro-worldtests and a
//! JSONL event log for headless runs.

mod micro_worldtest;
mod snapshot;

use anyhow::{Context, Result};
use enchantable_core::{BlockPos, SimTick};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use micro_worldtest::*;
pub use snapshot::*;

/// Event captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Kind label (e.g. `furnace_frozen`).
    pub kind: &'a str,
    /// Block the event concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<BlockPos>,
    /// Free-form detail.
    pub detail: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered events.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

// src/engine/sink.rs

//! Output sink that receives one line per completed job.
//!
//! The engine talks to an `OutputSink` instead of a raw writer so that tests
//! can inspect what was emitted (or inject IO failures) while production
//! writes straight to stdout.

use std::io::Write;
use std::sync::Mutex;

use crate::errors::Result;

/// Destination for job names as they complete.
pub trait OutputSink: Send + Sync {
    /// Write `name` followed by a newline.
    fn emit(&self, name: &str) -> Result<()>;
}

/// `OutputSink` over any `std::io::Write`.
///
/// The writer is guarded by a mutex that is held for a single line, so lines
/// from concurrent jobs never interleave.
#[derive(Debug, Default)]
pub struct WriterSink<W: Write + Send> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<Vec<u8>> {
    /// Everything written so far, as text.
    pub fn contents(&self) -> String {
        let guard = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&guard).into_owned()
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn emit(&self, name: &str) -> Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        writeln!(writer, "{name}")?;
        writer.flush()?;
        Ok(())
    }
}

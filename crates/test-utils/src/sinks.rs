use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use jobdag::engine::OutputSink;
use jobdag::errors::Result;

/// A sink that accepts `ok_lines` names and then fails every write with a
/// broken-pipe IO error.
pub struct FailingSink {
    ok_lines: usize,
    written: AtomicUsize,
}

impl FailingSink {
    pub fn new(ok_lines: usize) -> Self {
        Self {
            ok_lines,
            written: AtomicUsize::new(0),
        }
    }

    /// Number of names accepted before failing.
    pub fn accepted(&self) -> usize {
        self.written.load(Ordering::SeqCst).min(self.ok_lines)
    }
}

impl OutputSink for FailingSink {
    fn emit(&self, _name: &str) -> Result<()> {
        let n = self.written.fetch_add(1, Ordering::SeqCst);
        if n < self.ok_lines {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed").into())
        }
    }
}

/// A sink that panics on the first write, for exercising task-panic
/// handling in the engine.
pub struct PanickingSink;

impl OutputSink for PanickingSink {
    fn emit(&self, name: &str) -> Result<()> {
        panic!("sink refused to write {name:?}");
    }
}

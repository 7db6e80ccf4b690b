//! Change Log
//!
//! Append-only JSONL logging of state changes, plus a pending queue
//! that collects changes from observer notifications for batch writes.

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use psyche_events::{StateChange, Topic};

use crate::observe::{ObserverId, Observers};

/// Writes state changes to a JSONL file
pub struct ChangeLog {
    writer: Option<BufWriter<File>>,
    change_count: u64,
}

impl ChangeLog {
    /// Create a new change log writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            change_count: 0,
        })
    }

    /// Create a log that discards changes (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            change_count: 0,
        }
    }

    /// Get the current change count
    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    /// Log a change to the file
    pub fn log(&mut self, change: &StateChange) -> std::io::Result<()> {
        self.change_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(change)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Log multiple changes
    pub fn log_batch(&mut self, changes: &[StateChange]) -> std::io::Result<()> {
        for change in changes {
            self.log(change)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for ChangeLog {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: Failed to flush change log: {}", e);
        }
    }
}

/// Pending changes queue for batch processing.
///
/// Clones share the same queue, so a handle can live inside observer
/// callbacks while the driver drains from outside.
#[derive(Clone, Default)]
pub struct PendingChanges {
    inner: Rc<RefCell<Vec<StateChange>>>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, change: StateChange) {
        self.inner.borrow_mut().push(change);
    }

    pub fn drain(&self) -> Vec<StateChange> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Subscribe this queue to every topic on the hub so each emitted
    /// change lands here. Returns the observer registrations.
    pub fn attach(&self, observers: &Observers) -> Vec<ObserverId> {
        Topic::all()
            .iter()
            .map(|&topic| {
                let queue = self.clone();
                observers.observe(topic, move |change| queue.push(change.clone()))
            })
            .collect()
    }
}

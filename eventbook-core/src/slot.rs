//! The persisted collection: one named slot holding a serialized event list.
//!
//! Slots deal in raw text only. Parsing (and fail-soft recovery from bad
//! content) belongs to the store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{EventbookError, EventbookResult};

/// Name of the slot the event list lives in.
pub const EVENTS_SLOT: &str = "events";

pub trait EventSlot: Send {
    /// Current contents, or `None` if nothing has been written yet.
    fn read(&self) -> EventbookResult<Option<String>>;

    /// Replace the contents wholesale.
    fn write(&self, contents: &str) -> EventbookResult<()>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }

    /// `<dir>/events.json`
    pub fn in_dir(dir: &Path) -> Self {
        FileSlot::new(dir.join(format!("{EVENTS_SLOT}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSlot for FileSlot {
    fn read(&self) -> EventbookResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EventbookError::PersistenceRead(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, contents: &str) -> EventbookResult<()> {
        let write_err =
            |e: std::io::Error| EventbookError::PersistenceWrite(format!("{}: {e}", self.path.display()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Readers only ever see a complete list: write beside, then rename over.
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, contents).map_err(write_err)?;
        std::fs::rename(&temp, &self.path).map_err(write_err)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory slot. Clones share the same contents, so a caller can keep a
/// handle to inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemorySlot {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSlot for MemorySlot {
    fn read(&self) -> EventbookResult<Option<String>> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> EventbookResult<()> {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("memory:{EVENTS_SLOT}")
    }
}

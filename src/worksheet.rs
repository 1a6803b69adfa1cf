//! Persistent worksheet storage.
//!
//! A worksheet is the saved state of a notebook: one JSON record per cell,
//! appended to a named file. The handle is opened append-mode for the
//! lifetime of the command, so relaunching against the same path never
//! truncates prior cells.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WebConsoleError;

/// One persisted notebook cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub id: Uuid,
    /// Content type handled by one of the configured plugins.
    pub kind: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl Cell {
    pub fn new(kind: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            source: source.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-mode handle over a worksheet file.
///
/// Cloning shares the underlying handle; the mutex serializes appends from
/// concurrently handled requests.
#[derive(Debug, Clone)]
pub struct Worksheet {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl Worksheet {
    /// Open (creating if needed) the worksheet at `path` for appending.
    ///
    /// An empty path is a configuration error, raised before the filesystem
    /// is touched. Open failures propagate untouched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WebConsoleError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(WebConsoleError::Config(
                "a worksheet file name must be provided; it is used to save the worksheet"
                    .to_string(),
            ));
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one cell as a JSON line and flush it to disk.
    pub fn append_cell(&self, cell: &Cell) -> Result<(), WebConsoleError> {
        let record = serde_json::to_string(cell)?;
        let mut file = self.file.lock().expect("worksheet lock poisoned");
        file.write_all(record.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }

    /// Read back every persisted cell, in append order.
    pub fn read_cells(&self) -> Result<Vec<Cell>, WebConsoleError> {
        let contents = std::fs::read_to_string(&self.path)?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(WebConsoleError::from))
            .collect()
    }
}

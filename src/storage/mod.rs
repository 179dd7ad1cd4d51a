//! Storage layer for Memoroa
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod notes;

pub use file_io::{read_json, write_json_atomic};
pub use notes::NoteRepository;

use crate::config::paths::MemoroaPaths;
use crate::error::MemoroaError;

/// Main storage coordinator
pub struct Storage {
    pub notes: NoteRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: &MemoroaPaths) -> Result<Self, MemoroaError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            notes: NoteRepository::new(paths.notes_file()),
        })
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), MemoroaError> {
        self.notes.load()
    }
}

//! Backup restoration for Memoroa
//!
//! Decrypts a backup envelope and overwrites the note store. The store is
//! only touched after the envelope has fully decoded: a wrong passphrase or
//! a corrupted file leaves the current notes exactly as they were.

use std::path::Path;

use crate::crypto::envelope;
use crate::error::MemoroaResult;
use crate::models::Note;
use crate::storage::Storage;

use super::transfer::{ByteSource, PassphrasePrompt};

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    /// Number of notes now in the store
    pub note_count: usize,
    /// Name of the backup the notes came from
    pub source_name: String,
}

/// Handles restoring from encrypted backups
pub struct RestoreManager;

impl RestoreManager {
    pub fn new() -> Self {
        Self
    }

    /// Obtain, decrypt, and restore a backup into the note store
    pub fn restore(
        &self,
        storage: &mut Storage,
        source: &mut dyn ByteSource,
        prompt: &mut dyn PassphrasePrompt,
    ) -> MemoroaResult<RestoreResult> {
        let obtained = source.obtain()?;

        // Reject non-backups before asking for a passphrase
        envelope::check_header(&obtained.bytes)?;

        let passphrase = prompt.request("Enter backup passphrase: ")?;
        let notes: Vec<Note> = envelope::decode(&obtained.bytes, passphrase.as_str())?;

        let note_count = notes.len();
        storage.notes.replace_all(notes)?;

        Ok(RestoreResult {
            note_count,
            source_name: obtained.name,
        })
    }

    /// Check that a file looks like a backup envelope without decrypting it
    ///
    /// Only validates the framing; the authentication tag is checked by the
    /// actual restore.
    pub fn validate_file(&self, path: &Path) -> MemoroaResult<u64> {
        let bytes = std::fs::read(path)
            .map_err(|e| crate::error::MemoroaError::Io(format!("Failed to read backup file: {}", e)))?;
        envelope::check_header(&bytes)?;
        Ok(bytes.len() as u64)
    }
}

impl Default for RestoreManager {
    fn default() -> Self {
        Self::new()
    }
}

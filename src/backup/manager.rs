//! Backup manager for Memoroa
//!
//! Builds encrypted backup envelopes from the note store and hands them to a
//! byte sink. Backups written into the managed backup directory carry a
//! dated filename so they can be listed and sorted without opening them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::paths::MemoroaPaths;
use crate::crypto::envelope;
use crate::error::{MemoroaError, MemoroaResult};
use crate::models::Note;

use super::transfer::{ByteSink, PassphrasePrompt};

/// File extension for backup envelopes
pub const BACKUP_EXTENSION: &str = "dat";

/// Metadata about a backup file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates encrypted backups of the note store
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Filename stem for generated backups
    filename_stem: String,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &MemoroaPaths, filename_stem: impl Into<String>) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            filename_stem: filename_stem.into(),
        }
    }

    /// Suggested filename for a backup created now
    pub fn suggested_filename(&self) -> String {
        format!(
            "{}-{}.{}",
            self.filename_stem,
            Utc::now().format("%Y%m%d-%H%M%S"),
            BACKUP_EXTENSION
        )
    }

    /// Encrypt the given notes and deliver the envelope through the sink
    ///
    /// Refuses to back up an empty store. The passphrase is requested with
    /// confirmation, since a typo here silently produces an unrecoverable
    /// file.
    pub fn create_backup(
        &self,
        notes: &[Note],
        sink: &mut dyn ByteSink,
        prompt: &mut dyn PassphrasePrompt,
    ) -> MemoroaResult<PathBuf> {
        if notes.is_empty() {
            return Err(MemoroaError::Storage(
                "There are no notes to back up".to_string(),
            ));
        }

        let passphrase = prompt.request_confirmed("Enter backup passphrase: ")?;
        let bytes = envelope::encode(&notes, passphrase.as_str())?;

        sink.deliver(&bytes, &self.suggested_filename())
    }

    /// List backups in the managed backup directory, newest first
    pub fn list_backups(&self) -> MemoroaResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| MemoroaError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| MemoroaError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path
                .extension()
                .map_or(false, |ext| ext == BACKUP_EXTENSION)
            {
                if let Some(info) = self.parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        // Sort by date, newest first
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> MemoroaResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Parse backup info from a backup file path
    fn parse_backup_info(&self, path: &Path) -> Option<BackupInfo> {
        let filename = path.file_name()?.to_string_lossy().to_string();

        // Parse date from filename: <stem>-YYYYMMDD-HHMMSS.dat
        let date_part = filename
            .strip_prefix(&self.filename_stem)?
            .strip_prefix('-')?
            .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
        let created_at = parse_backup_timestamp(date_part)?;

        let metadata = fs::metadata(path).ok()?;

        Some(BackupInfo {
            filename,
            path: path.to_path_buf(),
            created_at,
            size_bytes: metadata.len(),
        })
    }
}

/// Parse a backup timestamp from the filename date part (YYYYMMDD-HHMMSS)
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    let (date_part, time_part) = date_str.split_once('-')?;
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    // get() instead of indexing: a multibyte filename of the right byte
    // length must fall through to None, not panic on a char boundary
    let year: i32 = date_part.get(0..4)?.parse().ok()?;
    let month: u32 = date_part.get(4..6)?.parse().ok()?;
    let day: u32 = date_part.get(6..8)?.parse().ok()?;
    let hour: u32 = time_part.get(0..2)?.parse().ok()?;
    let minute: u32 = time_part.get(2..4)?.parse().ok()?;
    let second: u32 = time_part.get(4..6)?.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(DateTime::from_naive_utc_and_offset(
        chrono::NaiveDateTime::new(date, time),
        Utc,
    ))
}

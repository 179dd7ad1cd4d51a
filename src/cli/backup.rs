//! Backup CLI commands
//!
//! Implements CLI commands for encrypted backup management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{BackupManager, FileSink, FileSource, RestoreManager, TerminalPrompt};
use crate::config::paths::MemoroaPaths;
use crate::config::settings::Settings;
use crate::error::{MemoroaError, MemoroaResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create an encrypted backup of all notes
    Create {
        /// Write to this path instead of the backup directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List backups in the backup directory
    List,

    /// Restore notes from an encrypted backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &MemoroaPaths,
    settings: &Settings,
    storage: &mut Storage,
    cmd: BackupCommands,
) -> MemoroaResult<()> {
    let manager = BackupManager::new(paths, settings.backup_filename_stem.clone());

    match cmd {
        BackupCommands::Create { output } => {
            let mut sink = match output {
                Some(path) => FileSink::to_path(path),
                None => FileSink::into_dir(paths.backup_dir()),
            };
            let mut prompt = TerminalPrompt;

            println!("Encrypting {} note(s)...", storage.notes.len());
            let written = manager.create_backup(storage.notes.all(), &mut sink, &mut prompt)?;

            println!("Backup created: {}", written.display());
            println!("Keep your passphrase safe - the file cannot be opened without it.");
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: memoroa backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                println!(
                    "  {}. {} ({} ago, {})",
                    i + 1,
                    backup.filename,
                    format_duration(age),
                    format_size(backup.size_bytes),
                );
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;

            // Reject non-backup files before any prompting or warnings
            let restore_manager = RestoreManager::new();
            let size = restore_manager.validate_file(&backup_path)?;

            println!("Backup file: {}", backup_path.display());
            println!("Size: {}", format_size(size));
            println!();

            if !force {
                println!("WARNING: Restoring will overwrite ALL current notes!");
                println!("To proceed, run again with --force flag:");
                println!("  memoroa backup restore {} --force", backup);
                return Ok(());
            }

            let mut source = FileSource::new(backup_path);
            let mut prompt = TerminalPrompt;
            let result = restore_manager.restore(storage, &mut source, &mut prompt)?;

            println!(
                "Restored {} note(s) from {}",
                result.note_count, result.source_name
            );
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &MemoroaPaths,
    backup: &str,
) -> MemoroaResult<PathBuf> {
    // Handle "latest" keyword
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| MemoroaError::backup_not_found("latest"));
    }

    // Check if it's a full path
    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    // Check if it's a filename in the backup directory
    let backup_path = paths.backup_dir().join(backup);
    if backup_path.exists() {
        return Ok(backup_path);
    }

    Err(MemoroaError::backup_not_found(backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    // Clock skew or a hand-named file can date a backup in the future
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

//! CLI command handlers for Memoroa

pub mod backup;
pub mod note;

pub use backup::{handle_backup_command, BackupCommands};
pub use note::{handle_note_command, NoteCommands};

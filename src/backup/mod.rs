//! Backup system for Memoroa
//!
//! Turns the note store into a single encrypted envelope file and back.
//!
//! # Architecture
//!
//! - `BackupManager`: encrypts the note list and delivers it to a byte sink
//! - `RestoreManager`: validates and decrypts a backup, then overwrites the
//!   note store
//! - `transfer`: the collaborator traits the managers speak to — where bytes
//!   go, where they come from, and how passphrases are collected
//!
//! # Backup Format
//!
//! A backup file is the binary envelope described in [`crate::crypto::envelope`]:
//! magic bytes, key derivation salt, AES-GCM nonce, and the encrypted JSON
//! note list with its authentication tag.

pub mod manager;
pub mod restore;
pub mod transfer;

pub use manager::{BackupInfo, BackupManager, BACKUP_EXTENSION};
pub use restore::{RestoreManager, RestoreResult};
pub use transfer::{
    ByteSink, ByteSource, FileSink, FileSource, FixedPassphrase, ObtainedBytes, PassphrasePrompt,
    TerminalPrompt,
};

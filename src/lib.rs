//! Memoroa - Terminal note-taking application with encrypted backups
//!
//! This library provides the core functionality for Memoroa. Notes are kept
//! in a local JSON store; the interesting part is the backup feature, which
//! packs the whole note list into a single passphrase-encrypted binary
//! envelope that can be carried between machines.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The note data model
//! - `storage`: JSON file storage layer
//! - `crypto`: Key derivation and the backup envelope format
//! - `backup`: Backup and restore managers
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use memoroa::config::{paths::MemoroaPaths, settings::Settings};
//! use memoroa::storage::Storage;
//!
//! let paths = MemoroaPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(&paths)?;
//! storage.load_all()?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod storage;

pub use error::MemoroaError;

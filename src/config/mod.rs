//! Configuration module for Memoroa
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MemoroaPaths;
pub use settings::Settings;

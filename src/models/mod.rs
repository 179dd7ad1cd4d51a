//! Core data models for Memoroa

pub mod note;

pub use note::Note;

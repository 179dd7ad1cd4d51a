//! Note CLI commands
//!
//! Implements CLI commands for note management.

use clap::Subcommand;

use crate::error::MemoroaResult;
use crate::models::Note;
use crate::storage::Storage;

/// Note management commands
#[derive(Subcommand)]
pub enum NoteCommands {
    /// Add a new note
    Add {
        /// Note content (an HTML fragment or plain text)
        content: String,
    },

    /// List all notes
    List,

    /// Show the full content of a note
    Show {
        /// Note id
        id: String,
    },

    /// Replace the content of a note
    Edit {
        /// Note id
        id: String,
        /// New content
        content: String,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id
        id: String,
    },
}

/// Handle a note command
pub fn handle_note_command(storage: &mut Storage, cmd: NoteCommands) -> MemoroaResult<()> {
    match cmd {
        NoteCommands::Add { content } => {
            let id = storage.notes.add(Note::new(content))?;
            println!("Added note {}", id);
        }

        NoteCommands::List => {
            if storage.notes.is_empty() {
                println!("No notes yet.");
                println!("Create one with: memoroa note add \"<content>\"");
                return Ok(());
            }

            for (i, note) in storage.notes.all().iter().enumerate() {
                println!("{}. {} [{}]", i + 1, note.title(), note.id);
                println!("   {}", note.preview());
            }
            println!();
            println!("Total: {} note(s)", storage.notes.len());
        }

        NoteCommands::Show { id } => {
            let note = storage
                .notes
                .get(&id)
                .ok_or_else(|| crate::error::MemoroaError::note_not_found(&id))?;
            println!("{}", note.content);
        }

        NoteCommands::Edit { id, content } => {
            storage.notes.update(&id, content)?;
            if storage.notes.get(&id).is_some() {
                println!("Updated note {}", id);
            } else {
                // Blank content deletes, like clearing the editor does
                println!("Note {} had no content left and was deleted", id);
            }
        }

        NoteCommands::Delete { id } => {
            storage.notes.delete(&id)?;
            println!("Deleted note {}", id);
        }
    }

    Ok(())
}

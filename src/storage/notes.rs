//! Note repository
//!
//! JSON file storage for the ordered note list. Order is significant: new
//! notes are prepended, and the sidebar shows the list as stored.

use std::path::PathBuf;

use crate::error::{MemoroaError, MemoroaResult};
use crate::models::Note;

use super::file_io::{read_json, write_json_atomic};

/// Repository for notes, backed by a single JSON file
pub struct NoteRepository {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteRepository {
    /// Create a new repository for the given file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            notes: Vec::new(),
        }
    }

    /// Load notes from disk (missing file means an empty list)
    pub fn load(&mut self) -> MemoroaResult<()> {
        self.notes = read_json(&self.path)?;
        Ok(())
    }

    /// Save notes to disk atomically
    pub fn save(&self) -> MemoroaResult<()> {
        write_json_atomic(&self.path, &self.notes)
    }

    /// All notes in display order (newest first)
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Find a note by id
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Add a new note at the front of the list, returning its id
    ///
    /// Blank notes are rejected: a note with no visible text would be
    /// deleted again on the next save anyway.
    pub fn add(&mut self, note: Note) -> MemoroaResult<String> {
        if note.is_blank() {
            return Err(MemoroaError::Storage(
                "Refusing to add a note with no content".to_string(),
            ));
        }
        let id = note.id.clone();
        self.notes.insert(0, note);
        self.save()?;
        Ok(id)
    }

    /// Replace the content of an existing note
    ///
    /// Updating a note to blank content deletes it instead.
    pub fn update(&mut self, id: &str, content: impl Into<String>) -> MemoroaResult<()> {
        let content = content.into();
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| MemoroaError::note_not_found(id))?;

        note.content = content;
        if note.is_blank() {
            self.notes.retain(|n| n.id != id);
        }
        self.save()
    }

    /// Delete a note by id
    pub fn delete(&mut self, id: &str) -> MemoroaResult<()> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(MemoroaError::note_not_found(id));
        }
        self.save()
    }

    /// Replace the entire note list (used by restore)
    ///
    /// Nothing is written until the caller has a fully validated replacement
    /// list, and the write itself is atomic.
    pub fn replace_all(&mut self, notes: Vec<Note>) -> MemoroaResult<()> {
        self.notes = notes;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_repo() -> (NoteRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = NoteRepository::new(temp_dir.path().join("notes.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (mut repo, _temp) = test_repo();
        repo.load().unwrap();
        assert!(repo.is_empty());
    }

    #[test]
    fn test_add_prepends() {
        let (mut repo, _temp) = test_repo();
        repo.add(Note::new("<p>first</p>")).unwrap();
        repo.add(Note::new("<p>second</p>")).unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.all()[0].content, "<p>second</p>");
        assert_eq!(repo.all()[1].content, "<p>first</p>");
    }

    #[test]
    fn test_add_persists_across_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.json");

        let id = {
            let mut repo = NoteRepository::new(path.clone());
            repo.load().unwrap();
            repo.add(Note::new("<p>persisted</p>")).unwrap()
        };

        let mut repo = NoteRepository::new(path);
        repo.load().unwrap();
        assert_eq!(repo.get(&id).unwrap().content, "<p>persisted</p>");
    }

    #[test]
    fn test_add_blank_is_rejected() {
        let (mut repo, _temp) = test_repo();
        let result = repo.add(Note::new("<p><br></p>"));
        assert!(result.is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_update_content() {
        let (mut repo, _temp) = test_repo();
        let id = repo.add(Note::new("<p>old</p>")).unwrap();

        repo.update(&id, "<p>new</p>").unwrap();
        assert_eq!(repo.get(&id).unwrap().content, "<p>new</p>");
    }

    #[test]
    fn test_update_to_blank_deletes() {
        let (mut repo, _temp) = test_repo();
        let id = repo.add(Note::new("<p>soon gone</p>")).unwrap();

        repo.update(&id, "<br>").unwrap();
        assert!(repo.get(&id).is_none());
    }

    #[test]
    fn test_update_unknown_id() {
        let (mut repo, _temp) = test_repo();
        let result = repo.update("missing", "<p>x</p>");
        assert!(matches!(result, Err(MemoroaError::NotFound { .. })));
    }

    #[test]
    fn test_delete() {
        let (mut repo, _temp) = test_repo();
        let id = repo.add(Note::new("<p>bye</p>")).unwrap();

        repo.delete(&id).unwrap();
        assert!(repo.is_empty());
        assert!(repo.delete(&id).is_err());
    }

    #[test]
    fn test_replace_all_overwrites() {
        let (mut repo, _temp) = test_repo();
        repo.add(Note::new("<p>original</p>")).unwrap();

        let restored = vec![
            Note {
                id: "1".into(),
                content: "<p>restored a</p>".into(),
            },
            Note {
                id: "2".into(),
                content: "<p>restored b</p>".into(),
            },
        ];
        repo.replace_all(restored).unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.all()[0].id, "1");
    }
}

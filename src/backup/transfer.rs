//! Collaborator interfaces for moving backup bytes and collecting passphrases
//!
//! The managers never touch the terminal or pick file locations themselves;
//! they talk to these traits, so the transport (file, pipe, test fixture)
//! stays swappable.

use std::fs;
use std::path::PathBuf;

use crate::crypto::Passphrase;
use crate::error::{MemoroaError, MemoroaResult};

/// Accepts finished backup bytes and a suggested filename
pub trait ByteSink {
    /// Deliver the bytes, returning where they ended up
    fn deliver(&mut self, bytes: &[u8], suggested_name: &str) -> MemoroaResult<PathBuf>;
}

/// Supplies backup bytes picked by the user
pub trait ByteSource {
    /// Obtain the bytes and the name of their origin
    fn obtain(&mut self) -> MemoroaResult<ObtainedBytes>;
}

/// Bytes obtained from a source, with their origin name
pub struct ObtainedBytes {
    pub bytes: Vec<u8>,
    pub name: String,
}

/// Supplies a passphrase from the user
pub trait PassphrasePrompt {
    /// Request a passphrase; an empty reply means the user backed out
    fn request(&mut self, prompt: &str) -> MemoroaResult<Passphrase>;

    /// Request a passphrase for a new backup, confirming it a second time
    fn request_confirmed(&mut self, prompt: &str) -> MemoroaResult<Passphrase> {
        let first = self.request(prompt)?;
        let second = self.request("Confirm passphrase: ")?;
        if first.as_str() != second.as_str() {
            return Err(MemoroaError::Config("Passphrases do not match".to_string()));
        }
        Ok(first)
    }
}

/// Sink that writes to a file path, or into a directory under the suggested name
pub struct FileSink {
    target: SinkTarget,
}

enum SinkTarget {
    Path(PathBuf),
    Directory(PathBuf),
}

impl FileSink {
    /// Write to an explicit path, ignoring the suggested name
    pub fn to_path(path: PathBuf) -> Self {
        Self {
            target: SinkTarget::Path(path),
        }
    }

    /// Write into a directory using the suggested name
    pub fn into_dir(dir: PathBuf) -> Self {
        Self {
            target: SinkTarget::Directory(dir),
        }
    }
}

impl ByteSink for FileSink {
    fn deliver(&mut self, bytes: &[u8], suggested_name: &str) -> MemoroaResult<PathBuf> {
        let path = match &self.target {
            SinkTarget::Path(path) => path.clone(),
            SinkTarget::Directory(dir) => dir.join(suggested_name),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| MemoroaError::Io(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(&path, bytes)
            .map_err(|e| MemoroaError::Io(format!("Failed to write backup file: {}", e)))?;

        Ok(path)
    }
}

/// Source that reads a whole file from a path
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ByteSource for FileSource {
    fn obtain(&mut self) -> MemoroaResult<ObtainedBytes> {
        let bytes = fs::read(&self.path)
            .map_err(|e| MemoroaError::Io(format!("Failed to read backup file: {}", e)))?;
        let name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());
        Ok(ObtainedBytes { bytes, name })
    }
}

/// Hidden-input terminal prompt
///
/// `MEMOROA_PASSPHRASE` overrides the prompt for scripted use. An empty reply
/// is treated as cancellation, which callers swallow silently.
pub struct TerminalPrompt;

impl PassphrasePrompt for TerminalPrompt {
    fn request(&mut self, prompt: &str) -> MemoroaResult<Passphrase> {
        if let Ok(pass) = std::env::var("MEMOROA_PASSPHRASE") {
            if pass.is_empty() {
                return Err(MemoroaError::UserCancelled);
            }
            return Ok(Passphrase::new(pass));
        }

        let pass = rpassword::prompt_password(prompt)
            .map_err(|e| MemoroaError::Io(format!("Failed to read passphrase: {}", e)))?;

        let pass = Passphrase::new(pass);
        if pass.is_empty() {
            return Err(MemoroaError::UserCancelled);
        }
        Ok(pass)
    }

    fn request_confirmed(&mut self, prompt: &str) -> MemoroaResult<Passphrase> {
        // The env override needs no confirmation
        if std::env::var("MEMOROA_PASSPHRASE").is_ok() {
            return self.request(prompt);
        }

        let first = self.request(prompt)?;
        let second = self.request("Confirm passphrase: ")?;
        if first.as_str() != second.as_str() {
            return Err(MemoroaError::Config("Passphrases do not match".to_string()));
        }
        Ok(first)
    }
}

/// Prompt that always answers with a fixed passphrase (tests, scripting)
pub struct FixedPassphrase(pub String);

impl PassphrasePrompt for FixedPassphrase {
    fn request(&mut self, _prompt: &str) -> MemoroaResult<Passphrase> {
        if self.0.is_empty() {
            return Err(MemoroaError::UserCancelled);
        }
        Ok(Passphrase::new(self.0.clone()))
    }
}

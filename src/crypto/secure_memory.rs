//! Secure handling of passphrases in memory
//!
//! A passphrase should live only as long as the operation that needs it and
//! leave no copies behind. `Passphrase` wraps the string, zeroes it on drop,
//! and refuses to print its contents.

use std::fmt;

use zeroize::Zeroizing;

/// A user passphrase, zeroed on drop and redacted in output
pub struct Passphrase {
    inner: Zeroizing<String>,
}

impl Passphrase {
    /// Wrap a passphrase string
    pub fn new(s: impl Into<String>) -> Self {
        Self {
            inner: Zeroizing::new(s.into()),
        }
    }

    /// Borrow the passphrase for a derive/encrypt/decrypt call
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Check if empty (an empty prompt reply means cancellation upstream)
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// Never print the contents in Debug output
impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passphrase")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Never print the contents in Display output
impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_access() {
        let p = Passphrase::new("correct-horse");
        assert_eq!(p.as_str(), "correct-horse");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_empty_passphrase() {
        let p = Passphrase::new("");
        assert!(p.is_empty());
    }

    #[test]
    fn test_debug_redacts_contents() {
        let p = Passphrase::new("secret");
        let debug = format!("{:?}", p);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("Passphrase"));
    }

    #[test]
    fn test_display_redacts_contents() {
        let p = Passphrase::new("secret");
        let display = format!("{}", p);
        assert!(!display.contains("secret"));
        assert!(display.contains("REDACTED"));
    }
}

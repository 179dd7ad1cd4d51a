//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives AES-256 keys from user passphrases. The iteration count is fixed
//! high enough that brute-forcing a leaked backup file stays expensive.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count. Part of the backup file contract: changing it
/// makes every existing backup undecryptable.
pub const PBKDF2_ITERATIONS: u32 = 150_000;

/// Size of the key derivation salt in bytes
pub const SALT_SIZE: usize = 16;

/// A derived encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The 32-byte key for AES-256
    key: [u8; 32],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

/// Derive an AES-256 key from a passphrase and salt
///
/// Deterministic: the same (passphrase, salt) pair always yields the same
/// key, which is what lets restore reproduce the key from the salt stored
/// in the backup envelope. Each call runs the full iterated hash; there is
/// no caching.
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_SIZE]) -> DerivedKey {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_is_deterministic() {
        let salt = [7u8; SALT_SIZE];
        let key1 = derive_key("test_passphrase", &salt);
        let key2 = derive_key("test_passphrase", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = [7u8; SALT_SIZE];
        let key1 = derive_key("passphrase1", &salt);
        let key2 = derive_key("passphrase2", &salt);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same_passphrase", &[1u8; SALT_SIZE]);
        let key2 = derive_key("same_passphrase", &[2u8; SALT_SIZE]);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_accepted() {
        // The primitive accepts an empty passphrase; non-empty enforcement
        // lives at the prompt layer.
        let key = derive_key("", &[0u8; SALT_SIZE]);
        assert_eq!(key.as_bytes().len(), 32);
    }
}

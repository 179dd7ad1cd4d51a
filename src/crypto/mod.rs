//! Cryptographic core for Memoroa
//!
//! Provides PBKDF2-HMAC-SHA256 key derivation and the AES-256-GCM backup
//! envelope format used by backup and restore.

pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use envelope::{check_header, decode, encode, MAGIC, MIN_ENVELOPE_SIZE, NONCE_SIZE, TAG_SIZE};
pub use key_derivation::{derive_key, DerivedKey, PBKDF2_ITERATIONS, SALT_SIZE};
pub use secure_memory::Passphrase;

//! The encrypted backup container
//!
//! A backup file is a single self-describing binary envelope:
//!
//! | Offset | Length   | Field          |
//! |--------|----------|----------------|
//! | 0      | 4        | Magic `"MEMO"` |
//! | 4      | 16       | Salt           |
//! | 20     | 12       | Nonce          |
//! | 32     | variable | Ciphertext‖Tag |
//!
//! The payload is UTF-8 JSON encrypted with AES-256-GCM under a key derived
//! from the user's passphrase and the per-envelope salt. The last 16 bytes
//! of the ciphertext region are the GCM authentication tag.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{MemoroaError, MemoroaResult};

use super::key_derivation::{derive_key, SALT_SIZE};

/// Magic bytes identifying a Memoroa backup file
pub const MAGIC: &[u8; 4] = b"MEMO";

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Smallest possible envelope: magic + salt + nonce + tag (empty plaintext)
pub const MIN_ENVELOPE_SIZE: usize = MAGIC.len() + SALT_SIZE + NONCE_SIZE + TAG_SIZE;

/// Serialize and encrypt a payload into an envelope
///
/// Generates a fresh salt and nonce for every call, so two envelopes of the
/// same payload under the same passphrase are never byte-identical. That is
/// deliberate: envelopes are not comparable.
pub fn encode<T: Serialize>(payload: &T, passphrase: &str) -> MemoroaResult<Vec<u8>> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(passphrase, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| MemoroaError::Storage(format!("Failed to create cipher: {}", e)))?;

    let plaintext = serde_json::to_vec(payload)?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_slice())
        .map_err(|e| MemoroaError::Storage(format!("Encryption failed: {}", e)))?;

    let mut out = Vec::with_capacity(MAGIC.len() + SALT_SIZE + NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Validate, decrypt, and deserialize an envelope
///
/// Failure modes:
/// - [`MemoroaError::BadFormat`]: the magic bytes don't match ("not our file")
/// - [`MemoroaError::MalformedEnvelope`]: too short to hold the required fields
/// - [`MemoroaError::AuthenticationFailed`]: tag verification failed. This is
///   the only signal for both a wrong passphrase and corrupted or tampered
///   bytes; the two are indistinguishable by construction.
/// - [`MemoroaError::InvalidPayload`]: decrypted bytes are not the expected
///   JSON. Unreachable against a genuine envelope.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], passphrase: &str) -> MemoroaResult<T> {
    check_header(bytes)?;

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&bytes[MAGIC.len()..MAGIC.len() + SALT_SIZE]);
    let nonce_start = MAGIC.len() + SALT_SIZE;
    let nonce = Nonce::from_slice(&bytes[nonce_start..nonce_start + NONCE_SIZE]);
    let ciphertext = &bytes[nonce_start + NONCE_SIZE..];

    let key = derive_key(passphrase, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| MemoroaError::Storage(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| MemoroaError::AuthenticationFailed)?;

    serde_json::from_slice(&plaintext).map_err(|e| MemoroaError::InvalidPayload(e.to_string()))
}

/// Validate the envelope framing without touching the ciphertext
///
/// Magic comes first: a wrong-magic file is "not ours" no matter its length,
/// while a correct-magic file that is too short is merely truncated.
pub fn check_header(bytes: &[u8]) -> MemoroaResult<()> {
    if bytes.len() < MAGIC.len() {
        return Err(MemoroaError::MalformedEnvelope);
    }
    if &bytes[..MAGIC.len()] != MAGIC {
        return Err(MemoroaError::BadFormat);
    }
    if bytes.len() < MIN_ENVELOPE_SIZE {
        return Err(MemoroaError::MalformedEnvelope);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_round_trip() {
        let payload = json!([
            {"id": "1", "content": "<p>hello</p>"},
            {"id": "2", "content": "second note<br>with lines"}
        ]);
        let bytes = encode(&payload, "correct-horse").unwrap();
        let decoded: Value = decode(&bytes, "correct-horse").unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_envelope_layout() {
        let payload = json!([{"id": "1", "content": "<p>hello</p>"}]);
        let bytes = encode(&payload, "correct-horse").unwrap();

        assert!(bytes.len() >= MIN_ENVELOPE_SIZE);
        assert_eq!(&bytes[..4], b"MEMO");
        // Ciphertext = JSON length + tag
        let json_len = serde_json::to_vec(&payload).unwrap().len();
        assert_eq!(bytes.len(), 4 + SALT_SIZE + NONCE_SIZE + json_len + TAG_SIZE);
    }

    #[test]
    fn test_wrong_passphrase_fails_authentication() {
        let payload = json!([{"id": "1", "content": "<p>hello</p>"}]);
        let bytes = encode(&payload, "correct-horse").unwrap();
        let result: MemoroaResult<Value> = decode(&bytes, "wrong");
        assert!(matches!(result, Err(MemoroaError::AuthenticationFailed)));
    }

    #[test]
    fn test_tampering_fails_authentication() {
        let payload = json!([{"id": "1", "content": "tamper me"}]);
        let bytes = encode(&payload, "pass").unwrap();

        // Flip one bit in every byte of the ciphertext/tag region in turn.
        for i in MIN_ENVELOPE_SIZE - TAG_SIZE..bytes.len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;
            let result: MemoroaResult<Value> = decode(&tampered, "pass");
            assert!(
                matches!(result, Err(MemoroaError::AuthenticationFailed)),
                "bit flip at offset {} was not detected",
                i
            );
        }
    }

    #[test]
    fn test_bad_magic_regardless_of_length() {
        let result: MemoroaResult<Value> = decode(b"NOPE", "pass");
        assert!(matches!(result, Err(MemoroaError::BadFormat)));

        let long = vec![0x41u8; 200];
        let result: MemoroaResult<Value> = decode(&long, "pass");
        assert!(matches!(result, Err(MemoroaError::BadFormat)));
    }

    #[test]
    fn test_truncated_envelope_is_malformed() {
        let payload = json!([{"id": "1", "content": "x"}]);
        let bytes = encode(&payload, "pass").unwrap();

        let result: MemoroaResult<Value> = decode(&bytes[..MIN_ENVELOPE_SIZE - 1], "pass");
        assert!(matches!(result, Err(MemoroaError::MalformedEnvelope)));

        // Fewer than 4 bytes cannot even be magic-checked
        let result: MemoroaResult<Value> = decode(b"ME", "pass");
        assert!(matches!(result, Err(MemoroaError::MalformedEnvelope)));

        let result: MemoroaResult<Value> = decode(&[], "pass");
        assert!(matches!(result, Err(MemoroaError::MalformedEnvelope)));
    }

    #[test]
    fn test_encode_is_not_deterministic() {
        let payload = json!([{"id": "1", "content": "same input"}]);
        let a = encode(&payload, "pass").unwrap();
        let b = encode(&payload, "pass").unwrap();
        assert_ne!(a, b);
        // Fresh salt and fresh nonce, not just differing ciphertext
        assert_ne!(a[4..4 + SALT_SIZE], b[4..4 + SALT_SIZE]);
        assert_ne!(
            a[4 + SALT_SIZE..4 + SALT_SIZE + NONCE_SIZE],
            b[4 + SALT_SIZE..4 + SALT_SIZE + NONCE_SIZE]
        );
    }

    #[test]
    fn test_single_note_backup_scenario() {
        let payload = json!([{"id": "1", "content": "<p>hello</p>"}]);
        let blob = encode(&payload, "correct-horse").unwrap();

        assert!(blob.len() >= 48);
        assert_eq!(&blob[..4], b"MEMO");

        let restored: Value = decode(&blob, "correct-horse").unwrap();
        assert_eq!(restored, payload);

        let result: MemoroaResult<Value> = decode(&blob, "wrong");
        assert!(matches!(result, Err(MemoroaError::AuthenticationFailed)));
    }
}

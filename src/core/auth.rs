//! Password digests
//!
//! Passwords are stored as the base64 encoding of their SHA-256 digest, so a stored
//! value is always a 44-character printable string safe to place in a CSV field.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Digest a plaintext password for storage
#[must_use]
pub fn hash_password(plain: &str) -> String {
    STANDARD.encode(Sha256::digest(plain.as_bytes()))
}

/// Check a plaintext password against a stored digest
///
/// Digests of equal length are compared in constant time.
#[must_use]
pub fn verify_password(plain: &str, stored_digest: &str) -> bool {
    let candidate = hash_password(plain);
    candidate.as_bytes().ct_eq(stored_digest.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_and_printable() {
        let first = hash_password("TestPassword123!");
        assert_eq!(first, hash_password("TestPassword123!"));
        assert_ne!(first, "TestPassword123!");
        assert_eq!(first.len(), 44);
        assert!(!first.contains(','));
    }

    #[test]
    fn test_known_digest() {
        // sha256("") = e3b0c442...b855
        assert_eq!(
            hash_password(""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_verify() {
        let digest = hash_password("TestPassword123!");
        assert!(verify_password("TestPassword123!", &digest));
        assert!(!verify_password("WrongPassword", &digest));
        assert!(!verify_password("TestPassword123!", "short"));
        assert!(!verify_password("TestPassword123!", ""));

        let mut tampered = digest.clone().into_bytes();
        tampered[43] = b'A';
        assert!(!verify_password("TestPassword123!", &String::from_utf8(tampered).unwrap()));
    }
}

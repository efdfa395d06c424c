use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
const ITERATIONS: u32 = 100_000;

/// Hash a password with a fresh random salt. The stored form is
/// `hex(salt) || hex(digest)`: 32 hex chars of salt followed by 64 of
/// PBKDF2-HMAC-SHA256 output.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    let digest = derive(password, &salt);
    format!("{}{}", hex::encode(salt), hex::encode(digest))
}

/// Verify a password against a stored hash. Fails closed: any malformed
/// stored value yields `false`, never a panic.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.len() != SALT_LEN * 2 + DIGEST_LEN * 2 || !stored.is_ascii() {
        return false;
    }
    let (salt_hex, digest_hex) = stored.split_at(SALT_LEN * 2);
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    hex::encode(derive(password, &salt)) == digest_hex
}

fn derive(password: &str, salt: &[u8]) -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut digest);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let stored = hash_password("correct horse battery staple");
        assert!(!verify_password("Tr0ub4dor&3", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password");
        let second = hash_password("same password");
        // Fresh salt per call, so the stored strings differ
        assert_ne!(first, second);
        assert_ne!(&first[..SALT_LEN * 2], &second[..SALT_LEN * 2]);
        assert!(verify_password("same password", &first));
        assert!(verify_password("same password", &second));
    }

    #[test]
    fn test_stored_format() {
        let stored = hash_password("pw");
        assert_eq!(stored.len(), 96);
        assert!(stored.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_malformed_stored_values_fail_closed() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "deadbeef"));
        assert!(!verify_password("pw", &"z".repeat(96)));
        assert!(!verify_password("pw", &"a".repeat(95)));
        assert!(!verify_password("pw", &"é".repeat(48)));
    }
}

//! One-time password-reset codes.
//!
//! Codes are six decimal digits, stored hashed (SHA-256 hex) with an
//! expiry. The expiry is enforced when a code is verified, not by a
//! background sweep.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Validity window for a reset code.
pub const RESET_CODE_TTL_MINUTES: i64 = 10;

/// Generates a random six-digit reset code.
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    n.to_string()
}

/// Computes the SHA-256 hex digest of a code for storage.
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns the expiry timestamp for a code issued now.
pub fn expiry_from_now() -> DateTime<Utc> {
    Utc::now() + Duration::minutes(RESET_CODE_TTL_MINUTES)
}

/// Checks a submitted code against a stored hash and expiry.
pub fn verify_code(submitted: &str, stored_hash: &str, expires_at: DateTime<Utc>) -> bool {
    if Utc::now() > expires_at {
        return false;
    }
    hash_code(submitted) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_hash_code_deterministic() {
        assert_eq!(hash_code("123456"), hash_code("123456"));
        assert_ne!(hash_code("123456"), hash_code("654321"));
        assert_eq!(hash_code("123456").len(), 64);
    }

    #[test]
    fn test_verify_code_accepts_valid() {
        let code = "482913";
        let hash = hash_code(code);
        assert!(verify_code(code, &hash, Utc::now() + Duration::minutes(5)));
    }

    #[test]
    fn test_verify_code_rejects_wrong_code() {
        let hash = hash_code("482913");
        assert!(!verify_code("111111", &hash, Utc::now() + Duration::minutes(5)));
    }

    #[test]
    fn test_verify_code_rejects_expired() {
        let code = "482913";
        let hash = hash_code(code);
        assert!(!verify_code(code, &hash, Utc::now() - Duration::seconds(1)));
    }

    #[test]
    fn test_expiry_from_now_is_in_the_future() {
        let expiry = expiry_from_now();
        assert!(expiry > Utc::now());
        assert!(expiry <= Utc::now() + Duration::minutes(RESET_CODE_TTL_MINUTES));
    }
}

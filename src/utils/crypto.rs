use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(password_hash)
}

/// Checks a password against a stored PHC string. A malformed stored hash is
/// a mismatch, not an error, so callers cannot tell the two apart.
pub fn password_matches(plain: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "Stored password hash could not be parsed");
            false
        }
    }
}

/// Runs a full verification against a throwaway hash so an unknown account
/// costs as much as a wrong password.
pub fn verify_against_decoy(plain: &str) {
    if let Some(hashed) = decoy_hash() {
        let _ = password_matches(plain, hashed);
    }
}

fn decoy_hash() -> Option<&'static str> {
    DECOY_HASH
        .get_or_init(|| hash_password("decoy-account").ok())
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hashed = hash_password("pw1").unwrap();
        assert_ne!(hashed, "pw1");
        assert!(password_matches("pw1", &hashed));
        assert!(!password_matches("pw2", &hashed));
    }

    #[test]
    fn decoy_hash_is_a_real_argon2_hash() {
        let decoy = decoy_hash().unwrap();
        assert!(PasswordHash::new(decoy).is_ok());
        assert_eq!(decoy_hash(), Some(decoy));
        assert!(!password_matches("pw1", decoy));
        verify_against_decoy("pw1");
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert!(!password_matches("pw1", "e10adc3949ba59abbe56e057f20f883e"));
    }
}

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 3;

/// Validate password length before any database access
///
/// Length is counted in characters, not bytes, so multi-byte input is not
/// over-counted.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(anyhow!(
            "Password must be at least {} characters long.",
            MIN_PASSWORD_LEN
        ));
    }

    Ok(())
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a hash using Argon2id
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_accepts_minimum_length() {
        assert!(validate_password("abc").is_ok());
        assert!(validate_password("admin123").is_ok());
    }

    #[test]
    fn test_validate_password_rejects_short_passwords() {
        assert!(validate_password("").is_err());
        assert!(validate_password("a").is_err());
        assert!(validate_password("ab").is_err());
    }

    #[test]
    fn test_validate_password_counts_characters_not_bytes() {
        // Two characters, four bytes: still too short
        assert!(validate_password("éé").is_err());
        assert!(validate_password("密码").is_err());

        // Three characters of any width pass
        assert!(validate_password("ééé").is_ok());
        assert!(validate_password("密码测").is_ok());
    }

    #[test]
    fn test_hash_password_creates_valid_hash() {
        let password = "test_password_123";
        let hash = hash_password(password).unwrap();

        // Argon2 hash should start with $argon2
        assert!(hash.starts_with("$argon2"));

        // Hash should be reasonably long
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_with_correct_password() {
        let password = "correct_password";
        let hash = hash_password(password).unwrap();

        let result = verify_password(password, &hash).unwrap();
        assert!(result);
    }

    #[test]
    fn test_verify_password_with_incorrect_password() {
        let password = "correct_password";
        let hash = hash_password(password).unwrap();

        let result = verify_password("wrong_password", &hash).unwrap();
        assert!(!result);
    }

    #[test]
    fn test_hash_password_generates_different_hashes() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Same password should generate different hashes due to different salts
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verify_password_with_unicode() {
        let password = "密码测试123";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("密码测试", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_with_invalid_hash() {
        let result = verify_password("password", "invalid_hash");
        assert!(result.is_err());
    }

    // Property-based tests

    use proptest::prelude::*;

    // For any password, the stored value should be a salted hash rather than
    // plaintext, and the hash should verify only against the original password
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn test_password_hash_irreversibility(
            password in "[A-Za-z0-9!@#$%^&*()_+\\-=\\[\\]{};':\"\\\\|,.<>/?]{3,32}"
        ) {
            let hash = hash_password(&password).unwrap();

            prop_assert_ne!(&hash, &password);
            prop_assert!(hash.starts_with("$argon2"));
            prop_assert!(verify_password(&password, &hash).unwrap());

            let different_password = format!("{}x", password);
            prop_assert!(!verify_password(&different_password, &hash).unwrap());

            // Same password should produce different hashes (due to salt)
            let hash2 = hash_password(&password).unwrap();
            prop_assert_ne!(&hash, &hash2);
            prop_assert!(verify_password(&password, &hash2).unwrap());
        }
    }

    // Password hash should not contain the original password
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn test_password_not_in_hash(
            password in "[A-Za-z0-9]{8,16}"
        ) {
            let hash = hash_password(&password).unwrap();

            prop_assert!(!hash.contains(&password));
        }
    }

    // Length validation is the only gate: anything at or above the minimum passes
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn test_validate_password_length_boundary(
            password in prop::string::string_regex(".{0,64}").unwrap()
        ) {
            let result = validate_password(&password);
            if password.chars().count() < MIN_PASSWORD_LEN {
                prop_assert!(result.is_err());
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}

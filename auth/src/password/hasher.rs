use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PhcError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::scheme::HashScheme;

/// Password hashing implementation.
///
/// Hashes with Argon2id (default parameters, random salt per call) and
/// verifies both Argon2 PHC strings and legacy bcrypt hashes.
///
/// No normalisation is applied to the input: whitespace, letter case and
/// Unicode composition are all significant. Argon2 consumes the whole input,
/// so unlike bcrypt there is no 72-byte cut-off.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Any string is accepted, including the empty string.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - The Argon2 primitive itself failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored Argon2 PHC string or legacy bcrypt hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - The stored string is not a hash this hasher understands
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        match HashScheme::detect(hash) {
            Some(HashScheme::Argon2) => verify_argon2(password, hash),
            Some(HashScheme::Bcrypt) => verify_bcrypt(password, hash),
            None => Err(PasswordError::MalformedHash(
                "unrecognised hash format".to_string(),
            )),
        }
    }

    /// Check whether a stored hash should be replaced by a fresh one.
    ///
    /// True for bcrypt hashes and for Argon2 hashes whose variant, version or
    /// cost parameters differ from the ones `hash` uses today.
    ///
    /// # Errors
    /// * `MalformedHash` - The stored string is not a hash this hasher understands
    pub fn needs_rehash(&self, hash: &str) -> Result<bool, PasswordError> {
        match HashScheme::detect(hash) {
            Some(HashScheme::Bcrypt) => Ok(true),
            Some(HashScheme::Argon2) => {
                let parsed = parse_phc(hash)?;
                Ok(!is_current_argon2(&parsed))
            }
            None => Err(PasswordError::MalformedHash(
                "unrecognised hash format".to_string(),
            )),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_phc(hash: &str) -> Result<PasswordHash<'_>, PasswordError> {
    PasswordHash::new(hash)
        .map_err(|e| PasswordError::MalformedHash(format!("Invalid password hash: {}", e)))
}

fn verify_argon2(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = parse_phc(hash)?;
    if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
        return Err(PasswordError::MalformedHash(
            "Invalid password hash: missing salt or digest".to_string(),
        ));
    }

    let argon2 = Argon2::default();
    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(e) => Err(PasswordError::MalformedHash(format!(
            "Invalid password hash: {}",
            e
        ))),
    }
}

fn verify_bcrypt(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password.as_bytes(), hash)
        .map_err(|e| PasswordError::MalformedHash(format!("Invalid bcrypt hash: {}", e)))
}

fn is_current_argon2(parsed: &PasswordHash<'_>) -> bool {
    if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
        return false;
    }
    if parsed.version != Some(Version::V0x13.into()) {
        return false;
    }

    match Params::try_from(parsed) {
        Ok(params) => {
            params.m_cost() == Params::DEFAULT_M_COST
                && params.t_cost() == Params::DEFAULT_T_COST
                && params.p_cost() == Params::DEFAULT_P_COST
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("TestPassword123!").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("TestPassword123!").unwrap();
        let second = hasher.hash("TestPassword123!").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("TestPassword123!", &first).unwrap());
        assert!(hasher.verify("TestPassword123!", &second).unwrap());
    }

    #[test]
    fn test_empty_password_round_trip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("").expect("Empty password must hash");

        assert!(hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify("SomePassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_verify_empty_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("", "");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_verify_truncated_phc_string() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "$argon2id$v=19$m=19456");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_verify_phc_string_without_digest() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").unwrap();
        let without_digest = &hash[..hash.rfind('$').unwrap()];

        assert!(matches!(
            hasher.verify("password", without_digest),
            Err(PasswordError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_verify_phc_string_with_bad_params() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify(
            "password",
            "$argon2id$v=19$m=1,t=0,p=0$c29tZXNhbHQ$aGFzaGhhc2hoYXNoaGFzaA",
        );
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_no_normalisation() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Password123").unwrap();

        assert!(!hasher.verify("password123", &hash).unwrap());
        assert!(!hasher.verify("Password 123", &hash).unwrap());
        assert!(!hasher.verify("Password123 ", &hash).unwrap());
    }

    #[test]
    fn test_unicode_is_significant() {
        let hasher = PasswordHasher::new();
        // Precomposed "é" versus "e" followed by a combining acute accent.
        let hash = hasher.hash("caf\u{e9}").unwrap();

        assert!(hasher.verify("caf\u{e9}", &hash).unwrap());
        assert!(!hasher.verify("cafe\u{301}", &hash).unwrap());
    }

    #[test]
    fn test_argon2_does_not_truncate_long_input() {
        let hasher = PasswordHasher::new();
        let prefix = "A".repeat(72);
        let hash = hasher.hash(&format!("{}tail-one", prefix)).unwrap();

        assert!(hasher
            .verify(&format!("{}tail-one", prefix), &hash)
            .unwrap());
        assert!(!hasher
            .verify(&format!("{}tail-two", prefix), &hash)
            .unwrap());
    }

    #[test]
    fn test_verify_legacy_bcrypt_hash() {
        let hasher = PasswordHasher::new();
        let hash = bcrypt::hash("TestPassword123!", 4).unwrap();

        assert!(hash.starts_with("$2b$"));
        assert!(hasher.verify("TestPassword123!", &hash).unwrap());
        assert!(!hasher.verify("WrongPassword456!", &hash).unwrap());
    }

    #[test]
    fn test_bcrypt_truncates_at_72_bytes() {
        let hasher = PasswordHasher::new();
        let prefix = "a".repeat(72);
        let hash = bcrypt::hash(format!("{}tail-one", prefix), 4).unwrap();

        // Everything past byte 72 is ignored by bcrypt.
        assert!(hasher
            .verify(&format!("{}tail-two", prefix), &hash)
            .unwrap());
        assert!(!hasher.verify(&"a".repeat(71), &hash).unwrap());
    }

    #[test]
    fn test_verify_malformed_bcrypt_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "$2b$04$tooshort");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_needs_rehash_fresh_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").unwrap();
        assert!(!hasher.needs_rehash(&hash).unwrap());
    }

    #[test]
    fn test_needs_rehash_bcrypt() {
        let hasher = PasswordHasher::new();
        let hash = bcrypt::hash("password", 4).unwrap();
        assert!(hasher.needs_rehash(&hash).unwrap());
    }

    #[test]
    fn test_needs_rehash_weaker_argon2_params() {
        let hasher = PasswordHasher::new();
        let params = Params::new(8 * 1024, 1, 1, None).unwrap();
        let weak = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = weak
            .hash_password(b"password", &salt)
            .unwrap()
            .to_string();

        assert!(hasher.verify("password", &hash).unwrap());
        assert!(hasher.needs_rehash(&hash).unwrap());
    }

    #[test]
    fn test_needs_rehash_argon2i_variant() {
        let hasher = PasswordHasher::new();
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, Params::default());
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2i
            .hash_password(b"password", &salt)
            .unwrap()
            .to_string();

        assert!(hasher.needs_rehash(&hash).unwrap());
    }

    #[test]
    fn test_needs_rehash_malformed() {
        let hasher = PasswordHasher::new();
        assert!(matches!(
            hasher.needs_rehash(""),
            Err(PasswordError::MalformedHash(_))
        ));
    }
}

/// Prefixes of the modular-crypt bcrypt variants.
const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

const ARGON2_PREFIX: &str = "$argon2";

/// Family of a stored password hash.
///
/// New hashes are always Argon2id. Bcrypt hashes are only ever verified:
/// they come from accounts created before the switch and are upgraded on the
/// next successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// PHC string produced by any Argon2 variant.
    Argon2,
    /// Legacy modular-crypt bcrypt hash. Inputs are truncated to 72 bytes.
    Bcrypt,
}

impl HashScheme {
    /// Classify a stored hash by its prefix.
    ///
    /// # Returns
    /// `None` when the string is not a hash this crate can verify
    pub fn detect(hash: &str) -> Option<Self> {
        if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
            Some(Self::Bcrypt)
        } else if hash.starts_with(ARGON2_PREFIX) {
            Some(Self::Argon2)
        } else {
            None
        }
    }
}

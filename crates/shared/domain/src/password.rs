//! Password value object - Domain layer password handling.
//!
//! Hashes are Argon2id PHC strings with a fresh random salt per call. The
//! owning user's context is mixed in as Argon2 associated data and recorded
//! in the PHC string, so verification only needs the stored hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, AssociatedData, ParamsBuilder, Version,
};

use crate::constants::MAX_PASSWORD_CONTEXT_BYTES;
use crate::error::{DomainError, DomainResult};

/// Something a password hash can be bound to.
pub trait PasswordContext {
    /// Stable bytes identifying the owner of the password.
    fn context_bytes(&self) -> Vec<u8>;
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash `plain_text` for the user described by `context`.
    ///
    /// Length rules are enforced by the registration validator, not here.
    ///
    /// # Errors
    /// Returns a password error if Argon2 rejects its parameters.
    pub fn hash_for<C: PasswordContext + ?Sized>(context: &C, plain_text: &str) -> DomainResult<Self> {
        let mut data = context.context_bytes();
        data.truncate(MAX_PASSWORD_CONTEXT_BYTES);

        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2(&data)?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Malformed hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        // Parameters (including associated data) are read back from the hash.
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }

    fn argon2(data: &[u8]) -> DomainResult<Argon2<'static>> {
        let data = AssociatedData::new(data)
            .map_err(|e| DomainError::password(format!("Invalid password context: {}", e)))?;
        let params = ParamsBuilder::new()
            .data(data)
            .build()
            .map_err(|e| DomainError::password(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash `plain_text` bound to `context`, returning the PHC string.
pub fn hash<C: PasswordContext + ?Sized>(context: &C, plain_text: &str) -> DomainResult<String> {
    Password::hash_for(context, plain_text).map(Password::into_string)
}

/// Check `plain_text` against a stored PHC string.
pub fn verify(hash: &str, plain_text: &str) -> bool {
    Password::from_hash(hash).verify(plain_text)
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

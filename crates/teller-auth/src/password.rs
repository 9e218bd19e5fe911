//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Cost factor used when none is configured
pub const DEFAULT_HASH_COST: u32 = 11;

/// Error types for password operations
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),

    /// Cost factor rejected by Argon2
    #[error("Invalid hash cost {0}: {1}")]
    InvalidCost(u32, String),
}

/// Produces and checks stored credential hashes
pub trait CredentialHasher: Send + Sync {
    /// Hash a plain text password into a storable string
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Report whether `password` matches a previously stored `hash`
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id hasher with a configurable cost factor
///
/// The cost factor is the Argon2 time cost (number of passes over memory).
/// Memory and parallelism stay at the Argon2 defaults (19 MiB, 1 lane).
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    cost: u32,
    params: Params,
}

impl Argon2Hasher {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidCost(cost, e.to_string()))?;

        Ok(Self { cost, params })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(password_hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        verify_password(password, hash)
    }
}

/// Hash a password using Argon2id with the default cost factor
///
/// # Returns
/// * `Ok(String)` - PHC-formatted hash string (suitable for storage)
/// * `Err(PasswordError)` - If hashing fails
///
/// # Example
/// ```
/// use teller_auth::password::hash_password;
///
/// let hash = hash_password("MySecurePassword123!").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Argon2Hasher::new(DEFAULT_HASH_COST)?.hash(password)
}

/// Verify a password against a hash
///
/// Parameters (cost, memory, salt) are read back from the PHC string, so a
/// hash produced with any cost factor verifies here.
///
/// # Returns
/// * `Ok(true)` - Password matches hash
/// * `Ok(false)` - Password does not match hash
/// * `Err(PasswordError)` - If hash format is invalid or verification fails
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
    }
}

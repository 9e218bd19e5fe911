//! Credential hashing and session token issuing for the teller service

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, JwtValidator, SessionClaims, TokenIssuer, DEFAULT_TOKEN_VALIDITY_MINUTES};
pub use password::{
    hash_password, verify_password, Argon2Hasher, CredentialHasher, PasswordError,
    DEFAULT_HASH_COST,
};

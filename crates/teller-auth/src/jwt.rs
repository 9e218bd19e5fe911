//! JWT (JSON Web Token) session tokens

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of a session token issued at login
pub const DEFAULT_TOKEN_VALIDITY_MINUTES: i64 = 30;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user_id: String, validity: Duration) -> Self {
        let now = Utc::now();
        let exp = now + validity;

        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// JWT errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT encoding error: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Token expired")]
    TokenExpired,
}

/// Signs session tokens with an HMAC-SHA256 secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    validity: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            validity,
        }
    }

    /// Issue a signed token for `subject`, returning it with its claims
    pub fn issue(&self, subject: &str) -> Result<(String, SessionClaims), JwtError> {
        let claims = SessionClaims::new(subject.to_string(), self.validity);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok((token, claims))
    }
}

/// JWT validator
///
/// Validates signature and expiration only.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create a new JWT validator using HMAC-SHA256 (symmetric secret)
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        if token_data.claims.is_expired() {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    /// Encode JWT using HMAC-SHA256 (symmetric secret)
    pub fn encode(secret: &[u8], claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(secret);

        Ok(encode(&header, claims, &encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &[u8] = b"test_secret_key_1234567890";

    #[test]
    fn test_issue_and_validate() {
        let issuer = TokenIssuer::new(TEST_SECRET, Duration::minutes(30));
        let (token, claims) = issuer.issue("user-123").unwrap();

        let decoded = JwtValidator::new(TEST_SECRET).validate(&token).unwrap();

        assert_eq!(decoded, claims);
        assert_eq!(decoded.sub, "user-123");
    }

    #[test]
    fn test_issued_token_expires_in_thirty_minutes() {
        let issuer = TokenIssuer::new(
            TEST_SECRET,
            Duration::minutes(DEFAULT_TOKEN_VALIDITY_MINUTES),
        );
        let (_, claims) = issuer.issue("user-456").unwrap();

        assert_eq!(claims.exp - claims.iat, 30 * 60);
        let remaining = claims.expires_at() - Utc::now();
        assert!(remaining > Duration::minutes(29));
        assert!(remaining <= Duration::minutes(30));
    }

    #[test]
    fn test_expired_token() {
        let claims = SessionClaims::new("user-789".to_string(), Duration::seconds(-10));
        assert!(claims.is_expired());

        let token = JwtValidator::encode(TEST_SECRET, &claims).unwrap();
        let result = JwtValidator::new(TEST_SECRET).validate(&token);

        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new(b"other-secret", Duration::minutes(30));
        let (token, _) = issuer.issue("user-1").unwrap();

        let result = JwtValidator::new(TEST_SECRET).validate(&token);
        assert!(matches!(result, Err(JwtError::EncodingError(_))));
    }

    #[test]
    fn test_claims_serialize_only_registered_fields() {
        let claims = SessionClaims::new("user-9".to_string(), Duration::minutes(30));
        let json = serde_json::to_value(&claims).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["sub"], "user-9");
    }
}

//! Request and response bodies for the auth endpoints

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// User login request
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as missing parameters rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address (a document number is also accepted)
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    /// Password
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
}

/// Cashier registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub fullname: Option<String>,
    /// Postal address; a JSON object is stored as its JSON text
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    /// Identity document number
    #[serde(default, deserialize_with = "lenient_string")]
    pub document: Option<String>,
    /// Document type reference
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_type_document: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Signed session token, valid for 30 minutes
    pub token: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Parse a JSON body, treating anything unreadable as an empty request
pub fn parse_body<T>(body: &[u8]) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    serde_json::from_slice(body).unwrap_or_default()
}

/// Accept strings, numbers, and objects for text fields
///
/// Numbers are common for document and phone fields. Null, booleans, and
/// empty strings count as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        Value::Null | Value::Bool(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_camel_case() {
        let request: RegisterRequest = parse_body(
            br#"{"fullname":"Ana","idTypeDocument":"CC","phoneNumber":3001234567,"document":1001}"#,
        );

        assert_eq!(request.fullname.as_deref(), Some("Ana"));
        assert_eq!(request.id_type_document.as_deref(), Some("CC"));
        assert_eq!(request.phone_number.as_deref(), Some("3001234567"));
        assert_eq!(request.document.as_deref(), Some("1001"));
        assert_eq!(request.email, None);
    }

    #[test]
    fn test_address_object_kept_as_json() {
        let request: RegisterRequest =
            parse_body(br#"{"address":{"street":"Calle 10","city":"Cali"}}"#);

        let address = request.address.unwrap();
        let parsed: Value = serde_json::from_str(&address).unwrap();
        assert_eq!(parsed["city"], "Cali");
    }

    #[test]
    fn test_blank_and_null_fields_are_absent() {
        let request: LoginRequest = parse_body(br#"{"email":"","password":null}"#);

        assert!(request.email.is_none());
        assert!(request.password.is_none());
    }

    #[test]
    fn test_malformed_body_is_empty_request() {
        let request: LoginRequest = parse_body(b"not json");

        assert!(request.email.is_none());
        assert!(request.password.is_none());
    }
}

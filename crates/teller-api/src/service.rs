//! Login and cashier registration
//!
//! [`AuthService`] orchestrates the person, role-type, and user stores. It
//! holds no mutable state: configuration is fixed at construction and every
//! store call is awaited in sequence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use teller_auth::{Argon2Hasher, CredentialHasher, PasswordError, TokenIssuer};
use teller_store::{
    entities::{type_person, user},
    NewPerson, PersonRecord, PersonStore, RoleKind, SeaOrmPersonStore, SeaOrmTypePersonStore,
    SeaOrmUserStore, StoreError, TypePersonStore, UserStore,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{LoginRequest, RegisterRequest};

/// A freshly issued login session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Registration fields once every one of them is known to be present
struct Registration<'a> {
    fullname: &'a str,
    address: &'a str,
    document: &'a str,
    type_document: &'a str,
    email: &'a str,
    password: &'a str,
    phone_number: &'a str,
}

impl<'a> Registration<'a> {
    fn from_request(request: &'a RegisterRequest) -> Result<Self, AuthError> {
        Ok(Self {
            fullname: required(&request.fullname)?,
            address: required(&request.address)?,
            document: required(&request.document)?,
            type_document: required(&request.id_type_document)?,
            email: required(&request.email)?,
            password: required(&request.password)?,
            phone_number: required(&request.phone_number)?,
        })
    }

    fn new_person(&self) -> NewPerson {
        NewPerson {
            fullname: self.fullname.to_string(),
            address: self.address.to_string(),
            document: self.document.to_string(),
            type_document: self.type_document.to_string(),
            email: self.email.to_string(),
            phone_number: self.phone_number.to_string(),
        }
    }
}

fn required(field: &Option<String>) -> Result<&str, AuthError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::MissingParameters),
    }
}

pub struct AuthService {
    persons: Arc<dyn PersonStore>,
    type_persons: Arc<dyn TypePersonStore>,
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(
        config: &AuthConfig,
        persons: Arc<dyn PersonStore>,
        type_persons: Arc<dyn TypePersonStore>,
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            persons,
            type_persons,
            users,
            hasher,
            issuer: TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_validity),
        }
    }

    /// Wire the service to sea-orm stores sharing one connection pool
    pub fn from_database(db: DatabaseConnection, config: &AuthConfig) -> Result<Self, PasswordError> {
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new(config.hash_cost)?);

        Ok(Self::new(
            config,
            Arc::new(SeaOrmPersonStore::new(db.clone())),
            Arc::new(SeaOrmTypePersonStore::new(db.clone())),
            Arc::new(SeaOrmUserStore::new(db, hasher.clone())),
            hasher,
        ))
    }

    /// Authenticate credentials and issue a session token
    ///
    /// The identifier in `email` may also be a document number.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        let email = required(&request.email)?;
        let password = required(&request.password)?;

        let record = self
            .users
            .find_user_by_email_or_document(email, email)
            .await?;

        let Some(record) = record else {
            warn!("Login rejected: no user for identifier");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify(password, &record.user.password)
            .unwrap_or_else(|e| {
                warn!("Stored hash for user {} is unusable: {}", record.user.id, e);
                false
            });

        if !matches {
            warn!("Login rejected: bad password for user {}", record.user.id);
            return Err(AuthError::InvalidCredentials);
        }

        if !record.user.status {
            warn!("Login rejected: user {} is not active", record.user.id);
            return Err(AuthError::UserNotActive);
        }

        let (token, claims) = self.issuer.issue(&record.user.id.to_string())?;
        info!("User {} logged in", record.user.id);

        Ok(Session {
            user_id: record.user.id,
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Gate run ahead of a login: parameters present and account active
    ///
    /// The password is NOT checked here; the next step in the chain must
    /// verify it. An unknown identifier is reported as an inactive account.
    pub async fn check_login_precondition(&self, request: &LoginRequest) -> Result<(), AuthError> {
        let email = required(&request.email)?;
        required(&request.password)?;

        let record = self
            .users
            .find_user_by_email_or_document(email, email)
            .await?;

        match record {
            Some(record) if record.user.status => Ok(()),
            _ => {
                debug!("Login precondition failed: no active account");
                Err(AuthError::UserNotActive)
            }
        }
    }

    /// Register a cashier account, returning the new user's id
    ///
    /// A person already on file under the same document is reused and
    /// granted the cashier role instead of being duplicated.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Uuid, AuthError> {
        let registration = Registration::from_request(request)?;

        let existing_user = self
            .users
            .find_user_by_email_or_document(registration.email, registration.document)
            .await?;

        if existing_user.is_some() {
            warn!("Registration rejected: user already exists");
            return Err(AuthError::UserExist);
        }

        let person = match self
            .persons
            .find_person_by_document(registration.document)
            .await?
        {
            None => self.create_person(&registration).await?,
            Some(existing) if existing.has_role(RoleKind::Cashier.as_str()) => {
                warn!(
                    "Registration rejected: person {} is already a cashier",
                    existing.person.id
                );
                return Err(AuthError::UserExist);
            }
            Some(existing) => {
                self.grant_role(existing.person.id, RoleKind::Cashier)
                    .await?
            }
        };

        let user = self
            .create_user(registration.password, person.person.id)
            .await?;

        info!("Registered user {} for person {}", user.id, person.person.id);

        Ok(user.id)
    }

    async fn resolve_role(&self, role: RoleKind) -> Result<type_person::Model, StoreError> {
        self.type_persons
            .find_by_description(role.as_str())
            .await?
            .ok_or_else(|| StoreError::RoleNotFound(role.to_string()))
    }

    /// Append `role` to an existing person's role set
    async fn grant_role(&self, person_id: Uuid, role: RoleKind) -> Result<PersonRecord, StoreError> {
        let role = self.resolve_role(role).await?;
        self.persons.append_role(person_id, role.id).await
    }

    /// Create a person that starts out holding the cashier role
    async fn create_person(
        &self,
        registration: &Registration<'_>,
    ) -> Result<PersonRecord, StoreError> {
        let cashier = self.resolve_role(RoleKind::Cashier).await?;
        self.persons
            .create_person(registration.new_person(), vec![cashier.id])
            .await
    }

    async fn create_user(&self, password: &str, person_id: Uuid) -> Result<user::Model, StoreError> {
        self.users.create_user(password, person_id).await
    }
}

//! User accounts

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use teller_auth::CredentialHasher;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{person, user};
use crate::error::StoreError;

/// A user joined with the person it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub user: user::Model,
    pub person: person::Model,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user with this login email, or whose person has this
    /// document number
    async fn find_user_by_email_or_document(
        &self,
        email: &str,
        document: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Hash `password` and insert an active user for `person_id`
    ///
    /// The login email is taken from the person. A second user for the same
    /// person, or for a person whose email already belongs to a user, yields
    /// [`StoreError::Conflict`].
    async fn create_user(&self, password: &str, person_id: Uuid)
        -> Result<user::Model, StoreError>;

    /// Activate or deactivate a user
    async fn set_status(&self, id: Uuid, active: bool) -> Result<user::Model, StoreError>;
}

/// sea-orm backed user store
///
/// Password hashing happens here so that a plaintext password never crosses
/// the store boundary into persistence.
#[derive(Clone)]
pub struct SeaOrmUserStore {
    db: DatabaseConnection,
    hasher: Arc<dyn CredentialHasher>,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { db, hasher }
    }
}

fn joined(row: Option<(user::Model, Option<person::Model>)>) -> Option<UserRecord> {
    row.and_then(|(user, person)| person.map(|person| UserRecord { user, person }))
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_user_by_email_or_document(
        &self,
        email: &str,
        document: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        debug!("Looking up user by email or document");

        let row = user::Entity::find()
            .find_also_related(person::Entity)
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email))
                    .add(person::Column::Document.eq(document)),
            )
            .one(&self.db)
            .await?;

        Ok(joined(row))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let row = user::Entity::find_by_id(id)
            .find_also_related(person::Entity)
            .one(&self.db)
            .await?;

        Ok(joined(row))
    }

    async fn create_user(
        &self,
        password: &str,
        person_id: Uuid,
    ) -> Result<user::Model, StoreError> {
        let person = person::Entity::find_by_id(person_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::PersonNotFound(person_id))?;

        let password_hash = self.hasher.hash(password)?;
        let now = Utc::now();

        let created = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(person.email),
            password: Set(password_hash),
            person_id: Set(person_id),
            status: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        debug!("Created user {} for person {}", created.id, person_id);

        Ok(created)
    }

    async fn set_status(&self, id: Uuid, active: bool) -> Result<user::Model, StoreError> {
        let found = user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::UserNotFound(id))?;

        let mut model: user::ActiveModel = found.into();
        model.status = Set(active);
        model.updated_at = Set(Utc::now());

        Ok(model.update(&self.db).await?)
    }
}

//! Person persistence and role grants

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{person, person_type_person, type_person};
use crate::error::StoreError;

/// Fields required to create a person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub fullname: String,
    pub address: String,
    pub document: String,
    pub type_document: String,
    pub email: String,
    pub phone_number: String,
}

/// A person together with its role types, in grant order
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub person: person::Model,
    pub roles: Vec<type_person::Model>,
}

impl PersonRecord {
    pub fn has_role(&self, description: &str) -> bool {
        self.roles.iter().any(|role| role.description == description)
    }
}

#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn find_person_by_document(
        &self,
        document: &str,
    ) -> Result<Option<PersonRecord>, StoreError>;

    async fn find_person_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>, StoreError>;

    /// Insert a person holding `roles` (in that order)
    ///
    /// A person with the same document already present yields
    /// [`StoreError::Conflict`].
    async fn create_person(
        &self,
        person: NewPerson,
        roles: Vec<Uuid>,
    ) -> Result<PersonRecord, StoreError>;

    /// Append a role type to the person's role set
    ///
    /// Granting a role the person already holds yields [`StoreError::Conflict`].
    async fn append_role(
        &self,
        person_id: Uuid,
        type_person_id: Uuid,
    ) -> Result<PersonRecord, StoreError>;
}

/// sea-orm backed person store
#[derive(Clone)]
pub struct SeaOrmPersonStore {
    db: DatabaseConnection,
}

impl SeaOrmPersonStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn load_roles<C: ConnectionTrait>(
    conn: &C,
    person_id: Uuid,
) -> Result<Vec<type_person::Model>, DbErr> {
    let grants = person_type_person::Entity::find()
        .filter(person_type_person::Column::PersonId.eq(person_id))
        .order_by_asc(person_type_person::Column::Position)
        .find_also_related(type_person::Entity)
        .all(conn)
        .await?;

    Ok(grants.into_iter().filter_map(|(_, role)| role).collect())
}

async fn with_roles<C: ConnectionTrait>(
    conn: &C,
    person: Option<person::Model>,
) -> Result<Option<PersonRecord>, DbErr> {
    match person {
        Some(person) => {
            let roles = load_roles(conn, person.id).await?;
            Ok(Some(PersonRecord { person, roles }))
        }
        None => Ok(None),
    }
}

#[async_trait]
impl PersonStore for SeaOrmPersonStore {
    async fn find_person_by_document(
        &self,
        document: &str,
    ) -> Result<Option<PersonRecord>, StoreError> {
        debug!("Looking up person by document");

        let person = person::Entity::find()
            .filter(person::Column::Document.eq(document))
            .one(&self.db)
            .await?;

        Ok(with_roles(&self.db, person).await?)
    }

    async fn find_person_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>, StoreError> {
        let person = person::Entity::find_by_id(id).one(&self.db).await?;

        Ok(with_roles(&self.db, person).await?)
    }

    async fn create_person(
        &self,
        person: NewPerson,
        roles: Vec<Uuid>,
    ) -> Result<PersonRecord, StoreError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let inserted = person::ActiveModel {
            id: Set(Uuid::new_v4()),
            document: Set(person.document),
            fullname: Set(person.fullname),
            address: Set(person.address),
            email: Set(person.email),
            phone_number: Set(person.phone_number),
            type_document: Set(person.type_document),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for (position, type_person_id) in roles.into_iter().enumerate() {
            person_type_person::ActiveModel {
                person_id: Set(inserted.id),
                type_person_id: Set(type_person_id),
                position: Set(position as i32),
                granted_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        let roles = load_roles(&txn, inserted.id).await?;
        txn.commit().await?;

        debug!("Created person {}", inserted.id);

        Ok(PersonRecord {
            person: inserted,
            roles,
        })
    }

    async fn append_role(
        &self,
        person_id: Uuid,
        type_person_id: Uuid,
    ) -> Result<PersonRecord, StoreError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let person = person::Entity::find_by_id(person_id)
            .one(&txn)
            .await?
            .ok_or(StoreError::PersonNotFound(person_id))?;

        let grants = person_type_person::Entity::find()
            .filter(person_type_person::Column::PersonId.eq(person_id))
            .all(&txn)
            .await?;

        if grants.iter().any(|g| g.type_person_id == type_person_id) {
            return Err(StoreError::Conflict(format!(
                "person {} already holds role type {}",
                person_id, type_person_id
            )));
        }

        let position = grants.iter().map(|g| g.position + 1).max().unwrap_or(0);

        person_type_person::ActiveModel {
            person_id: Set(person_id),
            type_person_id: Set(type_person_id),
            position: Set(position),
            granted_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut active: person::ActiveModel = person.into();
        active.updated_at = Set(now);
        let person = active.update(&txn).await?;

        let roles = load_roles(&txn, person_id).await?;
        txn.commit().await?;

        debug!("Granted role type {} to person {}", type_person_id, person_id);

        Ok(PersonRecord { person, roles })
    }
}

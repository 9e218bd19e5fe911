//! Role catalog lookups

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::entities::type_person;
use crate::error::StoreError;

#[async_trait]
pub trait TypePersonStore: Send + Sync {
    /// Find a role type by its description, e.g. `CASHIER`
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<type_person::Model>, StoreError>;

    async fn list(&self) -> Result<Vec<type_person::Model>, StoreError>;
}

/// sea-orm backed role catalog
#[derive(Clone)]
pub struct SeaOrmTypePersonStore {
    db: DatabaseConnection,
}

impl SeaOrmTypePersonStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TypePersonStore for SeaOrmTypePersonStore {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<type_person::Model>, StoreError> {
        debug!("Looking up role type {}", description);

        let found = type_person::Entity::find()
            .filter(type_person::Column::Description.eq(description))
            .one(&self.db)
            .await?;

        Ok(found)
    }

    async fn list(&self) -> Result<Vec<type_person::Model>, StoreError> {
        let all = type_person::Entity::find()
            .order_by_asc(type_person::Column::Description)
            .all(&self.db)
            .await?;

        Ok(all)
    }
}

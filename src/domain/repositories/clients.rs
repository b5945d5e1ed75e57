use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity};

#[async_trait]
#[automock]
pub trait ClientRepository {
    async fn insert(&self, entity: InsertClientEntity) -> Result<Uuid>;
    async fn update(&self, id: Uuid, owner_id: Uuid, changes: UpdateClientEntity) -> Result<usize>;
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<usize>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClientEntity>>;
    async fn list(&self, owner_id: Uuid) -> Result<Vec<ClientEntity>>;
    async fn search_by_name_prefix(
        &self,
        owner_id: Uuid,
        prefix: String,
        limit: i64,
    ) -> Result<Vec<ClientEntity>>;
    async fn search_by_whatsapp_prefix(
        &self,
        owner_id: Uuid,
        prefix: String,
        limit: i64,
    ) -> Result<Vec<ClientEntity>>;
    async fn search_by_instagram_prefix(
        &self,
        owner_id: Uuid,
        prefix: String,
        limit: i64,
    ) -> Result<Vec<ClientEntity>>;
}

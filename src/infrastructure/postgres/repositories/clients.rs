use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity},
        repositories::clients::ClientRepository,
        value_objects::clients::prefix_search_bounds,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::clients},
};

pub struct ClientPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ClientPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClientRepository for ClientPostgres {
    async fn insert(&self, entity: InsertClientEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let client_id = insert_into(clients::table)
            .values(&entity)
            .returning(clients::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(client_id)
    }

    async fn update(&self, id: Uuid, owner_id: Uuid, changes: UpdateClientEntity) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let changed = diesel::update(
            clients::table
                .filter(clients::id.eq(id))
                .filter(clients::owner_id.eq(owner_id)),
        )
        .set(&changes)
        .execute(&mut conn)?;

        Ok(changed)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = diesel::delete(
            clients::table
                .filter(clients::id.eq(id))
                .filter(clients::owner_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let client = clients::table
            .find(id)
            .select(ClientEntity::as_select())
            .first::<ClientEntity>(&mut conn)
            .optional()?;

        Ok(client)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = clients::table
            .filter(clients::owner_id.eq(owner_id))
            .select(ClientEntity::as_select())
            .order(clients::name_lowercase.asc())
            .load::<ClientEntity>(&mut conn)?;

        Ok(results)
    }

    async fn search_by_name_prefix(
        &self,
        owner_id: Uuid,
        prefix: String,
        limit: i64,
    ) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let (lower, upper) = prefix_search_bounds(&prefix);

        let results = clients::table
            .filter(clients::owner_id.eq(owner_id))
            .filter(clients::name_lowercase.ge(lower))
            .filter(clients::name_lowercase.le(upper))
            .select(ClientEntity::as_select())
            .order(clients::name_lowercase.asc())
            .limit(limit)
            .load::<ClientEntity>(&mut conn)?;

        Ok(results)
    }

    async fn search_by_whatsapp_prefix(
        &self,
        owner_id: Uuid,
        prefix: String,
        limit: i64,
    ) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let (lower, upper) = prefix_search_bounds(&prefix);

        let results = clients::table
            .filter(clients::owner_id.eq(owner_id))
            .filter(clients::whatsapp.ge(lower))
            .filter(clients::whatsapp.le(upper))
            .select(ClientEntity::as_select())
            .order(clients::whatsapp.asc())
            .limit(limit)
            .load::<ClientEntity>(&mut conn)?;

        Ok(results)
    }

    async fn search_by_instagram_prefix(
        &self,
        owner_id: Uuid,
        prefix: String,
        limit: i64,
    ) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let (lower, upper) = prefix_search_bounds(&prefix);

        // NULL handles never match a range filter, which is what we want.
        let results = clients::table
            .filter(clients::owner_id.eq(owner_id))
            .filter(clients::instagram.ge(lower))
            .filter(clients::instagram.le(upper))
            .select(ClientEntity::as_select())
            .order(clients::instagram.asc())
            .limit(limit)
            .load::<ClientEntity>(&mut conn)?;

        Ok(results)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{BoolExpressionMethods, OptionalExtension, RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity},
        repositories::payments::PaymentRepository,
        value_objects::{
            clients::prefix_search_bounds, enums::payment_statuses::PaymentStatus,
            payments::ListPaymentsFilter,
        },
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::payments},
};

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn insert(&self, entity: InsertPaymentEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = insert_into(payments::table)
            .values(&entity)
            .returning(payments::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(payment_id)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .filter(payments::id.eq(id))
            .filter(payments::owner_id.eq(owner_id))
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment)
    }

    async fn list(
        &self,
        owner_id: Uuid,
        filter: &ListPaymentsFilter,
    ) -> Result<Vec<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = payments::table
            .select(PaymentEntity::as_select())
            .filter(payments::owner_id.eq(owner_id))
            .into_boxed();

        if let Some(status) = &filter.status {
            query = query.filter(payments::status.eq(status.clone()));
        }

        if let Some(prefix) = &filter.client_name_prefix {
            let (lower, upper) = prefix_search_bounds(prefix);
            query = query
                .filter(payments::client_name_lowercase.ge(lower))
                .filter(payments::client_name_lowercase.le(upper));
        } else {
            if let Some(from) = filter.live_date_from {
                query = query.filter(payments::live_date.ge(from));
            }
            if let Some(to) = filter.live_date_to {
                query = query.filter(payments::live_date.le(to));
            }
        }

        if let Some(cursor) = filter.cursor {
            query = query.filter(
                payments::created_at.lt(cursor.created_at).or(payments::created_at
                    .eq(cursor.created_at)
                    .and(payments::id.lt(cursor.id))),
            );
        }

        let results = query
            .order((payments::created_at.desc(), payments::id.desc()))
            .limit(filter.limit)
            .load::<PaymentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn transition_from_pending(
        &self,
        id: Uuid,
        owner_id: Uuid,
        to_status: String,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let changed = diesel::update(
            payments::table
                .filter(payments::id.eq(id))
                .filter(payments::owner_id.eq(owner_id))
                .filter(payments::status.eq(PaymentStatus::Pending.to_string())),
        )
        .set(payments::status.eq(to_status))
        .execute(&mut conn)?;

        Ok(changed)
    }

    async fn apply_gateway_snapshot(
        &self,
        external_reference: Uuid,
        status: String,
        metadata: serde_json::Value,
    ) -> Result<Option<Uuid>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = diesel::update(payments::table.filter(payments::id.eq(external_reference)))
            .set((
                payments::status.eq(status),
                payments::gateway_metadata.eq(Some(metadata)),
            ))
            .returning(payments::id)
            .get_result::<Uuid>(&mut conn)
            .optional()?;

        Ok(payment_id)
    }

    async fn mark_link_sent(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let changed = diesel::update(
            payments::table
                .filter(payments::id.eq(id))
                .filter(payments::owner_id.eq(owner_id))
                .filter(payments::link_sent_at.is_null()),
        )
        .set(payments::link_sent_at.eq(Some(at)))
        .execute(&mut conn)?;

        Ok(changed)
    }

    async fn mark_charge_sent(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let changed = diesel::update(
            payments::table
                .filter(payments::id.eq(id))
                .filter(payments::owner_id.eq(owner_id))
                .filter(payments::charge_sent_at.is_null()),
        )
        .set(payments::charge_sent_at.eq(Some(at)))
        .execute(&mut conn)?;

        Ok(changed)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = diesel::delete(
            payments::table
                .filter(payments::id.eq(id))
                .filter(payments::owner_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity};
use crate::domain::value_objects::payments::ListPaymentsFilter;

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn insert(&self, entity: InsertPaymentEntity) -> Result<Uuid>;
    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<PaymentEntity>>;
    async fn list(&self, owner_id: Uuid, filter: &ListPaymentsFilter)
    -> Result<Vec<PaymentEntity>>;

    /// Conditional update: only rows still in `pending` are touched. Returns
    /// the number of rows changed so callers can distinguish a won race from
    /// a lost one.
    async fn transition_from_pending(
        &self,
        id: Uuid,
        owner_id: Uuid,
        to_status: String,
    ) -> Result<usize>;

    /// Unconditional last-writer-wins overwrite of `status` and
    /// `gateway_metadata` for the payment whose id equals the gateway's
    /// external reference. Returns the payment id when a row matched.
    async fn apply_gateway_snapshot(
        &self,
        external_reference: Uuid,
        status: String,
        metadata: serde_json::Value,
    ) -> Result<Option<Uuid>>;

    /// Sets the timestamp only when currently unset; repeated calls are
    /// no-ops (the marker is monotonic and never cleared).
    async fn mark_link_sent(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<usize>;
    async fn mark_charge_sent(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<usize>;

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<usize>;
}

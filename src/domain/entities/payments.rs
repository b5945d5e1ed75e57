use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payments;

#[derive(Debug, Clone, Serialize, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub client_name_lowercase: String,
    pub whatsapp: String,
    pub instagram: Option<String>,
    pub amount_minor: i64,
    pub description: String,
    pub live_date: NaiveDate,
    pub status: String,
    pub payment_link: String,
    pub gateway_metadata: Option<serde_json::Value>,
    pub link_sent_at: Option<DateTime<Utc>>,
    pub charge_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a freshly created charge. The id is generated before the
/// gateway call so it can travel as the external reference, and the row is
/// only written once a checkout link exists.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub client_name_lowercase: String,
    pub whatsapp: String,
    pub instagram: Option<String>,
    pub amount_minor: i64,
    pub description: String,
    pub live_date: NaiveDate,
    pub status: String,
    pub payment_link: String,
    pub created_at: DateTime<Utc>,
}

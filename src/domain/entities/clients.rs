use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::clients;

#[derive(Debug, Clone, Serialize, Identifiable, Selectable, Queryable)]
#[diesel(table_name = clients)]
pub struct ClientEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub name_lowercase: String,
    pub whatsapp: String,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub struct InsertClientEntity {
    pub owner_id: Uuid,
    pub name: String,
    pub name_lowercase: String,
    pub whatsapp: String,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

// `name_lowercase` is always recomputed alongside `name`; a changeset that
// touched one without the other would break prefix search.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateClientEntity {
    pub name: String,
    pub name_lowercase: String,
    pub whatsapp: String,
    pub instagram: Option<String>,
}

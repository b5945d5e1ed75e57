use anyhow::{Result, bail};
use chrono::Utc;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::domain::entities::clients::{InsertClientEntity, UpdateClientEntity};

pub const SEARCH_RESULT_LIMIT: i64 = 10;
pub const MAX_SEARCH_TERM_LEN: usize = 128;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveClientModel {
    pub name: String,
    pub whatsapp: String,
    pub instagram: Option<String>,
}

impl SaveClientModel {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("name is required");
        }
        if self.whatsapp.trim().is_empty() {
            bail!("whatsapp is required");
        }
        Ok(())
    }

    pub fn to_insert_entity(&self, owner_id: Uuid) -> InsertClientEntity {
        let name = self.name.trim().to_string();
        InsertClientEntity {
            owner_id,
            name_lowercase: name.to_lowercase(),
            name,
            whatsapp: self.whatsapp.trim().to_string(),
            instagram: self
                .instagram
                .as_deref()
                .and_then(normalize_instagram_handle),
            created_at: Utc::now(),
        }
    }

    pub fn to_update_entity(&self) -> UpdateClientEntity {
        let name = self.name.trim().to_string();
        UpdateClientEntity {
            name_lowercase: name.to_lowercase(),
            name,
            whatsapp: self.whatsapp.trim().to_string(),
            instagram: self
                .instagram
                .as_deref()
                .and_then(normalize_instagram_handle),
        }
    }
}

/// Reduces whatever the operator typed (profile URL, `@handle`, bare handle)
/// to a bare Instagram handle. Returns `None` when nothing usable remains.
pub fn normalize_instagram_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains("instagram.com") {
        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };
        if let Ok(url) = Url::parse(&with_scheme) {
            // The handle is the first path segment; anything after it is a
            // sub-page like /reels or /tagged.
            if let Some(handle) = url.path().split('/').find(|segment| !segment.is_empty()) {
                return Some(handle.to_string());
            }
        }
    }

    let handle = trimmed.trim_start_matches('@').trim();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}

/// Inclusive lexicographic bounds for a prefix range scan: everything between
/// `prefix` and `prefix` followed by the highest code point sorts as a prefix
/// match.
pub fn prefix_search_bounds(prefix: &str) -> (String, String) {
    let lower = prefix.to_string();
    let upper = format!("{}{}", prefix, char::MAX);
    (lower, upper)
}

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 30;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Request body for creating a collection charge. `value` is the decimal BRL
/// amount the operator typed; it is converted to centavos before anything
/// touches the store or the gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeModel {
    pub client_id: Uuid,
    pub value: f64,
    pub description: String,
    pub live_date: NaiveDate,
}

impl CreateChargeModel {
    pub fn validate(&self) -> Result<()> {
        if !self.value.is_finite() || self.value <= 0.0 {
            bail!("value must be a positive amount");
        }
        if self.description.trim().is_empty() {
            bail!("description is required");
        }
        Ok(())
    }

    pub fn amount_minor(&self) -> i64 {
        (self.value * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListPaymentsFilter {
    pub status: Option<String>,
    /// Case-insensitive prefix over the denormalized client name. When set,
    /// the live-date bounds are ignored (mirrors the dashboard behavior).
    pub client_name_prefix: Option<String>,
    pub live_date_from: Option<NaiveDate>,
    pub live_date_to: Option<NaiveDate>,
    pub cursor: Option<PaymentsCursor>,
    pub limit: i64,
}

/// Keyset cursor over the `created_at desc, id desc` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentsCursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge(value: f64, description: &str) -> CreateChargeModel {
        CreateChargeModel {
            client_id: Uuid::new_v4(),
            value,
            description: description.to_string(),
            live_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn value_is_converted_to_centavos() {
        assert_eq!(charge(150.00, "Aula").amount_minor(), 15000);
        assert_eq!(charge(0.01, "Aula").amount_minor(), 1);
        assert_eq!(charge(19.99, "Aula").amount_minor(), 1999);
    }

    #[test]
    fn non_positive_or_non_finite_values_are_rejected() {
        assert!(charge(0.0, "Aula").validate().is_err());
        assert!(charge(-5.0, "Aula").validate().is_err());
        assert!(charge(f64::NAN, "Aula").validate().is_err());
        assert!(charge(f64::INFINITY, "Aula").validate().is_err());
    }

    #[test]
    fn blank_description_is_rejected() {
        assert!(charge(150.0, "  ").validate().is_err());
        assert!(charge(150.0, "Aula").validate().is_ok());
    }
}

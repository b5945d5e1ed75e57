use uuid::Uuid;

/// Everything the gateway needs to mint a hosted checkout preference for a
/// single-item charge.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePreferenceModel {
    pub title: String,
    pub amount_minor: i64,
    pub payer_name: String,
    pub external_reference: Uuid,
}

impl CreatePreferenceModel {
    /// The gateway API speaks decimal currency units.
    pub fn unit_price(&self) -> f64 {
        self.amount_minor as f64 / 100.0
    }
}

/// Authoritative payment state as reported by the gateway's lookup API. The
/// raw document is kept wholesale so reconciliation can store it without
/// caring about the gateway's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayPaymentInfo {
    pub status: String,
    pub external_reference: Option<String>,
    pub raw: serde_json::Value,
}

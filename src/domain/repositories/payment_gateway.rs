use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::gateway::{CreatePreferenceModel, GatewayPaymentInfo};

/// External hosted-checkout gateway. Two calls are consumed: minting a
/// checkout preference at charge creation, and looking up authoritative
/// payment state during webhook reconciliation.
#[async_trait]
#[automock]
pub trait PaymentGateway {
    async fn create_preference(&self, preference: CreatePreferenceModel) -> Result<String>;
    async fn get_payment(&self, gateway_payment_id: &str) -> Result<GatewayPaymentInfo>;
}

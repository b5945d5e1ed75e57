use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    repositories::{payment_gateway::PaymentGateway, payments::PaymentRepository},
    value_objects::{
        enums::payment_statuses::PaymentStatus, gateway_notification::GatewayNotification,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// Not a payment event, or the payload carried no id.
    Ignored,
    /// The gateway lookup did not resolve to a payment we know about.
    NoMatchingPayment,
    Reconciled {
        payment_id: Uuid,
        status: PaymentStatus,
    },
}

/// Asynchronous half of the payment lifecycle. The notification payload is
/// advisory only: the authoritative status is re-fetched from the gateway and
/// overwritten into the local record wholesale, so duplicate or out-of-order
/// deliveries converge on whatever the gateway currently reports.
pub struct GatewayWebhookUseCase<P, G>
where
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    payment_repository: Arc<P>,
    gateway: Arc<G>,
}

impl<P, G> GatewayWebhookUseCase<P, G>
where
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(payment_repository: Arc<P>, gateway: Arc<G>) -> Self {
        Self {
            payment_repository,
            gateway,
        }
    }

    pub async fn handle_notification(
        &self,
        notification: GatewayNotification,
    ) -> Result<ReconciliationOutcome> {
        let Some(gateway_payment_id) = notification.payment_event_id() else {
            info!(
                event_type = ?notification.event_type,
                "gateway_webhook: ignoring non-payment notification"
            );
            return Ok(ReconciliationOutcome::Ignored);
        };

        info!(%gateway_payment_id, "gateway_webhook: payment notification received");

        let payment_info = self.gateway.get_payment(&gateway_payment_id).await?;

        let Some(reference) = payment_info.external_reference.as_deref() else {
            warn!(
                %gateway_payment_id,
                "gateway_webhook: lookup carried no external reference"
            );
            return Ok(ReconciliationOutcome::NoMatchingPayment);
        };

        let Ok(payment_id) = Uuid::parse_str(reference) else {
            // References minted elsewhere (other systems, gateway test
            // traffic) are not ours to reconcile.
            info!(
                %gateway_payment_id,
                reference, "gateway_webhook: foreign external reference"
            );
            return Ok(ReconciliationOutcome::NoMatchingPayment);
        };

        let status = PaymentStatus::parse(&payment_info.status);

        match self
            .payment_repository
            .apply_gateway_snapshot(
                payment_id,
                payment_info.status.clone(),
                payment_info.raw.clone(),
            )
            .await?
        {
            Some(reconciled_id) => {
                info!(
                    payment_id = %reconciled_id,
                    status = %status,
                    "gateway_webhook: payment reconciled"
                );
                Ok(ReconciliationOutcome::Reconciled {
                    payment_id: reconciled_id,
                    status,
                })
            }
            None => {
                info!(
                    %payment_id,
                    "gateway_webhook: reference matches no stored payment"
                );
                Ok(ReconciliationOutcome::NoMatchingPayment)
            }
        }
    }
}

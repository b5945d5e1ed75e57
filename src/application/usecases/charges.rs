use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::payments::InsertPaymentEntity,
    repositories::{
        clients::ClientRepository, payment_gateway::PaymentGateway, payments::PaymentRepository,
    },
    value_objects::{
        enums::payment_statuses::PaymentStatus, gateway::CreatePreferenceModel,
        payments::CreateChargeModel,
    },
};

#[derive(Debug, Error)]
pub enum ChargeError {
    #[error("invalid charge request: {0}")]
    InvalidArgument(String),
    #[error("client not found")]
    ClientNotFound,
    #[error("client belongs to another account")]
    PermissionDenied,
    #[error("failed to create the charge")]
    Internal(#[source] anyhow::Error),
}

/// Synchronous half of the payment lifecycle: validates the request, checks
/// client ownership, asks the gateway for a hosted checkout link and only
/// then persists the `pending` payment record. A gateway failure therefore
/// leaves no partial row behind.
pub struct ChargeUseCase<C, P, G>
where
    C: ClientRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    client_repository: Arc<C>,
    payment_repository: Arc<P>,
    gateway: Arc<G>,
}

impl<C, P, G> ChargeUseCase<C, P, G>
where
    C: ClientRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(client_repository: Arc<C>, payment_repository: Arc<P>, gateway: Arc<G>) -> Self {
        Self {
            client_repository,
            payment_repository,
            gateway,
        }
    }

    pub async fn create_charge(
        &self,
        owner_id: Uuid,
        model: CreateChargeModel,
    ) -> Result<String, ChargeError> {
        info!(
            %owner_id,
            client_id = %model.client_id,
            "charges: create requested"
        );

        model.validate().map_err(|err| {
            warn!(%owner_id, error = %err, "charges: invalid request");
            ChargeError::InvalidArgument(err.to_string())
        })?;

        let client = self
            .client_repository
            .find_by_id(model.client_id)
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "charges: failed to load client");
                ChargeError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%owner_id, client_id = %model.client_id, "charges: client not found");
                ChargeError::ClientNotFound
            })?;

        if client.owner_id != owner_id {
            warn!(
                %owner_id,
                client_id = %client.id,
                "charges: client owned by another account"
            );
            return Err(ChargeError::PermissionDenied);
        }

        // The payment id doubles as the gateway external reference; minting
        // it before the gateway call lets the webhook correlate back to us.
        let payment_id = Uuid::new_v4();
        let description = model.description.trim().to_string();

        let preference = CreatePreferenceModel {
            title: description.clone(),
            amount_minor: model.amount_minor(),
            payer_name: client.name.clone(),
            external_reference: payment_id,
        };

        let payment_link = self
            .gateway
            .create_preference(preference)
            .await
            .map_err(|err| {
                error!(
                    %owner_id,
                    %payment_id,
                    gateway_error = ?err,
                    "charges: gateway preference creation failed"
                );
                ChargeError::Internal(err)
            })?;

        let insert_entity = InsertPaymentEntity {
            id: payment_id,
            owner_id,
            client_id: client.id,
            client_name: client.name.clone(),
            client_name_lowercase: client.name_lowercase.clone(),
            whatsapp: client.whatsapp.clone(),
            instagram: client.instagram.clone(),
            amount_minor: model.amount_minor(),
            description,
            live_date: model.live_date,
            status: PaymentStatus::Pending.to_string(),
            payment_link: payment_link.clone(),
            created_at: Utc::now(),
        };

        self.payment_repository
            .insert(insert_entity)
            .await
            .map_err(|err| {
                error!(%owner_id, %payment_id, db_error = ?err, "charges: failed to persist payment");
                ChargeError::Internal(err)
            })?;

        info!(%owner_id, %payment_id, "charges: charge created");
        Ok(payment_link)
    }
}

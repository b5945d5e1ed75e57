use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;

use crate::{
    application::usecases::charges::ChargeUseCase,
    auth::AuthUser,
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{
            clients::ClientRepository, payment_gateway::PaymentGateway,
            payments::PaymentRepository,
        },
        value_objects::payments::CreateChargeModel,
    },
    infrastructure::{
        axum_http::error_responses::AppError,
        gateway::mercado_pago::MercadoPagoClient,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{clients::ClientPostgres, payments::PaymentPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let gateway = MercadoPagoClient::new(config.mercado_pago.clone());
    let charge_usecase = ChargeUseCase::new(
        Arc::new(client_repository),
        Arc::new(payment_repository),
        Arc::new(gateway),
    );

    Router::new()
        .route("/", post(create_charge))
        .with_state(Arc::new(charge_usecase))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeResponse {
    pub checkout_url: String,
}

pub async fn create_charge<C, P, G>(
    State(charge_usecase): State<Arc<ChargeUseCase<C, P, G>>>,
    auth: AuthUser,
    Json(create_charge_model): Json<CreateChargeModel>,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let checkout_url = charge_usecase
        .create_charge(auth.user_id, create_charge_model)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateChargeResponse { checkout_url }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_response_serializes_the_checkout_url_field() {
        let response = CreateChargeResponse {
            checkout_url: "https://gateway.test/checkout/abc".to_string(),
        };

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"checkoutUrl": "https://gateway.test/checkout/abc"})
        );
    }
}

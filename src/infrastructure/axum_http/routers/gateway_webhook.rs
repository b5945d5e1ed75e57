use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{error, info};

use crate::{
    application::usecases::gateway_webhook::GatewayWebhookUseCase,
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{payment_gateway::PaymentGateway, payments::PaymentRepository},
        value_objects::gateway_notification::GatewayNotification,
    },
    infrastructure::{
        gateway::mercado_pago::MercadoPagoClient,
        postgres::{postgres_connection::PgPoolSquad, repositories::payments::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let gateway = MercadoPagoClient::new(config.mercado_pago.clone());
    let gateway_webhook_usecase =
        GatewayWebhookUseCase::new(Arc::new(payment_repository), Arc::new(gateway));

    Router::new()
        .route("/", post(receive_notification))
        .with_state(Arc::new(gateway_webhook_usecase))
}

/// Notifications are unauthenticated and the payload is advisory only; the
/// usecase re-fetches state from the gateway. Any 2xx stops redelivery, any
/// 5xx solicits another attempt. The body is taken raw so an unparseable
/// payload gets a 200 no-op instead of a 4xx rejection from the extractor.
pub async fn receive_notification<P, G>(
    State(gateway_webhook_usecase): State<Arc<GatewayWebhookUseCase<P, G>>>,
    body: Bytes,
) -> impl IntoResponse
where
    P: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let notification = match serde_json::from_slice::<GatewayNotification>(&body) {
        Ok(notification) => notification,
        Err(err) => {
            info!(parse_error = %err, "gateway_webhook: unparseable payload acknowledged");
            return (StatusCode::OK, "OK").into_response();
        }
    };

    match gateway_webhook_usecase.handle_notification(notification).await {
        Ok(_) => (StatusCode::OK, "OK").into_response(),
        Err(err) => {
            error!(error = ?err, "gateway_webhook: notification handling failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::repositories::{
        payment_gateway::MockPaymentGateway, payments::MockPaymentRepository,
    };

    fn usecase_with(
        payment_repo: MockPaymentRepository,
        gateway: MockPaymentGateway,
    ) -> Arc<GatewayWebhookUseCase<MockPaymentRepository, MockPaymentGateway>> {
        Arc::new(GatewayWebhookUseCase::new(
            Arc::new(payment_repo),
            Arc::new(gateway),
        ))
    }

    #[tokio::test]
    async fn unparseable_payloads_are_acknowledged_with_200() {
        let payment_repo = MockPaymentRepository::new();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_get_payment().times(0);
        let usecase = usecase_with(payment_repo, gateway);

        for body in ["not json at all", "[1,2]", "\"payment\"", "42", ""] {
            let response =
                receive_notification(State(Arc::clone(&usecase)), Bytes::from(body.to_string()))
                    .await
                    .into_response();
            assert_eq!(response.status(), StatusCode::OK, "body: {body}");
        }
    }

    #[tokio::test]
    async fn non_payment_events_are_acknowledged_with_200() {
        let payment_repo = MockPaymentRepository::new();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_get_payment().times(0);
        let usecase = usecase_with(payment_repo, gateway);

        let response = receive_notification(
            State(usecase),
            Bytes::from_static(br#"{"type":"merchant_order","data":{"id":"abc"}}"#),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn gateway_failure_answers_500_to_solicit_redelivery() {
        let payment_repo = MockPaymentRepository::new();
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_get_payment()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("gateway timeout")) }));
        let usecase = usecase_with(payment_repo, gateway);

        let response = receive_notification(
            State(usecase),
            Bytes::from_static(br#"{"type":"payment","data":{"id":"abc"}}"#),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

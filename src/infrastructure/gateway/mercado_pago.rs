use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{
    config::config_model::MercadoPago,
    domain::{
        repositories::payment_gateway::PaymentGateway,
        value_objects::gateway::{CreatePreferenceModel, GatewayPaymentInfo},
    },
};

/// Minimal Mercado Pago client built on reqwest.
pub struct MercadoPagoClient {
    http: reqwest::Client,
    config: MercadoPago,
}

#[derive(Debug, Deserialize)]
struct MercadoPagoErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
    status: Option<i64>,
}

impl MercadoPagoClient {
    pub fn new(config: MercadoPago) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (mp_error_message, mp_error_code, mp_error_status) =
            match serde_json::from_str::<MercadoPagoErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.message, envelope.error, envelope.status),
                Err(_) => (None, None, None),
            };

        error!(
            status = %status,
            mp_request_id = ?request_id,
            mp_error_message = ?mp_error_message,
            mp_error_code = ?mp_error_code,
            mp_error_status = ?mp_error_status,
            response_body = %body,
            context = %context,
            "mercado pago api request failed"
        );

        anyhow::bail!(
            "Mercado Pago API request failed: {} (status {}, request_id={:?})",
            context,
            status,
            request_id
        );
    }
}

/// Builds the checkout preference payload.
/// https://www.mercadopago.com.br/developers/en/reference/preferences/_checkout_preferences/post
fn build_preference_body(
    preference: &CreatePreferenceModel,
    config: &MercadoPago,
) -> serde_json::Value {
    json!({
        "items": [{
            "title": preference.title,
            "quantity": 1,
            "currency_id": "BRL",
            "unit_price": preference.unit_price(),
        }],
        "payer": {
            "name": preference.payer_name,
        },
        "external_reference": preference.external_reference.to_string(),
        "notification_url": config.notification_url,
        "back_urls": {
            "success": config.back_urls.success,
            "failure": config.back_urls.failure,
            "pending": config.back_urls.pending,
        },
        "auto_return": "approved",
    })
}

/// Extracts the fields reconciliation cares about, keeping the full payload
/// verbatim so it can be stored alongside the payment.
fn parse_payment_info(raw: serde_json::Value) -> Result<GatewayPaymentInfo> {
    let status = raw
        .get("status")
        .and_then(|value| value.as_str())
        .ok_or_else(|| anyhow::anyhow!("payment lookup response has no status"))?
        .to_string();
    let external_reference = raw
        .get("external_reference")
        .and_then(|value| value.as_str())
        .map(|value| value.to_string());

    Ok(GatewayPaymentInfo {
        status,
        external_reference,
        raw,
    })
}

#[async_trait]
impl PaymentGateway for MercadoPagoClient {
    async fn create_preference(&self, preference: CreatePreferenceModel) -> Result<String> {
        let body = build_preference_body(&preference, &self.config);

        let resp = self
            .http
            .post(format!("{}/checkout/preferences", self.config.base_url))
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.access_token),
            )
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create preference").await?;

        #[derive(Deserialize)]
        struct PreferenceResp {
            init_point: Option<String>,
        }

        let parsed: PreferenceResp = resp.json().await?;
        parsed
            .init_point
            .ok_or_else(|| anyhow::anyhow!("Mercado Pago preference init_point is missing"))
    }

    async fn get_payment(&self, gateway_payment_id: &str) -> Result<GatewayPaymentInfo> {
        // https://www.mercadopago.com.br/developers/en/reference/payments/_payments_id/get
        let resp = self
            .http
            .get(format!(
                "{}/v1/payments/{}",
                self.config.base_url, gateway_payment_id
            ))
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.config.access_token),
            )
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "get payment").await?;

        let raw: serde_json::Value = resp.json().await?;
        parse_payment_info(raw)
    }
}

use anyhow::Result;

use super::config_model::{Auth, BackUrls, Database, DotEnvyConfig, MercadoPago, Server};

const DEFAULT_MERCADO_PAGO_BASE_URL: &str = "https://api.mercadopago.com";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let auth = Auth {
        jwt_secret: std::env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET is invalid"),
    };

    let mercado_pago = MercadoPago {
        access_token: std::env::var("MERCADO_PAGO_ACCESS_TOKEN")
            .expect("MERCADO_PAGO_ACCESS_TOKEN is invalid"),
        base_url: std::env::var("MERCADO_PAGO_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MERCADO_PAGO_BASE_URL.to_string()),
        notification_url: std::env::var("MERCADO_PAGO_NOTIFICATION_URL")
            .expect("MERCADO_PAGO_NOTIFICATION_URL is invalid"),
        back_urls: BackUrls {
            success: std::env::var("MERCADO_PAGO_BACK_URL_SUCCESS")
                .expect("MERCADO_PAGO_BACK_URL_SUCCESS is invalid"),
            failure: std::env::var("MERCADO_PAGO_BACK_URL_FAILURE")
                .expect("MERCADO_PAGO_BACK_URL_FAILURE is invalid"),
            pending: std::env::var("MERCADO_PAGO_BACK_URL_PENDING")
                .expect("MERCADO_PAGO_BACK_URL_PENDING is invalid"),
        },
    };

    Ok(DotEnvyConfig {
        server,
        database,
        auth,
        mercado_pago,
    })
}

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub auth: Auth,
    pub mercado_pago: MercadoPago,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct MercadoPago {
    pub access_token: String,
    pub base_url: String,
    /// Public URL the gateway posts payment notifications to.
    pub notification_url: String,
    pub back_urls: BackUrls,
}

#[derive(Debug, Clone)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

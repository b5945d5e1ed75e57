pub mod charges;
pub mod clients;
pub mod gateway_webhook;
pub mod payment_dashboard;

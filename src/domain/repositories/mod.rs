pub mod clients;
pub mod payment_gateway;
pub mod payments;

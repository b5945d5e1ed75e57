pub mod clients;
pub mod enums;
pub mod gateway;
pub mod gateway_notification;
pub mod payments;

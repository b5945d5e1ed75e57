pub mod clients;
pub mod payments;

// --- File: crates/meetly_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod service;
#[cfg(test)]
mod service_proptest;

pub use auth::{create_connector, hub_for_token, ConnectorError, HubType};
pub use service::GoogleCalendarService;

// File: crates/meetly_gcal/src/auth.rs
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    CalendarHub,
};
use thiserror::Error;

// Type aliases for clarity
pub type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

/// A calendar hub authorized with a plain bearer token.
pub type HubType = CalendarHub<Connector>;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("failed to load native root certificates: {0}")]
    NativeRoots(#[from] std::io::Error),
}

/// Builds the HTTPS connector shared by every hub this crate creates.
pub fn create_connector() -> Result<Connector, ConnectorError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();
    Ok(https)
}

/// Creates a hub that sends `access_token` as its bearer credential.
///
/// Tokens are delegated per calendar owner and short-lived, so a hub is built
/// for every call instead of being kept around.
pub fn hub_for_token(connector: &Connector, access_token: &str) -> HubType {
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector.clone());
    CalendarHub::new(client, access_token.to_string())
}

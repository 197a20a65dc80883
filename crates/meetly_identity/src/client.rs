//! Identity provider client.
//!
//! The application does not run its own OAuth flow against Google. Users link
//! their Google account through a hosted identity provider, which keeps the
//! refresh token and hands out short-lived access tokens on request:
//!
//! ```text
//! GET {api_base_url}/users/{external_id}/oauth_access_tokens/{provider}
//! Authorization: Bearer {secret_key}
//! ```
//!
//! The response lists the access tokens of the linked account(s); an empty
//! list means the user never linked one.

use async_trait::async_trait;
use meetly_common::services::{AuthTokenProvider, TokenError};
use meetly_config::IdentityConfig;
use reqwest::{header, Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

/// Provider error codes meaning the link exists but no usable token can be
/// issued until the user reauthorizes.
pub const REAUTH_ERROR_CODES: &[&str] = &[
    "oauth_token_retrieval_error",
    "oauth_missing_refresh_token",
];

/// One access token as returned by the provider.
#[derive(Debug, Deserialize)]
pub struct OAuthAccessToken {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
}

/// The token listing, either a bare array or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenListing {
    Plain(Vec<OAuthAccessToken>),
    Paginated { data: Vec<OAuthAccessToken> },
}

impl TokenListing {
    fn into_tokens(self) -> Vec<OAuthAccessToken> {
        match self {
            TokenListing::Plain(tokens) => tokens,
            TokenListing::Paginated { data } => data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    code: String,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the identity provider's backend API.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: Client,
    config: IdentityConfig,
}

impl IdentityClient {
    /// Creates a client with the workspace's default HTTP settings.
    pub fn new(config: IdentityConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(meetly_common::default_client()?, config))
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: IdentityConfig) -> Self {
        Self { client, config }
    }

    /// Token endpoint of `external_id`. Path segments are percent-encoded,
    /// so an id cannot escape its segment.
    fn token_url(&self, external_id: &str) -> Result<Url, TokenError> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            TokenError::Other(format!("invalid identity provider URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                TokenError::Other("identity provider URL cannot have a path".to_string())
            })?
            .pop_if_empty()
            .extend([
                "users",
                external_id,
                "oauth_access_tokens",
                self.config.provider.as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl AuthTokenProvider for IdentityClient {
    async fn get_token(&self, external_id: &str) -> Result<String, TokenError> {
        let secret = self
            .config
            .secret_key
            .as_deref()
            .ok_or_else(|| {
                TokenError::Other("identity provider secret key is not configured".to_string())
            })?;

        let url = self.token_url(external_id)?;
        debug!(
            "Requesting {} access token for user {}",
            self.config.provider, external_id
        );

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", secret))
            .send()
            .await
            .map_err(|e| TokenError::Other(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TokenError::Other(e.to_string()))?;

        if !status.is_success() {
            let err = classify_error_response(status, &body);
            warn!(
                "Identity provider refused token for user {}: {}",
                external_id, err
            );
            return Err(err);
        }

        let listing: TokenListing = serde_json::from_str(&body)
            .map_err(|e| TokenError::Other(format!("unexpected token listing: {}", e)))?;

        listing
            .into_tokens()
            .into_iter()
            .find_map(|t| t.token.filter(|token| !token.is_empty()))
            .ok_or(TokenError::NoConnection)
    }
}

/// Maps a non-success provider response to a [`TokenError`].
pub fn classify_error_response(status: StatusCode, body: &str) -> TokenError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let entries = parsed.map(|b| b.errors).unwrap_or_default();

    if let Some(entry) = entries
        .iter()
        .find(|e| REAUTH_ERROR_CODES.contains(&e.code.as_str()))
    {
        return TokenError::TokenRetrieval(
            entry.message.clone().unwrap_or_else(|| entry.code.clone()),
        );
    }

    let detail = entries
        .first()
        .map(|e| e.message.clone().unwrap_or_else(|| e.code.clone()))
        .unwrap_or_else(|| body.chars().take(200).collect());
    TokenError::Other(format!("HTTP {}: {}", status.as_u16(), detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(api_base_url: &str) -> IdentityClient {
        IdentityClient::with_client(
            Client::new(),
            IdentityConfig {
                api_base_url: api_base_url.to_string(),
                ..IdentityConfig::default()
            },
        )
    }

    #[test]
    fn test_token_url_trims_trailing_slash() {
        let client = client_with_base("https://idp.example.com/v1/");
        assert_eq!(
            client.token_url("user_123").unwrap().as_str(),
            "https://idp.example.com/v1/users/user_123/oauth_access_tokens/oauth_google"
        );
    }

    #[test]
    fn test_token_url_keeps_id_in_one_segment() {
        let client = client_with_base("https://idp.example.com/v1");
        let url = client.token_url("../admin?x=1#frag").unwrap();

        assert_eq!(
            url.as_str(),
            concat!(
                "https://idp.example.com/v1/users/..%2Fadmin%3Fx=1%23frag",
                "/oauth_access_tokens/oauth_google"
            )
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.path_segments().unwrap().count(), 5);
    }

    #[test]
    fn test_token_url_rejects_invalid_base() {
        let client = client_with_base("not a url");
        assert!(matches!(client.token_url("user_1"), Err(TokenError::Other(_))));
    }

    #[test]
    fn test_retrieval_error_code_requires_reauth() {
        let body = r#"{"errors":[{"code":"oauth_token_retrieval_error","message":"refresh token revoked"}]}"#;
        assert_eq!(
            classify_error_response(StatusCode::UNPROCESSABLE_ENTITY, body),
            TokenError::TokenRetrieval("refresh token revoked".to_string())
        );
    }

    #[test]
    fn test_unknown_error_code_is_other() {
        let body = r#"{"errors":[{"code":"resource_not_found"}]}"#;
        assert_eq!(
            classify_error_response(StatusCode::NOT_FOUND, body),
            TokenError::Other("HTTP 404: resource_not_found".to_string())
        );
    }

    #[test]
    fn test_non_json_error_body_is_other() {
        match classify_error_response(StatusCode::BAD_GATEWAY, "upstream down") {
            TokenError::Other(msg) => assert_eq!(msg, "HTTP 502: upstream down"),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let plain: TokenListing = serde_json::from_str(r#"[{"token":"a"}]"#).unwrap();
        let paged: TokenListing = serde_json::from_str(r#"{"data":[{"token":"b"}]}"#).unwrap();
        assert_eq!(plain.into_tokens()[0].token.as_deref(), Some("a"));
        assert_eq!(paged.into_tokens()[0].token.as_deref(), Some("b"));
    }
}

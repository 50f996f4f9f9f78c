//! JWT authenticators.
//!
//! There is no key here. The transaction digest is sent to the session
//! service as a custom claim, and the JWT it mints is the proof; the account
//! contract checks the JWT, so trust rests entirely with that service.
//!
//! ```text
//! POST {base}/sessions/authenticate
//! { "session_token", "session_duration_minutes",
//!   "session_custom_claims": { "transaction_hash": base64(SHA256(sign doc)) } }
//! -> { "session_jwt": "..." }
//! ```

use aa_codec::format::to_base64;
use async_trait::async_trait;
use chain_cosmos::tx::SignDoc;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{abstract_account_entry, sign_doc_digest, SigningStrategy};
use crate::config::JwtSignerConfig;
use crate::error::AaError;
use crate::types::{AAccountData, AuthenticatorKind};

const SERVICE: &str = "auth";

/// Status and body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON-over-HTTP POST. Errors only for transport failures; any status is a
/// successful exchange.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, AaError>;
}

/// [`AuthTransport`] over `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpAuthTransport {
    client: Client,
}

impl HttpAuthTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthTransport for HttpAuthTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, AaError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AaError::external(SERVICE, format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AaError::external(SERVICE, format!("failed to read body: {e}")))?;
        Ok(TransportResponse { status, body })
    }
}

#[derive(Deserialize)]
struct SessionAuthenticateResponse {
    session_jwt: Option<String>,
}

pub struct JwtStrategy<T> {
    transport: T,
    config: JwtSignerConfig,
    session_token: Option<SecretString>,
}

impl<T: AuthTransport> JwtStrategy<T> {
    pub fn new(transport: T, config: JwtSignerConfig) -> Self {
        Self {
            transport,
            config,
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.set_session_token(token);
        self
    }

    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = Some(SecretString::from(token.into()));
    }

    pub fn clear_session_token(&mut self) {
        self.session_token = None;
    }

    pub fn has_session_token(&self) -> bool {
        self.session_token.is_some()
    }

    /// Exchanges `transaction_hash` for a session JWT.
    async fn authenticate(&self, transaction_hash: &str) -> Result<String, AaError> {
        let token = self
            .session_token
            .as_ref()
            .ok_or_else(|| AaError::ProtocolState("jwt: session token is undefined".into()))?;

        let url = self.config.authenticate_url();
        let body = json!({
            "session_token": token.expose_secret(),
            "session_duration_minutes": self.config.session_duration_minutes,
            "session_custom_claims": {
                "transaction_hash": transaction_hash,
            },
        });

        debug!(%url, "authenticating session");
        let response = self.transport.post_json(&url, &body).await?;
        if !response.is_success() {
            warn!(%url, status = response.status, "session authentication failed");
            return Err(AaError::external(
                SERVICE,
                format!("HTTP {}: {}", response.status, response.body),
            ));
        }

        let parsed: SessionAuthenticateResponse = serde_json::from_str(&response.body)
            .map_err(|e| AaError::external(SERVICE, format!("malformed response: {e}")))?;
        parsed
            .session_jwt
            .filter(|jwt| !jwt.is_empty())
            .ok_or_else(|| AaError::external(SERVICE, "response has no session_jwt"))
    }
}

#[async_trait]
impl<T: AuthTransport> SigningStrategy for JwtStrategy<T> {
    fn kind(&self) -> AuthenticatorKind {
        AuthenticatorKind::Jwt
    }

    async fn accounts(
        &self,
        abstract_account: &str,
        authenticator_id: u8,
    ) -> Result<Vec<AAccountData>, AaError> {
        Ok(abstract_account_entry(
            abstract_account,
            abstract_account,
            authenticator_id,
            self.kind(),
        ))
    }

    async fn sign(&self, signer_address: &str, sign_doc: &SignDoc) -> Result<Vec<u8>, AaError> {
        let transaction_hash = to_base64(&sign_doc_digest(sign_doc));
        debug!(abstract_account = %signer_address, "jwt sign");
        let jwt = self.authenticate(&transaction_hash).await?;
        Ok(jwt.into_bytes())
    }
}

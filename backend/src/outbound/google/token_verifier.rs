//! Reqwest-backed identity verifier adapter.
//!
//! This adapter owns transport details only: calling the provider's
//! tokeninfo endpoint, HTTP error mapping, and JSON decoding into the
//! domain identity. Claim validation lives in the DTO module.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::VerifiedIdentity;
use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};

use super::dto::TokenClaimsDto;

/// Public verification endpoint for Google-issued ID tokens.
pub const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity verifier that checks opaque credentials against the provider's
/// tokeninfo endpoint.
pub struct GoogleTokenVerifier {
    client: Client,
    endpoint: String,
    audience: String,
}

impl GoogleTokenVerifier {
    /// Build a verifier for the given expected audience (client id).
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(audience: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(audience, DEFAULT_TOKENINFO_URL)
    }

    /// Build a verifier against an explicit endpoint. Used by deployments
    /// that proxy the provider and by tests.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_endpoint(
        audience: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            audience: audience.into(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerificationError {
    IdentityVerificationError::transport(error.to_string())
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(
        &self,
        credential: &str,
    ) -> Result<VerifiedIdentity, IdentityVerificationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_client_error() {
            // The provider answers 4xx for malformed and expired tokens.
            return Err(IdentityVerificationError::invalid_token(format!(
                "identity provider rejected the credential ({status})"
            )));
        }
        if !status.is_success() {
            return Err(IdentityVerificationError::transport(format!(
                "identity provider returned {status}"
            )));
        }

        let claims: TokenClaimsDto = response.json().await.map_err(|error| {
            IdentityVerificationError::transport(format!(
                "invalid tokeninfo payload: {error}"
            ))
        })?;
        claims.into_identity(&self.audience)
    }
}

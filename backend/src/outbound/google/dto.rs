//! Wire types for the identity provider's tokeninfo endpoint.

use serde::Deserialize;

use crate::domain::ports::IdentityVerificationError;
use crate::domain::{EmailAddress, VerifiedIdentity};

/// Claims subset returned by the tokeninfo endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenClaimsDto {
    pub aud: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl TokenClaimsDto {
    /// Validate the claims against the expected audience and map them into
    /// a domain identity.
    pub(crate) fn into_identity(
        self,
        audience: &str,
    ) -> Result<VerifiedIdentity, IdentityVerificationError> {
        if self.aud.as_deref() != Some(audience) {
            return Err(IdentityVerificationError::invalid_token(
                "credential audience mismatch",
            ));
        }

        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|claim| !claim.is_empty())
            .ok_or_else(|| {
                IdentityVerificationError::invalid_token("credential has no email claim")
            })?;
        let email = EmailAddress::new(email)
            .map_err(|err| IdentityVerificationError::invalid_token(err.to_string()))?;

        Ok(VerifiedIdentity {
            email,
            name: self.name.unwrap_or_default(),
        })
    }
}

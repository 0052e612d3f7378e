//! Identity primitives: validated emails, verified identities, and the
//! session payload.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain error returned when identity values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email carried surrounding whitespace.
    UntrimmedEmail,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::UntrimmedEmail => write!(f, "email must not contain surrounding whitespace"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Email address used as the identity key throughout the application.
///
/// ## Invariants
/// - Non-empty once trimmed; stored exactly as supplied (no surrounding
///   whitespace). No further shape validation is applied: the allow-list is
///   presence-checked only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from borrowed input.
    pub fn new(email: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        Self::from_owned(email.as_ref().to_owned())
    }

    fn from_owned(email: String) -> Result<Self, IdentityValidationError> {
        if email.trim().is_empty() {
            return Err(IdentityValidationError::EmptyEmail);
        }
        if email.trim() != email {
            return Err(IdentityValidationError::UntrimmedEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Identity returned by the external verifier after a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Verified email claim.
    pub email: EmailAddress,
    /// Display name claim; empty when the provider omits it.
    pub name: String,
}

/// Allow-list entry. Emails are the only attribute the registry stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AllowedUser {
    /// Permitted email address.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: EmailAddress,
}

/// Session payload held in the signed cookie after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Identity key; every history record the session writes is owned by it.
    pub email: EmailAddress,
    /// Display name from the verified identity.
    pub name: String,
    /// Whether the session belongs to the configured administrator.
    pub is_admin: bool,
}

impl SessionUser {
    /// Session for the configured administrator.
    pub fn admin(identity: VerifiedIdentity) -> Self {
        Self {
            email: identity.email,
            name: identity.name,
            is_admin: true,
        }
    }

    /// Session for an allow-listed, non-administrator identity.
    pub fn member(identity: VerifiedIdentity) -> Self {
        Self {
            email: identity.email,
            name: identity.name,
            is_admin: false,
        }
    }
}

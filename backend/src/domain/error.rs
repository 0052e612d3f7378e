//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the domain only records the failure kind and a human-readable
//! message.

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or a required field is missing.
    InvalidRequest,
    /// The operation is structurally disallowed (e.g. deleting the
    /// administrator's allow-list entry).
    ForbiddenOperation,
    /// The presented credential could not be verified.
    InvalidToken,
    /// No session is present; the caller must log in first.
    Unauthenticated,
    /// A verified identity that is not on the allow-list.
    NotAuthorized,
    /// Session present but lacking the required privilege.
    Forbidden,
    /// The addressed record does not exist.
    NotFound,
    /// A backing service (store or identity provider) is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `location` is only populated for [`ErrorCode::Unauthenticated`], where
///   it names the login entry point the adapter should redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    location: Option<String>,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            panic!("error messages must not be empty");
        }
        Self {
            code,
            message,
            location: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Redirect target for unauthenticated callers, when applicable.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::ForbiddenOperation`].
    pub fn forbidden_operation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ForbiddenOperation, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidToken`].
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidToken, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthenticated`].
    ///
    /// `login_path` is the entry point the HTTP adapter redirects to.
    pub fn unauthenticated(login_path: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorCode::Unauthenticated, "login required");
        error.location = Some(login_path.into());
        error
    }

    /// Convenience constructor for [`ErrorCode::NotAuthorized`].
    pub fn not_authorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the use-case services that orchestrate them, and the
//! port traits adapters implement. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.

pub mod error;
pub mod history;
pub mod history_service;
pub mod identity;
pub mod login;
pub mod ports;
pub mod registry;
pub mod search;

pub use self::error::{Error, ErrorCode};
pub use self::history::{
    DEFAULT_WINDOW_DAYS, DateInput, DateRange, HistoryRecord, RecordKey, Timestamp,
};
pub use self::history_service::ClockedHistoryService;
pub use self::identity::{
    AllowedUser, EmailAddress, IdentityValidationError, SessionUser, VerifiedIdentity,
};
pub use self::login::{NOT_AUTHORIZED_MESSAGE, VerifierLoginService};
pub use self::registry::AllowListRegistry;
pub use self::search::{MatchMode, SearchCriteria};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;

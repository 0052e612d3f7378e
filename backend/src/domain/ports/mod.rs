//! Domain ports: traits at the seams between the domain and its adapters.
//!
//! Driving ports ([`LoginService`], [`UserRegistry`], [`HistoryService`])
//! are called by inbound adapters; driven ports ([`IdentityVerifier`],
//! [`AllowListRepository`], [`HistoryRepository`]) are implemented by
//! outbound adapters.

mod allow_list_repository;
mod history_repository;
mod history_service;
mod identity_verifier;
mod login_service;
mod macros;
mod user_registry;

pub(crate) use macros::define_port_error;

pub use allow_list_repository::{AllowListPersistenceError, AllowListRepository};
pub use history_repository::{HistoryPersistenceError, HistoryRepository};
pub use history_service::{HistoryDraft, HistoryService, SearchRequest};
pub use identity_verifier::{IdentityVerificationError, IdentityVerifier};
pub use login_service::LoginService;
pub use user_registry::UserRegistry;

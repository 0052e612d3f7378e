//! Personal record-keeping backend.
//!
//! Users authenticate with an external identity provider, then create,
//! edit, search, and delete timestamped history records scoped to their
//! own account; an administrator manages the allow-list of permitted
//! emails. The crate follows a hexagonal layout: `domain` holds entities,
//! services, and ports; `inbound` and `outbound` hold the HTTP and
//! Google/PostgreSQL adapters; `server` wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;

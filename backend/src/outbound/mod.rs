//! Outbound adapters implementing the domain's driven ports.

pub mod google;
pub mod persistence;

//! Domain types and wire contract for the field-mapping reconciliation client.
//!
//! Holds the J1/J2 mapping model, the mapping document returned by the
//! server, and the request/response shapes every controller shares.

pub mod contract;
pub mod error;
pub mod mapping;

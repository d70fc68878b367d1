//! Collaborator implementations.
//!
//! - `local`: In-memory search index, user directory and security service
//!   for local development and tests
pub mod local;

pub use local::{LocalGroupIndex, LocalUserDirectory, StaticSecurityService};

//! Service layer between the HTTP handlers and the collaborator traits.
//!
//! `index_service` implements the group operations; `members` turns member
//! usernames into display entries via the user directory.

pub mod index_service;
pub mod members;

pub use index_service::{DefaultIndexService, GroupChanges, IndexService};
pub use members::{resolve_members, MemberView};

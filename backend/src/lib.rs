//! # Admin Groups
//!
//! REST facade for group management in the admin UI.
//!
//! Groups are named collections of users and roles, scoped to an
//! organization. The facade parses HTTP parameters, delegates to an injected
//! index service and serializes the results to JSON; querying, storage, user
//! resolution and identity are provided by collaborator traits.
//!
//! ## Architecture
//!
//! - [`models`]: Group, user and organization types
//! - [`db`]: Collaborator traits, search queries, in-memory implementations,
//!   configuration and the factory wiring them together
//! - [`services`]: The index service and member display-name resolution
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

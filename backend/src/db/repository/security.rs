//! Security context trait.

use crate::models::{Organization, User};

/// Provides the organization and user the current request acts for.
pub trait SecurityService: Send + Sync {
    fn organization(&self) -> Organization;

    fn user(&self) -> User;
}

//! Domain types shared by the index, directory and HTTP layers.

pub mod group;
pub mod user;

pub use group::*;
pub use user::*;

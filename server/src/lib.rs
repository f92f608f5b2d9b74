//! Posts Server
//!
//! Author-or-read-only permission policy for post endpoints, with the axum
//! glue to run it in front of list and object routes.

pub mod config;
pub mod permissions;

pub use posts_common::{Identity, UserId};

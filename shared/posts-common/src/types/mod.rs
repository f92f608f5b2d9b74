//! Shared Types

mod identity;

pub use identity::{Identity, UserId};

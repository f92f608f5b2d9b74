//! Posts Common Library
//!
//! Identity types shared between the permission policy and the host
//! application that authenticates requests.

pub mod types;

pub use types::*;

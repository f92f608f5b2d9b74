//! Author-or-read-only permission policy.
//!
//! - Collections: authenticated callers only
//! - Objects: safe methods for everyone, everything else for the author

pub mod context;
pub mod error;
pub mod method;
pub mod middleware;
pub mod policy;

pub use context::{Authored, RequestContext, Subject};
pub use error::{ErrorResponse, PermissionError};
pub use method::{SafeMethods, SafeMethodsError};
pub use middleware::{require_collection_access, PolicyState};
pub use policy::{check_collection_access, check_object_access, IsAuthorOrReadOnly, Permission};

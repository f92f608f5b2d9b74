//! The author-or-read-only policy.
//!
//! Two checks, evaluated by the host at two points of a request:
//! - Before listing a collection: authenticated callers only.
//! - Before acting on one object: read-only methods always pass, anything
//!   else passes only for the object's author.

use tracing::debug;

use super::context::{Authored, RequestContext};
use super::error::PermissionError;
use super::method::SafeMethods;

/// A permission check the host runs before list and object actions.
///
/// Both checks are pure: no I/O, no state, the same inputs always give the
/// same answer.
pub trait Permission: Send + Sync {
    /// May the caller list the collection?
    fn has_permission(&self, ctx: &RequestContext) -> bool;

    /// May the caller perform `ctx.method` on `obj`?
    fn has_object_permission(&self, ctx: &RequestContext, obj: &dyn Authored) -> bool;

    /// Like [`Permission::has_permission`], but returns the denial as an error.
    fn require_permission(&self, ctx: &RequestContext) -> Result<(), PermissionError> {
        if self.has_permission(ctx) {
            Ok(())
        } else {
            debug!(method = %ctx.method, user = %ctx.user, "Collection access denied");
            Err(PermissionError::NotAuthenticated)
        }
    }

    /// Like [`Permission::has_object_permission`], but returns the denial as an error.
    fn require_object_permission(
        &self,
        ctx: &RequestContext,
        obj: &dyn Authored,
    ) -> Result<(), PermissionError> {
        if self.has_object_permission(ctx, obj) {
            Ok(())
        } else {
            debug!(
                method = %ctx.method,
                user = %ctx.user,
                author = ?obj.author(),
                "Object access denied"
            );
            Err(PermissionError::NotAuthor)
        }
    }
}

/// Grants reads to everyone and writes to the object's author.
#[derive(Debug, Clone, Default)]
pub struct IsAuthorOrReadOnly {
    safe_methods: SafeMethods,
}

impl IsAuthorOrReadOnly {
    /// Create the policy with a custom safe-method set.
    #[must_use]
    pub const fn new(safe_methods: SafeMethods) -> Self {
        Self { safe_methods }
    }

    /// The methods this policy treats as read-only.
    #[must_use]
    pub const fn safe_methods(&self) -> &SafeMethods {
        &self.safe_methods
    }
}

impl Permission for IsAuthorOrReadOnly {
    fn has_permission(&self, ctx: &RequestContext) -> bool {
        check_collection_access(ctx)
    }

    fn has_object_permission(&self, ctx: &RequestContext, obj: &dyn Authored) -> bool {
        check_object_access(&self.safe_methods, ctx, obj)
    }
}

/// Collection access: `true` iff the caller is authenticated.
#[must_use]
pub const fn check_collection_access(ctx: &RequestContext) -> bool {
    ctx.is_authenticated()
}

/// Object access.
///
/// Rules:
/// 1. Safe methods are always allowed; authorship is not inspected.
/// 2. Otherwise the caller must be the author. An anonymous caller or a
///    missing author never matches, so two "nobodies" are not equal.
pub fn check_object_access<A>(safe_methods: &SafeMethods, ctx: &RequestContext, obj: &A) -> bool
where
    A: Authored + ?Sized,
{
    if safe_methods.contains(&ctx.method) {
        return true;
    }

    match (ctx.user.user_id(), obj.author()) {
        (Some(user), Some(author)) => user == author,
        _ => false,
    }
}

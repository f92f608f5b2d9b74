//! Axum integration for the permission policy.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::context::{Authored, RequestContext};
use super::error::PermissionError;
use super::policy::{IsAuthorOrReadOnly, Permission};
use crate::config::Config;

/// Shared handle to the active permission policy.
///
/// Cheap to clone; hand it to [`require_collection_access`] with
/// `from_fn_with_state` and to object handlers as router state.
#[derive(Clone)]
pub struct PolicyState {
    policy: Arc<dyn Permission>,
}

impl PolicyState {
    /// Wrap any permission policy.
    pub fn new<P>(policy: P) -> Self
    where
        P: Permission + 'static,
    {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// The author-or-read-only policy built from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(IsAuthorOrReadOnly::new(config.safe_methods.clone()))
    }

    /// The wrapped policy.
    #[must_use]
    pub fn policy(&self) -> &dyn Permission {
        self.policy.as_ref()
    }

    /// Pre-object-action check for handlers that have loaded their object.
    pub fn authorize_object(
        &self,
        ctx: &RequestContext,
        obj: &dyn Authored,
    ) -> Result<(), PermissionError> {
        self.policy.require_object_permission(ctx, obj)
    }
}

impl Default for PolicyState {
    fn default() -> Self {
        Self::new(IsAuthorOrReadOnly::default())
    }
}

impl std::fmt::Debug for PolicyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyState").finish_non_exhaustive()
    }
}

/// Middleware guarding list routes.
///
/// Reads the caller [`posts_common::Identity`] the host's authentication
/// layer placed in request extensions and rejects anonymous callers with
/// `401 Unauthorized`. The authentication layer must run before this one.
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/posts", get(list_posts))
///     .layer(axum::middleware::from_fn_with_state(
///         policy.clone(),
///         require_collection_access,
///     ))
///     .layer(axum::middleware::from_fn(authenticate))
/// ```
#[tracing::instrument(skip_all, fields(method = %request.method(), uri = %request.uri()))]
pub async fn require_collection_access(
    State(state): State<PolicyState>,
    request: Request,
    next: Next,
) -> Result<Response, PermissionError> {
    let ctx = RequestContext::from_http(request.method(), request.extensions());
    state.policy.require_permission(&ctx)?;

    Ok(next.run(request).await)
}

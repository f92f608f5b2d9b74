//! Request and subject views consumed by the permission policy.
//!
//! The host fills these from its own request and model types before the
//! policy runs; the policy only ever reads them.

use axum::http::{request::Parts, Extensions, Method};
use posts_common::{Identity, UserId};

/// The parts of an incoming request the policy looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Request method.
    pub method: Method,
    /// Caller identity.
    pub user: Identity,
}

impl RequestContext {
    /// Create a context from a method and caller identity.
    pub fn new(method: Method, user: impl Into<Identity>) -> Self {
        Self {
            method,
            user: user.into(),
        }
    }

    /// Create a context for an anonymous caller.
    #[must_use]
    pub const fn anonymous(method: Method) -> Self {
        Self {
            method,
            user: Identity::Anonymous,
        }
    }

    /// Build a context from an HTTP method and request extensions.
    ///
    /// The identity is whatever [`Identity`] the host's authentication layer
    /// stored in the extensions; if none was stored the caller is anonymous.
    #[must_use]
    pub fn from_http(method: &Method, extensions: &Extensions) -> Self {
        Self {
            method: method.clone(),
            user: extensions.get::<Identity>().copied().unwrap_or_default(),
        }
    }

    /// Whether the caller has been authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_authenticated()
    }
}

/// Extractor for the policy context in handlers.
///
/// ```ignore
/// async fn update_post(
///     State(policy): State<PolicyState>,
///     ctx: RequestContext,
///     Path(id): Path<Uuid>,
/// ) -> Result<Json<Post>, ApiError> {
///     let post = load_post(id).await?;
///     policy.authorize_object(&ctx, &post)?;
///     // ...
/// }
/// ```
impl<S> axum::extract::FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_http(&parts.method, &parts.extensions))
    }
}

/// Anything that records the user who created it.
pub trait Authored {
    /// The author's ID, or `None` if no author was recorded.
    fn author(&self) -> Option<UserId>;
}

/// Minimal object view carrying only its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Subject {
    /// Author of the object, if recorded.
    pub author: Option<UserId>,
}

impl Subject {
    /// A subject authored by `author`.
    #[must_use]
    pub const fn authored_by(author: UserId) -> Self {
        Self {
            author: Some(author),
        }
    }

    /// A subject without a recorded author.
    #[must_use]
    pub const fn unowned() -> Self {
        Self { author: None }
    }
}

impl Authored for Subject {
    fn author(&self) -> Option<UserId> {
        self.author
    }
}

impl<T: Authored + ?Sized> Authored for &T {
    fn author(&self) -> Option<UserId> {
        (**self).author()
    }
}

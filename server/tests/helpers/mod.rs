//! Reusable test helpers for HTTP permission tests.
//!
//! Provides `TestApp`, a small router standing in for a host application:
//! a header-based authentication layer, a guarded list route, and object
//! routes that load a post and ask the policy before acting on it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRef, Path, Request, State};
use axum::http::{self, Method, Response, StatusCode};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use posts_server::config::Config;
use posts_server::permissions::{
    require_collection_access, Authored, PolicyState, RequestContext,
};
use posts_server::{Identity, UserId};
use tower::ServiceExt;
use uuid::Uuid;

/// Header the stand-in authentication layer reads the caller from.
pub const USER_HEADER: &str = "x-user-id";

/// A stored post; only its author matters to the policy.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub author: Option<UserId>,
}

impl Authored for Post {
    fn author(&self) -> Option<UserId> {
        self.author
    }
}

#[derive(Clone)]
struct AppState {
    policy: PolicyState,
    posts: Arc<HashMap<Uuid, Post>>,
}

impl FromRef<AppState> for PolicyState {
    fn from_ref(state: &AppState) -> Self {
        state.policy.clone()
    }
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Router wrapper for `oneshot` requests.
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Build an app serving `posts` under the given configuration.
    pub fn new(config: &Config, posts: Vec<Post>) -> Self {
        init_tracing();

        let policy = PolicyState::from_config(config);
        let state = AppState {
            policy: policy.clone(),
            posts: Arc::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        };

        let list = Router::new()
            .route("/posts", get(list_posts))
            .layer(middleware::from_fn_with_state(
                policy,
                require_collection_access,
            ));

        let detail = Router::new().route(
            "/posts/{id}",
            get(post_action)
                .put(post_action)
                .patch(post_action)
                .delete(post_action)
                .options(post_action),
        );

        let router = list
            .merge(detail)
            .with_state(state)
            .layer(middleware::from_fn(authenticate));

        Self { router }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        http::Request::builder().method(method).uri(uri)
    }

    /// Build a request sent as `user`.
    pub fn request_as(method: Method, uri: &str, user: UserId) -> http::request::Builder {
        Self::request(method, uri).header(USER_HEADER, user.to_string())
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: http::Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Stand-in for the host's authentication: trusts the user header.
async fn authenticate(mut request: Request, next: Next) -> axum::response::Response {
    let identity: Identity = request
        .headers()
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(UserId::from)
        .into();

    request.extensions_mut().insert(identity);
    next.run(request).await
}

async fn list_posts(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.posts.len())
}

async fn post_action(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    let Some(post) = state.posts.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.policy.authorize_object(&ctx, post) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Read a response body as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

//! Integration tests for the UFSBD 34 admin access control.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ufsbd-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_http` - Router, guard and admin list endpoints, in process
//! - `admin_file_store` - Access checks over the on-disk store
//!
//! This library holds the shared helpers.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use tower::ServiceExt;

use ufsbd_admin::config::AccessConfig;
use ufsbd_admin::routes;
use ufsbd_admin::state::AppState;
use ufsbd_admin::store::{KeyValueStore, MemoryStore, SharedStore, WritableStore};

pub use ufsbd_admin::middleware::auth::{EMAIL_HEADER, ROLE_HEADER};

/// Maximum response body size read by [`send`].
const MAX_BODY_BYTES: usize = 64 * 1024;

/// An in-process admin service over a store.
pub struct TestApp {
    pub store: SharedStore,
    pub router: Router,
}

impl TestApp {
    /// App with an empty store and the default access settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// App with a pre-populated store.
    #[must_use]
    pub fn with_store(store: MemoryStore) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    /// App over any store backend.
    #[must_use]
    pub fn with_shared_store(store: SharedStore) -> Self {
        let router = routes::app(AppState::new(Arc::clone(&store), AccessConfig::default()));
        Self { store, router }
    }

    /// Build a request carrying the given identity headers.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    #[must_use]
    pub fn request(
        method: &str,
        uri: &str,
        email: Option<&str>,
        role: Option<&str>,
        json: Option<serde_json::Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = email {
            builder = builder.header(EMAIL_HEADER, email);
        }
        if let Some(role) = role {
            builder = builder.header(ROLE_HEADER, role);
        }
        let body = match json {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        builder.body(body).expect("valid request")
    }

    /// Send a request and return the status and JSON body (`Null` if the
    /// body is not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response: Response<Body> = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("readable body");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// Raw value currently stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be read.
    #[must_use]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).expect("store readable")
    }

    /// Overwrite a raw store value.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be written.
    pub fn put(&self, key: &str, value: &str) {
        self.store.set(key, value).expect("store writable");
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

//! Application state shared across handlers.

use std::sync::Arc;

use crate::access::AccessControl;
use crate::config::AccessConfig;
use crate::error::AppError;
use crate::store::SharedStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    access: AccessControl<SharedStore>,
}

impl AppState {
    /// Build state around a store and access settings.
    #[must_use]
    pub fn new(store: SharedStore, config: AccessConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                access: AccessControl::new(store, config),
            }),
        }
    }

    /// The access checks.
    #[must_use]
    pub fn access(&self) -> &AccessControl<SharedStore> {
        &self.inner.access
    }

    /// Run `f` against the access checks on the blocking thread pool.
    ///
    /// Store backends do synchronous I/O, so handlers never call them on a
    /// runtime worker directly.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the blocking task panics.
    pub async fn run_blocking<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&AccessControl<SharedStore>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || f(state.access()))
            .await
            .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))
    }
}

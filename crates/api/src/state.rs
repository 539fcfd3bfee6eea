use std::sync::Arc;

use skintone_core::catalog::ShadeCatalog;

use crate::auth::Authorizer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog service over the configured shade store.
    pub catalog: ShadeCatalog,
    /// Gate consulted by mutating routes.
    pub authorizer: Arc<dyn Authorizer>,
}

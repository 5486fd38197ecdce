use crate::error::Result;
use crate::types::Catalog;
use axum::body::Bytes;
use std::sync::Arc;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// `/api/chains` body, rendered once so every response is byte-identical.
    pub chains_body: Bytes,
    pub version: &'static str,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        let chains_body = Bytes::from(serde_json::to_vec(catalog.entries())?);
        Ok(Self {
            catalog,
            chains_body,
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}

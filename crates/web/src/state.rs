use std::sync::Arc;

use tourism_client::BackendClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the client shares its connection pool across clones.
#[derive(Clone)]
pub struct AppState {
    /// Anonymous backend client; handlers derive authorized copies from it.
    pub client: BackendClient,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

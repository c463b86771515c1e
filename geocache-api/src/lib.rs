//! # Geocache API Server
//!
//! REST API in front of the cached geocoding service.
//!
//! ## Endpoints
//!
//! - `GET /` - Welcome message
//! - `GET /health` - Liveness and cache occupancy
//! - `GET /geocoding?address=` - Address to coordinates (JSON)
//! - `GET /reverse-geocoding?latitude=&longitude=` - Coordinates to address (plain text)
//! - `POST /cache/sweep` - Sweep both caches now
//!
//! ## Example
//!
//! ```rust,ignore
//! use geocache_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use geocache_core::error::Result;

/// API server for cached geocoding.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(Arc::new(AppState::new(config)?)))
    }

    /// Creates a server over an existing state.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Geocache API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server(bind: IpAddr, port: u16) -> std::io::Result<()> {
    let server = ApiServer::new(ApiConfig::from_env())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    server.run((bind, port)).await
}

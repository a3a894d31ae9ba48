// src/server/mod.rs
//! Recipe Box HTTP server
//!
//! Serves the recipe store over a JSON API:
//! - `GET /recipes`, `POST /recipes`
//! - `GET|PUT|DELETE /recipes/:id`
//! - `/health` and `/metrics` for operators
//!
//! Each server owns its own [`RecipeStore`]; nothing is shared between
//! instances, so tests can run several servers side by side.

pub mod config;
mod handlers;
pub mod metrics;
pub mod problem;
mod routes;

pub use config::RecipeBoxConfig;
pub use metrics::{MetricsSnapshot, ServiceMetrics};
pub use problem::{ApiError, ApiResult, ProblemDetails};
pub use routes::create_router;

use crate::store::{default_seed, DeletePolicy, IdScheme, NewRecipe, RecipeStore};
use crate::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (port 0 picks a free port)
    pub bind_addr: SocketAddr,
    /// Attach a permissive CORS layer
    pub enable_cors: bool,
    /// How new recipe ids are generated
    pub id_scheme: IdScheme,
    /// What DELETE does for an unknown id
    pub delete_policy: DeletePolicy,
    /// Recipes loaded at startup
    pub seed: Vec<NewRecipe>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            enable_cors: true,
            id_scheme: IdScheme::default(),
            delete_policy: DeletePolicy::default(),
            seed: default_seed(),
        }
    }
}

impl ServerConfig {
    /// Set the bind address
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the id scheme
    pub fn with_id_scheme(mut self, scheme: IdScheme) -> Self {
        self.id_scheme = scheme;
        self
    }

    /// Set the delete policy
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// Replace the startup recipes
    pub fn with_seed(mut self, seed: Vec<NewRecipe>) -> Self {
        self.seed = seed;
        self
    }

    /// Check the startup recipes
    ///
    /// A server never starts with an empty collection.
    pub fn validate(&self) -> Result<()> {
        validate_seed(&self.seed)
    }
}

/// Seed list must be non-empty and every recipe must have a name
pub(crate) fn validate_seed(seed: &[NewRecipe]) -> Result<()> {
    if seed.is_empty() {
        return Err(Error::config("store.seed must contain at least one recipe"));
    }
    if let Some(pos) = seed.iter().position(|r| r.name.trim().is_empty()) {
        return Err(Error::config(format!("store.seed[{}] has an empty name", pos)));
    }
    Ok(())
}

/// Shared server state
#[derive(Debug)]
pub struct AppState {
    pub store: RecipeStore,
    pub metrics: ServiceMetrics,
}

/// Handle to the shared state used by every handler
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store,
            metrics: ServiceMetrics::new(),
        }
    }

    /// Build a fresh store from the configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let store = RecipeStore::seeded(config.id_scheme.generator(), config.seed.clone())?
            .with_delete_policy(config.delete_policy);
        Ok(Self::new(store))
    }
}

/// A server accepting connections in a background task
///
/// Dropping the handle without calling [`RunningServer::close`] also starts
/// a graceful shutdown, but nothing waits for it to finish.
pub struct RunningServer {
    local_addr: SocketAddr,
    state: SharedState,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn store(&self) -> &RecipeStore {
        &self.state.store
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn close(self) -> Result<()> {
        tracing::info!("Shutting down server on {}", self.local_addr);
        // Receiver is gone only if the serve task already ended
        let _ = self.shutdown.send(());
        self.task.await??;
        tracing::info!("Server on {} stopped", self.local_addr);
        Ok(())
    }
}

/// Start the server
///
/// Returns once the listener is bound, so requests can be sent as soon as
/// this resolves.
pub async fn run_server(config: ServerConfig) -> Result<RunningServer> {
    tracing::info!("Starting Recipe Box server on {}", config.bind_addr);
    tracing::info!("Id scheme: {:?}", config.id_scheme);
    tracing::info!("Delete policy: {:?}", config.delete_policy);

    let state = Arc::new(AppState::from_config(&config)?);
    tracing::info!("Seeded {} recipes", state.store.len());

    let app = create_router(state.clone(), config.enable_cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let (shutdown, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                // Ok from close(), Err when the handle was dropped
                let _ = shutdown_rx.await;
            })
            .await
    });

    tracing::info!("Recipe Box is ready to serve on {}", local_addr);
    Ok(RunningServer {
        local_addr,
        state,
        shutdown,
        task,
    })
}

/// Run the server until ctrl-c
pub async fn serve_until_signal(config: ServerConfig) -> Result<()> {
    let server = run_server(config).await?;
    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal");
    server.close().await
}

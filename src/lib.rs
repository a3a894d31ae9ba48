// src/lib.rs

//! Recipe Box
//!
//! A small recipe service: an in-memory store of recipes (a name plus an
//! ordered list of ingredients) served over a JSON HTTP API.
//!
//! # Architecture
//!
//! - `store`: the [`RecipeStore`], which owns the collection, assigns ids
//!   and enforces the create/read/update/delete contract
//! - `server`: axum router, handlers, problem-details errors, config
//!   loading and the server lifecycle ([`run_server`] / [`RunningServer::close`])
//!
//! The store lives only in memory and starts from a seed list every time
//! a server is started.

mod error;
pub mod server;
pub mod store;

pub use error::{Error, Result};
pub use server::{run_server, serve_until_signal, RecipeBoxConfig, RunningServer, ServerConfig};
pub use store::{
    DeletePolicy, IdGenerator, IdScheme, NewRecipe, Recipe, RecipeId, RecipePayload, RecipeStore,
    SequentialIds, StoreError, UuidGenerator,
};

//! fyyur-server: booking listings for venues, artists and shows
//!
//! Layers, leaf-first:
//! - `models`: form input validated into typed fields
//! - `db`: PostgreSQL pool, schema bootstrap and repositories
//! - `http`: axum routes mapping requests to repository calls

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, DbError};
pub use http::{build_router, run_server, ServerConfig, ServerError};

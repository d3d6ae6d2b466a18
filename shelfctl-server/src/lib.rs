//! shelfctl-server: HTTP API for the book catalog
//!
//! Two resources, users and books, with a one-to-many ownership
//! relationship. Handlers are thin adapters over the repository layer;
//! all state lives in PostgreSQL.

pub mod db;
pub mod http;
pub mod models;

pub use http::{run_server, ServerConfig};

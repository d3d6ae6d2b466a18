//! Database layer - connection pool, schema setup, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - List operations use JOINs - no N+1 queries
//! - Rely on DB constraints for uniqueness - no check-then-insert
//! - Every operation is a single atomic statement

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;

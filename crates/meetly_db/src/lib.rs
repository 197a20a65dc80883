//! Database integration for Meetly
//!
//! This crate provides a database client that is designed to be database agnostic,
//! using SQLx as the underlying database library, and the SQL implementation
//! of the booking store. SQLite is the default backend; PostgreSQL and MySQL
//! are available through feature flags.
//!
//! # Example
//!
//! ```rust,no_run
//! use meetly_db::{DbClient, SqlBookingStore};
//!
//! async fn setup_store() -> Result<SqlBookingStore, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite:data/meetly.db").await?;
//!     let store = SqlBookingStore::new(db_client);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::SqlBookingStore;

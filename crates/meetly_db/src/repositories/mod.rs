//! Repository modules for database access

pub mod booking_sql;

pub use booking_sql::SqlBookingStore;

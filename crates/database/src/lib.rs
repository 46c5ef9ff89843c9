//! # Cotacao Database Crate
//!
//! The server's local record of every quote it handed out. Rows are only ever
//! appended; nothing in the system updates or deletes them.
//!
//! ## Public API
//!
//! - `connect`: opens the SQLite pool, creating the database file if needed.
//! - `run_migrations`: applies the embedded migrations in `./migrations`.
//! - `DbRepository`: holds the pool and exposes `save_rate`, `recent_rates`
//!   and `count_rates`.
//! - `DbError`: the error type returned by everything above.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, StoredRate};

//! SQLite storage implementation for Regionfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `regionfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations, including the seeded base portfolio sets
//! - Repository implementations for allocations and portfolio sets
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod allocations;
pub mod portfolio_sets;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from regionfolio-core for convenience
pub use regionfolio_core::errors::{DatabaseError, Error, Result};

pub use allocations::AllocationRepository;
pub use portfolio_sets::PortfolioSetRepository;

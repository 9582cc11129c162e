//! Regionfolio Core - region allocation domain, services, and traits.
//!
//! This crate contains the allocation business logic: the nine-region
//! percentage model, slider redistribution, change tracking against a saved
//! baseline and the services that persist allocations and derive portfolio
//! sets. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod allocations;
pub mod constants;
pub mod errors;
pub mod portfolio_sets;
pub mod regions;

pub use allocations::{AccountAllocation, RegionAllocation};
pub use regions::Region;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! SQLite storage implementation for account allocations.

mod model;
mod repository;

pub use model::AccountAllocationDB;
pub use repository::AllocationRepository;

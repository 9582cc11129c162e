//! SQLite storage implementation for portfolio sets.

mod model;
mod repository;

pub use model::PortfolioSetDB;
pub use repository::PortfolioSetRepository;

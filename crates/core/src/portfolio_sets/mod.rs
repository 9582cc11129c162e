//! Portfolio sets module - composition data derived from base sets and custom allocations.

mod portfolio_sets_model;
mod portfolio_sets_service;
mod portfolio_sets_traits;

pub use portfolio_sets_model::{PortfolioSet, PortfolioSetKey, RegionWeight};
pub use portfolio_sets_service::PortfolioSetService;
pub use portfolio_sets_traits::{PortfolioSetRepositoryTrait, PortfolioSetServiceTrait};

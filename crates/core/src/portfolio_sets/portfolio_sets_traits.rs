use async_trait::async_trait;
use std::sync::Arc;

use super::{PortfolioSet, PortfolioSetKey};
use crate::allocations::AccountAllocation;
use crate::errors::Result;

/// Trait for portfolio set repository operations
pub trait PortfolioSetRepositoryTrait: Send + Sync {
    fn get_portfolio_set(&self, id: &str) -> Result<Option<PortfolioSet>>;
    fn list_portfolio_sets(&self) -> Result<Vec<PortfolioSet>>;
}

/// Trait for portfolio set service operations
#[async_trait]
pub trait PortfolioSetServiceTrait: Send + Sync {
    fn list_portfolio_sets(&self) -> Result<Vec<PortfolioSet>>;
    async fn load_portfolio_set(&self, id: &str) -> Result<Arc<PortfolioSet>>;
    async fn load_for_account(&self, allocation: &AccountAllocation) -> Result<Arc<PortfolioSet>>;
    /// Rebuilds the account's set from `allocation`, replacing any cached entry.
    async fn refresh_for_account(
        &self,
        allocation: &AccountAllocation,
    ) -> Result<Arc<PortfolioSet>>;
    fn get_cached(&self, key: &PortfolioSetKey) -> Option<Arc<PortfolioSet>>;
    fn invalidate(&self, key: &PortfolioSetKey);
}

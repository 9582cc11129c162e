use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::{PortfolioSet, PortfolioSetKey, PortfolioSetRepositoryTrait, PortfolioSetServiceTrait};
use crate::allocations::AccountAllocation;
use crate::errors::{DatabaseError, Error, Result};

/// Loads portfolio sets through a per-key cache.
///
/// Concurrent loads of the same key share a single fetch. A failed fetch
/// leaves the entry empty so the next caller retries.
pub struct PortfolioSetService {
    repository: Arc<dyn PortfolioSetRepositoryTrait>,
    cache: DashMap<PortfolioSetKey, Arc<OnceCell<Arc<PortfolioSet>>>>,
}

impl PortfolioSetService {
    pub fn new(repository: Arc<dyn PortfolioSetRepositoryTrait>) -> Self {
        Self {
            repository,
            cache: DashMap::new(),
        }
    }

    fn base_set(&self, id: &str) -> Result<PortfolioSet> {
        self.repository.get_portfolio_set(id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Portfolio set '{}' not found",
                id
            )))
        })
    }

    fn build_for_account(
        &self,
        key: &PortfolioSetKey,
        allocation: &AccountAllocation,
    ) -> Result<PortfolioSet> {
        let base = self.base_set(key.base_set_id())?;
        Ok(match key {
            PortfolioSetKey::Base(_) => base,
            PortfolioSetKey::Custom { .. } => base.customized(key.cache_key(), &allocation.regions),
        })
    }

    async fn load_cached<F>(&self, key: &PortfolioSetKey, build: F) -> Result<Arc<PortfolioSet>>
    where
        F: FnOnce() -> Result<PortfolioSet> + Send,
    {
        let cell = self.cache.entry(key.clone()).or_default().value().clone();
        let loaded = cell
            .get_or_try_init(move || async move {
                debug!("Loading portfolio set {}", key);
                build().map(Arc::new)
            })
            .await?;
        Ok(loaded.clone())
    }
}

#[async_trait]
impl PortfolioSetServiceTrait for PortfolioSetService {
    fn list_portfolio_sets(&self) -> Result<Vec<PortfolioSet>> {
        self.repository.list_portfolio_sets()
    }

    async fn load_portfolio_set(&self, id: &str) -> Result<Arc<PortfolioSet>> {
        let key = PortfolioSetKey::Base(id.to_string());
        self.load_cached(&key, || self.base_set(id)).await
    }

    async fn load_for_account(&self, allocation: &AccountAllocation) -> Result<Arc<PortfolioSet>> {
        let key = PortfolioSetKey::for_account(allocation);
        self.load_cached(&key, || self.build_for_account(&key, allocation))
            .await
    }

    async fn refresh_for_account(
        &self,
        allocation: &AccountAllocation,
    ) -> Result<Arc<PortfolioSet>> {
        let key = PortfolioSetKey::for_account(allocation);
        let set = Arc::new(self.build_for_account(&key, allocation)?);
        // Replace rather than fill: a reader holding an older record may have
        // populated the entry since the last invalidate.
        let cell = OnceCell::new_with(Some(set.clone()));
        self.cache.insert(key.clone(), Arc::new(cell));
        debug!("Refreshed portfolio set {}", key);
        Ok(set)
    }

    fn get_cached(&self, key: &PortfolioSetKey) -> Option<Arc<PortfolioSet>> {
        self.cache.get(key).and_then(|cell| cell.get().cloned())
    }

    fn invalidate(&self, key: &PortfolioSetKey) {
        if self.cache.remove(key).is_some() {
            debug!("Invalidated portfolio set {}", key);
        }
    }
}

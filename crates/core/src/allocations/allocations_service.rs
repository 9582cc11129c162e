use async_trait::async_trait;
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::{
    AccountAllocation, AllocationError, AllocationRepositoryTrait, AllocationServiceTrait,
    RedistributionPreview,
};
use crate::constants::{FULL_ALLOCATION, MIN_REGION_PERCENT};
use crate::errors::{DatabaseError, Error, Result};
use crate::portfolio_sets::{PortfolioSetKey, PortfolioSetServiceTrait};
use crate::regions::Region;

/// Service for loading, previewing and saving region allocations
pub struct AllocationService {
    repository: Arc<dyn AllocationRepositoryTrait>,
    portfolio_set_service: Arc<dyn PortfolioSetServiceTrait>,
}

impl AllocationService {
    pub fn new(
        repository: Arc<dyn AllocationRepositoryTrait>,
        portfolio_set_service: Arc<dyn PortfolioSetServiceTrait>,
    ) -> Self {
        Self {
            repository,
            portfolio_set_service,
        }
    }

    /// Drops the cached set of the previous record and replaces the saved
    /// record's entry with one built from it.
    async fn refresh_portfolio_set(
        &self,
        previous: Option<&AccountAllocation>,
        saved: &AccountAllocation,
    ) {
        let saved_key = PortfolioSetKey::for_account(saved);
        if let Some(previous) = previous {
            let previous_key = PortfolioSetKey::for_account(previous);
            if previous_key != saved_key {
                self.portfolio_set_service.invalidate(&previous_key);
            }
        }

        if let Err(e) = self.portfolio_set_service.refresh_for_account(saved).await {
            self.portfolio_set_service.invalidate(&saved_key);
            warn!(
                "Allocation for {} saved but portfolio set reload failed: {}",
                saved.account_id, e
            );
        }
    }
}

#[async_trait]
impl AllocationServiceTrait for AllocationService {
    fn get_allocation(&self, account_id: &str) -> Result<AccountAllocation> {
        self.repository.get_allocation(account_id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Allocation for account '{}' not found",
                account_id
            )))
        })
    }

    fn list_allocations(&self) -> Result<Vec<AccountAllocation>> {
        self.repository.list_allocations()
    }

    async fn save_allocation(&self, allocation: AccountAllocation) -> Result<AccountAllocation> {
        allocation.validate()?;

        let previous = self.repository.get_allocation(&allocation.account_id)?;
        let saved = self.repository.upsert_allocation(allocation).await?;
        info!(
            "Saved region allocation for account {} (portfolio set {})",
            saved.account_id, saved.portfolio_set_id
        );

        self.refresh_portfolio_set(previous.as_ref(), &saved).await;
        Ok(saved)
    }

    fn redistribute(
        &self,
        account_id: &str,
        region: Region,
        percent: Decimal,
    ) -> Result<RedistributionPreview> {
        if percent < MIN_REGION_PERCENT || percent > FULL_ALLOCATION {
            return Err(AllocationError::PercentOutOfRange {
                region,
                value: percent,
            }
            .into());
        }
        let mut allocation = self.get_allocation(account_id)?;
        let affected = allocation.regions.set_region(region, percent);
        Ok(RedistributionPreview {
            allocation,
            affected,
        })
    }
}

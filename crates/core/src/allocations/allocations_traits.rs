use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{AccountAllocation, RedistributionPreview};
use crate::errors::Result;
use crate::regions::Region;

/// Trait for allocation repository operations
#[async_trait]
pub trait AllocationRepositoryTrait: Send + Sync {
    fn get_allocation(&self, account_id: &str) -> Result<Option<AccountAllocation>>;
    fn list_allocations(&self) -> Result<Vec<AccountAllocation>>;
    async fn upsert_allocation(&self, allocation: AccountAllocation) -> Result<AccountAllocation>;
}

/// Trait for allocation service operations
#[async_trait]
pub trait AllocationServiceTrait: Send + Sync {
    fn get_allocation(&self, account_id: &str) -> Result<AccountAllocation>;
    fn list_allocations(&self) -> Result<Vec<AccountAllocation>>;
    async fn save_allocation(&self, allocation: AccountAllocation) -> Result<AccountAllocation>;
    fn redistribute(
        &self,
        account_id: &str,
        region: Region,
        percent: Decimal,
    ) -> Result<RedistributionPreview>;
}

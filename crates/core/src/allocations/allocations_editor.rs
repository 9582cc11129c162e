//! Interactive editing session over one account's region allocation.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use super::{
    AccountAllocation, AllocationServiceTrait, ChangeRecord, RegionAllocation, RegionSetting,
};
use crate::errors::Result;
use crate::regions::Region;

/// Whether the edited allocation differs from the saved baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorState {
    Clean,
    Dirty,
}

/// Receives redraw notifications from an [`AllocationEditor`].
pub trait AllocationObserver: Send + Sync {
    /// A region's percentage or hedge flag changed.
    fn region_changed(&self, _region: Region, _setting: RegionSetting) {}

    /// The editor moved between clean and dirty.
    fn state_changed(&self, _state: EditorState) {}

    /// A save went through; dependent views should refetch.
    fn allocation_saved(&self, _allocation: &AccountAllocation) {}
}

/// Observer that ignores every notification.
pub struct NoopObserver;

impl AllocationObserver for NoopObserver {}

/// Holds the working copy of an allocation next to its saved baseline.
///
/// Every slider move goes through [`RegionAllocation::set_region`], so the
/// working copy sums to 100 after each call. Saving validates the total
/// before anything is sent to the service.
pub struct AllocationEditor {
    record: AccountAllocation,
    baseline: RegionAllocation,
    state: EditorState,
    service: Arc<dyn AllocationServiceTrait>,
    observer: Arc<dyn AllocationObserver>,
}

impl AllocationEditor {
    pub fn new(record: AccountAllocation, service: Arc<dyn AllocationServiceTrait>) -> Self {
        Self {
            baseline: record.regions.clone(),
            record,
            state: EditorState::Clean,
            service,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Loads the saved allocation for `account_id` and opens an editor on it.
    pub fn open(account_id: &str, service: Arc<dyn AllocationServiceTrait>) -> Result<Self> {
        let record = service.get_allocation(account_id)?;
        Ok(Self::new(record, service))
    }

    pub fn with_observer(mut self, observer: Arc<dyn AllocationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn record(&self) -> &AccountAllocation {
        &self.record
    }

    pub fn current(&self) -> &RegionAllocation {
        &self.record.regions
    }

    pub fn baseline(&self) -> &RegionAllocation {
        &self.baseline
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Applies one slider move and returns the regions that were redrawn.
    pub fn set_region(&mut self, region: Region, percent: Decimal) -> Vec<Region> {
        let affected = self.record.regions.set_region(region, percent);
        for changed in &affected {
            self.observer
                .region_changed(*changed, self.record.regions.setting(*changed));
        }
        self.refresh_state();
        affected
    }

    /// Same as [`set_region`](Self::set_region) for a raw region key.
    pub fn set_region_by_key(&mut self, key: &str, percent: Decimal) -> Result<Vec<Region>> {
        let region: Region = key.parse()?;
        Ok(self.set_region(region, percent))
    }

    pub fn set_currency_hedge(&mut self, region: Region, hedged: bool) -> bool {
        let changed = self.record.regions.set_currency_hedge(region, hedged);
        if changed {
            self.observer
                .region_changed(region, self.record.regions.setting(region));
            self.refresh_state();
        }
        changed
    }

    pub fn changes(&self) -> ChangeRecord {
        self.record.regions.changes_from(&self.baseline)
    }

    pub fn has_changed(&self) -> bool {
        self.changes().has_changed()
    }

    /// Restores every region from the baseline. No I/O.
    pub fn reset(&mut self) {
        self.record.regions = self.baseline.clone();
        for (region, setting) in self.record.regions.iter() {
            self.observer.region_changed(region, *setting);
        }
        self.refresh_state();
    }

    /// Validates the 100% total, persists the allocation and adopts it as the
    /// new baseline. On failure the working copy stays as it was.
    pub async fn save(&mut self) -> Result<()> {
        self.record.regions.validate_total()?;

        let saved = match self.service.save_allocation(self.record.clone()).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(
                    "Saving allocation for {} failed: {}",
                    self.record.account_id, e
                );
                return Err(e);
            }
        };

        self.baseline = saved.regions.clone();
        self.record = saved;
        self.observer.allocation_saved(&self.record);
        self.refresh_state();
        Ok(())
    }

    fn refresh_state(&mut self) {
        let next = if self.has_changed() {
            EditorState::Dirty
        } else {
            EditorState::Clean
        };
        if next != self.state {
            debug!(
                "Allocation editor for {} is now {:?}",
                self.record.account_id, next
            );
            self.state = next;
            self.observer.state_changed(next);
        }
    }
}

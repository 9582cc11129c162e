//! Keeps the nine region percentages summing to 100 while one slider moves.

use log::debug;
use rust_decimal::Decimal;

use super::RegionAllocation;
use crate::constants::{FULL_ALLOCATION, MIN_REGION_PERCENT, PERCENT_DECIMAL_PRECISION};
use crate::regions::Region;

impl RegionAllocation {
    /// Moves `region` to `percent` and redistributes the difference across
    /// the other regions.
    ///
    /// Points taken by an increase come from the default absorber first
    /// (`dm`, or `au` when `dm` itself moves), then from the remaining regions
    /// largest first. Points freed by a decrease go to the absorber, with any
    /// overflow handed to the remaining regions largest first. A final
    /// reconciliation pass pins the total to exactly 100.
    ///
    /// Returns every region whose percentage changed, the moved one included.
    /// Input is not range checked; callers clamp to [0, 100].
    pub fn set_region(&mut self, region: Region, percent: Decimal) -> Vec<Region> {
        let target = percent.round_dp(PERCENT_DECIMAL_PRECISION);
        let delta = target - self.percent(region);
        if delta.is_zero() {
            return Vec::new();
        }

        let before = self.settings;
        let absorber = region.default_absorber();

        if delta > Decimal::ZERO {
            let unfunded = self.take_points(region, absorber, delta);
            if !unfunded.is_zero() {
                debug!(
                    "Raising {} by {} left {} points unfunded",
                    region, delta, unfunded
                );
            }
        } else {
            let unplaced = self.give_points(region, absorber, -delta);
            if !unplaced.is_zero() {
                debug!(
                    "Lowering {} by {} left {} points unplaced",
                    region, -delta, unplaced
                );
            }
        }

        self.assign(region, target);
        self.reconcile();

        Region::ALL
            .iter()
            .copied()
            .filter(|r| self.percent(*r) != before[r.index()].percent)
            .collect()
    }

    /// Pins the total to 100 by letting the largest region absorb the drift.
    /// Returns the adjusted region, if any.
    pub fn reconcile(&mut self) -> Option<Region> {
        let drift = FULL_ALLOCATION - self.total();
        if drift.is_zero() {
            return None;
        }
        let largest = self.largest_region();
        let adjusted = (self.percent(largest) + drift).max(MIN_REGION_PERCENT);
        debug!(
            "Reconciling allocation drift of {} into {} ({} -> {})",
            drift,
            largest,
            self.percent(largest),
            adjusted
        );
        self.assign(largest, adjusted);
        Some(largest)
    }

    /// Withdraws `amount` points, absorber first. Returns what could not be taken.
    fn take_points(&mut self, changed: Region, absorber: Region, amount: Decimal) -> Decimal {
        let mut remaining = amount - self.withdraw(absorber, amount);
        for sibling in self.ranked_siblings(changed, absorber) {
            if remaining.is_zero() {
                break;
            }
            remaining -= self.withdraw(sibling, remaining);
        }
        remaining
    }

    /// Deposits `amount` points, absorber first. Returns what could not be placed.
    fn give_points(&mut self, changed: Region, absorber: Region, amount: Decimal) -> Decimal {
        let mut remaining = amount - self.deposit(absorber, amount);
        for sibling in self.ranked_siblings(changed, absorber) {
            if remaining.is_zero() {
                break;
            }
            remaining -= self.deposit(sibling, remaining);
        }
        remaining
    }

    fn withdraw(&mut self, region: Region, amount: Decimal) -> Decimal {
        let available = self.percent(region).max(MIN_REGION_PERCENT);
        let taken = available.min(amount);
        self.assign(region, self.percent(region) - taken);
        taken
    }

    fn deposit(&mut self, region: Region, amount: Decimal) -> Decimal {
        let headroom = (FULL_ALLOCATION - self.percent(region)).max(MIN_REGION_PERCENT);
        let given = headroom.min(amount);
        self.assign(region, self.percent(region) + given);
        given
    }

    /// Regions other than the moved one and its absorber, largest first.
    /// Equal values keep declaration order.
    fn ranked_siblings(&self, changed: Region, absorber: Region) -> Vec<Region> {
        let mut siblings: Vec<Region> = Region::ALL
            .iter()
            .copied()
            .filter(|r| *r != changed && *r != absorber)
            .collect();
        siblings.sort_by(|a, b| self.percent(*b).cmp(&self.percent(*a)));
        siblings
    }

    fn largest_region(&self) -> Region {
        let mut largest = Region::ALL[0];
        for region in Region::ALL.iter().copied().skip(1) {
            if self.percent(region) > self.percent(largest) {
                largest = region;
            }
        }
        largest
    }
}

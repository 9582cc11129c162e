//! Portfolio set domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::allocations::{AccountAllocation, RegionAllocation};
use crate::constants::CUSTOM_PORTFOLIO_SET_PREFIX;
use crate::regions::Region;

/// Weight of one region inside a portfolio set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionWeight {
    pub region: Region,
    pub title: String,
    pub weight: Decimal,
    pub currency_hedge: bool,
}

impl RegionWeight {
    pub fn new(region: Region, weight: Decimal, currency_hedge: bool) -> Self {
        Self {
            region,
            title: region.title().to_string(),
            weight,
            currency_hedge,
        }
    }
}

/// Regional composition shown alongside an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSet {
    pub id: String,
    pub base_set_id: String,
    pub name: String,
    pub is_custom: bool,
    pub regions: Vec<RegionWeight>,
}

impl PortfolioSet {
    pub fn weight(&self, region: Region) -> Option<Decimal> {
        self.regions
            .iter()
            .find(|w| w.region == region)
            .map(|w| w.weight)
    }

    /// Derives the custom set for an account: the base set's identity with
    /// weights and hedges taken from the allocation.
    pub fn customized(&self, id: String, allocation: &RegionAllocation) -> PortfolioSet {
        PortfolioSet {
            id,
            base_set_id: self.base_set_id.clone(),
            name: self.name.clone(),
            is_custom: true,
            regions: allocation
                .iter()
                .map(|(region, setting)| {
                    RegionWeight::new(region, setting.percent, setting.currency_hedge)
                })
                .collect(),
        }
    }
}

/// Cache identity of a portfolio set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortfolioSetKey {
    Base(String),
    Custom {
        account_id: String,
        portfolio_set_id: String,
    },
}

impl PortfolioSetKey {
    /// Accounts without any custom sizes use their base set directly.
    pub fn for_account(allocation: &AccountAllocation) -> Self {
        if allocation.regions.is_unallocated() {
            PortfolioSetKey::Base(allocation.portfolio_set_id.clone())
        } else {
            PortfolioSetKey::Custom {
                account_id: allocation.account_id.clone(),
                portfolio_set_id: allocation.portfolio_set_id.clone(),
            }
        }
    }

    pub fn base_set_id(&self) -> &str {
        match self {
            PortfolioSetKey::Base(id) => id,
            PortfolioSetKey::Custom {
                portfolio_set_id, ..
            } => portfolio_set_id,
        }
    }

    pub fn cache_key(&self) -> String {
        match self {
            PortfolioSetKey::Base(id) => id.clone(),
            PortfolioSetKey::Custom {
                account_id,
                portfolio_set_id,
            } => format!(
                "{}_{}_{}",
                CUSTOM_PORTFOLIO_SET_PREFIX, account_id, portfolio_set_id
            ),
        }
    }
}

impl fmt::Display for PortfolioSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unallocated_accounts_use_the_base_set() {
        let record = AccountAllocation::new("acc-1", "balanced", RegionAllocation::new());
        let key = PortfolioSetKey::for_account(&record);
        assert_eq!(key, PortfolioSetKey::Base("balanced".to_string()));
        assert_eq!(key.cache_key(), "balanced");
    }

    #[test]
    fn custom_accounts_get_a_composite_key() {
        let regions = RegionAllocation::new().with_percent(Region::Au, dec!(100));
        let record = AccountAllocation::new("acc-1", "balanced", regions);
        let key = PortfolioSetKey::for_account(&record);
        assert_eq!(key.cache_key(), "goal_acc-1_balanced");
        assert_eq!(key.base_set_id(), "balanced");
    }

    #[test]
    fn customized_set_takes_weights_from_allocation() {
        let base = PortfolioSet {
            id: "balanced".to_string(),
            base_set_id: "balanced".to_string(),
            name: "Balanced".to_string(),
            is_custom: false,
            regions: vec![RegionWeight::new(Region::Usa, dec!(100), false)],
        };
        let allocation = RegionAllocation::new()
            .with_percent(Region::Japan, dec!(60))
            .with_percent(Region::Em, dec!(40))
            .with_currency_hedge(Region::Japan, true);

        let custom = base.customized("goal_a_balanced".to_string(), &allocation);

        assert!(custom.is_custom);
        assert_eq!(custom.name, "Balanced");
        assert_eq!(custom.regions.len(), Region::COUNT);
        assert_eq!(custom.weight(Region::Japan), Some(dec!(60)));
        assert_eq!(custom.weight(Region::Usa), Some(dec!(0)));
        assert!(custom.regions.iter().any(|w| w.region == Region::Japan && w.currency_hedge));
    }
}

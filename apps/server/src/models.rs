use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use regionfolio_core::portfolio_sets::{
    PortfolioSet as CorePortfolioSet, RegionWeight as CoreRegionWeight,
};
use regionfolio_core::regions::RegionInfo;
use regionfolio_core::RegionAllocation;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub key: String,
    pub title: String,
}

impl From<RegionInfo> for Region {
    fn from(info: RegionInfo) -> Self {
        Self {
            key: info.key,
            title: info.title,
        }
    }
}

/// Body of a save. Region fields are flat `<key>_size` / `<key>_currency_hedge`
/// entries next to the camelCase identifiers.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AllocationUpdate {
    #[serde(default)]
    pub account_id: Option<String>,
    pub portfolio_set_id: String,
    #[serde(flatten)]
    pub regions: RegionAllocation,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RedistributeRequest {
    pub region: String,
    pub percentage: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegionWeight {
    pub region: String,
    pub title: String,
    pub weight: Decimal,
    pub currency_hedge: bool,
}

impl From<CoreRegionWeight> for RegionWeight {
    fn from(w: CoreRegionWeight) -> Self {
        Self {
            region: w.region.key().to_string(),
            title: w.title,
            weight: w.weight,
            currency_hedge: w.currency_hedge,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSet {
    pub id: String,
    pub base_set_id: String,
    pub name: String,
    pub is_custom: bool,
    pub regions: Vec<RegionWeight>,
}

impl From<CorePortfolioSet> for PortfolioSet {
    fn from(set: CorePortfolioSet) -> Self {
        Self {
            id: set.id,
            base_set_id: set.base_set_id,
            name: set.name,
            is_custom: set.is_custom,
            regions: set.regions.into_iter().map(RegionWeight::from).collect(),
        }
    }
}

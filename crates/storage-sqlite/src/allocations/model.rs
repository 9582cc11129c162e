//! Database model for account allocations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use regionfolio_core::allocations::{AccountAllocation, RegionAllocation, RegionSetting};
use regionfolio_core::Region;

/// One row per account. Sizes are stored as TEXT to keep decimal precision.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::account_allocations)]
#[diesel(primary_key(account_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountAllocationDB {
    pub account_id: String,
    pub portfolio_set_id: String,
    pub au_size: String,
    pub au_currency_hedge: bool,
    pub dm_size: String,
    pub dm_currency_hedge: bool,
    pub usa_size: String,
    pub usa_currency_hedge: bool,
    pub uk_size: String,
    pub uk_currency_hedge: bool,
    pub europe_size: String,
    pub europe_currency_hedge: bool,
    pub japan_size: String,
    pub japan_currency_hedge: bool,
    pub asia_size: String,
    pub asia_currency_hedge: bool,
    pub china_size: String,
    pub china_currency_hedge: bool,
    pub em_size: String,
    pub em_currency_hedge: bool,
    pub updated_at: NaiveDateTime,
}

impl AccountAllocationDB {
    /// Maps a domain allocation to a row, stamping `updated_at`.
    pub fn from_domain(allocation: &AccountAllocation, updated_at: NaiveDateTime) -> Self {
        let r = &allocation.regions;
        let size = |region: Region| r.percent(region).normalize().to_string();
        let hedge = |region: Region| r.currency_hedge(region);
        Self {
            account_id: allocation.account_id.clone(),
            portfolio_set_id: allocation.portfolio_set_id.clone(),
            au_size: size(Region::Au),
            au_currency_hedge: hedge(Region::Au),
            dm_size: size(Region::Dm),
            dm_currency_hedge: hedge(Region::Dm),
            usa_size: size(Region::Usa),
            usa_currency_hedge: hedge(Region::Usa),
            uk_size: size(Region::Uk),
            uk_currency_hedge: hedge(Region::Uk),
            europe_size: size(Region::Europe),
            europe_currency_hedge: hedge(Region::Europe),
            japan_size: size(Region::Japan),
            japan_currency_hedge: hedge(Region::Japan),
            asia_size: size(Region::Asia),
            asia_currency_hedge: hedge(Region::Asia),
            china_size: size(Region::China),
            china_currency_hedge: hedge(Region::China),
            em_size: size(Region::Em),
            em_currency_hedge: hedge(Region::Em),
            updated_at,
        }
    }

    fn settings(&self) -> [(Region, &str, bool); Region::COUNT] {
        [
            (Region::Au, self.au_size.as_str(), self.au_currency_hedge),
            (Region::Dm, self.dm_size.as_str(), self.dm_currency_hedge),
            (Region::Usa, self.usa_size.as_str(), self.usa_currency_hedge),
            (Region::Uk, self.uk_size.as_str(), self.uk_currency_hedge),
            (Region::Europe, self.europe_size.as_str(), self.europe_currency_hedge),
            (Region::Japan, self.japan_size.as_str(), self.japan_currency_hedge),
            (Region::Asia, self.asia_size.as_str(), self.asia_currency_hedge),
            (Region::China, self.china_size.as_str(), self.china_currency_hedge),
            (Region::Em, self.em_size.as_str(), self.em_currency_hedge),
        ]
    }
}

impl From<AccountAllocationDB> for AccountAllocation {
    fn from(db: AccountAllocationDB) -> Self {
        let regions = RegionAllocation::from_settings(db.settings().into_iter().map(
            |(region, size, currency_hedge)| {
                (
                    region,
                    RegionSetting {
                        percent: Decimal::from_str(size).unwrap_or_default(),
                        currency_hedge,
                    },
                )
            },
        ));
        AccountAllocation {
            account_id: db.account_id,
            portfolio_set_id: db.portfolio_set_id,
            regions,
            updated_at: Some(db.updated_at),
        }
    }
}

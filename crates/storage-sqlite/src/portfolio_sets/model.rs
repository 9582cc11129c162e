//! Database model for portfolio sets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use regionfolio_core::portfolio_sets::{PortfolioSet, RegionWeight};

use crate::errors::StorageError;

/// Base portfolio set row. Region weights are a JSON array.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioSetDB {
    pub id: String,
    pub name: String,
    pub region_weights: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PortfolioSetDB> for PortfolioSet {
    type Error = StorageError;

    fn try_from(db: PortfolioSetDB) -> Result<Self, Self::Error> {
        let regions: Vec<RegionWeight> = serde_json::from_str(&db.region_weights)?;
        Ok(PortfolioSet {
            base_set_id: db.id.clone(),
            id: db.id,
            name: db.name,
            is_custom: false,
            regions,
        })
    }
}

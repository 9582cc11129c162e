use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use regionfolio_core::portfolio_sets::{PortfolioSet, PortfolioSetRepositoryTrait};
use regionfolio_core::Result;

use super::model::PortfolioSetDB;
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::portfolio_sets::dsl::*;

pub struct PortfolioSetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl PortfolioSetRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        PortfolioSetRepository { pool }
    }
}

impl PortfolioSetRepositoryTrait for PortfolioSetRepository {
    fn get_portfolio_set(&self, set_id: &str) -> Result<Option<PortfolioSet>> {
        let mut conn = get_connection(&self.pool)?;
        let row = portfolio_sets
            .find(set_id)
            .select(PortfolioSetDB::as_select())
            .first::<PortfolioSetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        match row {
            Some(row) => Ok(Some(PortfolioSet::try_from(row)?)),
            None => Ok(None),
        }
    }

    fn list_portfolio_sets(&self) -> Result<Vec<PortfolioSet>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolio_sets
            .order(name.asc())
            .select(PortfolioSetDB::as_select())
            .load::<PortfolioSetDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| PortfolioSet::try_from(row).map_err(Into::into))
            .collect()
    }
}

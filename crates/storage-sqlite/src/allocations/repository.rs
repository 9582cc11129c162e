use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use regionfolio_core::allocations::{AccountAllocation, AllocationRepositoryTrait};
use regionfolio_core::Result;

use super::model::AccountAllocationDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::account_allocations;
use crate::schema::account_allocations::dsl::*;

pub struct AllocationRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AllocationRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        AllocationRepository { pool, writer }
    }
}

#[async_trait]
impl AllocationRepositoryTrait for AllocationRepository {
    fn get_allocation(&self, account_id_value: &str) -> Result<Option<AccountAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let row = account_allocations
            .find(account_id_value)
            .select(AccountAllocationDB::as_select())
            .first::<AccountAllocationDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(AccountAllocation::from))
    }

    fn list_allocations(&self) -> Result<Vec<AccountAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = account_allocations
            .order(account_id.asc())
            .select(AccountAllocationDB::as_select())
            .load::<AccountAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(AccountAllocation::from).collect())
    }

    async fn upsert_allocation(&self, allocation: AccountAllocation) -> Result<AccountAllocation> {
        let row = AccountAllocationDB::from_domain(&allocation, Utc::now().naive_utc());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AccountAllocation> {
                let saved = diesel::insert_into(account_allocations::table)
                    .values(&row)
                    .on_conflict(account_allocations::account_id)
                    .do_update()
                    .set(&row)
                    .returning(AccountAllocationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(AccountAllocation::from(saved))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use regionfolio_core::errors::{DatabaseError, Error};
    use regionfolio_core::{Region, RegionAllocation};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (AllocationRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (AllocationRepository::new(pool, writer), temp_dir)
    }

    fn balanced(account: &str) -> AccountAllocation {
        let regions = RegionAllocation::new()
            .with_percent(Region::Au, dec!(25.5))
            .with_percent(Region::Usa, dec!(50))
            .with_percent(Region::Em, dec!(24.5))
            .with_currency_hedge(Region::Usa, true);
        AccountAllocation::new(account, "core", regions)
    }

    #[tokio::test]
    async fn missing_allocation_is_none() {
        let (repo, _dir) = create_test_repository().await;
        assert!(repo.get_allocation("nobody").unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_inserts_then_updates() {
        let (repo, _dir) = create_test_repository().await;

        let saved = repo.upsert_allocation(balanced("acc-1")).await.unwrap();
        assert!(saved.updated_at.is_some());
        assert_eq!(saved.regions.percent(Region::Au), dec!(25.5));

        let mut changed = saved.clone();
        changed.regions.set_region(Region::Au, dec!(30));
        changed.regions.set_currency_hedge(Region::Usa, false);
        repo.upsert_allocation(changed.clone()).await.unwrap();

        let loaded = repo.get_allocation("acc-1").unwrap().unwrap();
        assert_eq!(loaded.regions, changed.regions);
        assert_eq!(loaded.regions.total(), dec!(100));
        assert_eq!(repo.list_allocations().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_ordered_by_account() {
        let (repo, _dir) = create_test_repository().await;
        repo.upsert_allocation(balanced("b")).await.unwrap();
        repo.upsert_allocation(balanced("a")).await.unwrap();

        let ids: Vec<String> = repo
            .list_allocations()
            .unwrap()
            .into_iter()
            .map(|a| a.account_id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn unknown_portfolio_set_is_rejected() {
        let (repo, _dir) = create_test_repository().await;
        let mut allocation = balanced("acc-1");
        allocation.portfolio_set_id = "missing".to_string();

        let err = repo.upsert_allocation(allocation).await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::ForeignKeyViolation(_))));
        assert!(repo.get_allocation("acc-1").unwrap().is_none());
    }
}

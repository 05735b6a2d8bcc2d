use crate::projection::Projection;
use connectors::sql::base::{adapter::SqlAdapter, error::DbError};
use planner::query::builder::insert::InsertBuilder;
use tracing::info;

/// Runs a projection as one `INSERT ... SELECT` that overwrites rows whose
/// key already exists, so repeated runs converge instead of duplicating.
pub struct BulkUpsertExecutor<'a> {
    adapter: &'a dyn SqlAdapter,
}

impl<'a> BulkUpsertExecutor<'a> {
    pub fn new(adapter: &'a dyn SqlAdapter) -> Self {
        BulkUpsertExecutor { adapter }
    }

    pub async fn upsert(&self, projection: Projection, key: &[String]) -> Result<u64, DbError> {
        let target = projection.target.name.clone();
        let insert = InsertBuilder::new(projection.target)
            .columns(&projection.columns)
            .select(projection.query)
            .on_conflict_update(key)
            .build();

        let rows = self.adapter.insert_from_select(&insert).await?;
        info!(document = %target, rows, "Upserted projection");
        Ok(rows)
    }
}

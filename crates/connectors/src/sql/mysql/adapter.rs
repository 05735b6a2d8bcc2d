use crate::sql::base::{
    adapter::{DatabaseKind, SqlAdapter},
    error::{ConnectorError, DbError},
};
use async_trait::async_trait;
use planner::query::dialect::{self, Dialect};
use sqlx::{MySql, Pool};
use tracing::trace;

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool<MySql>,
    dialect: dialect::MySql,
}

const QUERY_TABLE_EXISTS_SQL: &str = include_str!("sql/table_exists.sql");

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let pool = Pool::connect(url).await?;
        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    async fn exec(&self, query: &str) -> Result<u64, DbError> {
        trace!(sql = %query, "Executing statement");
        let result = sqlx::query(query).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn table_exists(&self, schema: Option<&str>, table: &str) -> Result<bool, DbError> {
        let count: i64 = sqlx::query_scalar(QUERY_TABLE_EXISTS_SQL)
            .bind(schema)
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }
}

use crate::sql::base::{
    adapter::{DatabaseKind, SqlAdapter},
    error::{ConnectorError, DbError},
};
use async_trait::async_trait;
use planner::query::dialect::{self, Dialect};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};
use tracing::{info, trace};

/// SQLite adapter backed by a single pooled connection, so that databases
/// attached with [`SqliteAdapter::attach`] stay visible to every statement.
#[derive(Clone)]
pub struct SqliteAdapter {
    pool: SqlitePool,
    dialect: dialect::Sqlite,
}

impl SqliteAdapter {
    /// Makes the database file at `path` addressable as `schema` on this
    /// connection.
    pub async fn attach(&self, path: &str, schema: &str) -> Result<(), DbError> {
        let sql = format!(
            "ATTACH DATABASE '{}' AS {}",
            path.replace('\'', "''"),
            self.dialect.quote_identifier(schema)
        );
        self.exec(&sql).await?;
        info!(path, schema, "Attached SQLite database");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Extracts the file path from a `sqlite://` or `sqlite:` url.
pub fn sqlite_path(url: &str) -> &str {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    path.split('?').next().unwrap_or(path)
}

#[async_trait]
impl SqlAdapter for SqliteAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Ok(SqliteAdapter {
            pool,
            dialect: dialect::Sqlite,
        })
    }

    async fn exec(&self, query: &str) -> Result<u64, DbError> {
        trace!(sql = %query, "Executing statement");
        let result = sqlx::query(query).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn table_exists(&self, schema: Option<&str>, table: &str) -> Result<bool, DbError> {
        let master = match schema {
            Some(schema) => format!("{}.sqlite_master", self.dialect.quote_identifier(schema)),
            None => "sqlite_master".to_string(),
        };
        let sql = format!("SELECT COUNT(*) FROM {master} WHERE type = 'table' AND name = ?");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
    }
}

use crate::sql::base::error::{ConnectorError, DbError};
use async_trait::async_trait;
use planner::query::{
    ast::{common::TableRef, insert::Insert},
    builder::truncate::TruncateBuilder,
    dialect::Dialect,
    renderer::to_sql,
};
use serde::Deserialize;
use std::{fmt, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    MySql,
    Sqlite,
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::MySql => write!(f, "mysql"),
            DatabaseKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(DatabaseKind::MySql),
            "sqlite" => Ok(DatabaseKind::Sqlite),
            other => Err(other.to_string()),
        }
    }
}

/// A connection to a relational database that evaluates set-based
/// statements server-side. Rows never travel through the client.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    async fn connect(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    // Exec

    /// Runs one statement and returns the number of rows the database
    /// reports as affected.
    async fn exec(&self, query: &str) -> Result<u64, DbError>;

    // Introspection

    /// Whether `table` exists. `schema` defaults to the connection's current
    /// database when `None`.
    async fn table_exists(&self, schema: Option<&str>, table: &str) -> Result<bool, DbError>;

    async fn truncate_table(&self, table: &TableRef) -> Result<(), DbError> {
        let stmt = TruncateBuilder::new(table.clone()).build();
        let sql = to_sql(&stmt, self.dialect());
        debug!(sql = %sql, "Clearing table");
        self.exec(&sql).await?;
        Ok(())
    }

    /// Runs an `INSERT ... SELECT` statement and returns the number of rows
    /// the database reports as affected.
    async fn insert_from_select(&self, insert: &Insert) -> Result<u64, DbError> {
        let select = insert.select.as_ref().ok_or_else(|| {
            DbError::QueryBuildError(format!("insert into `{}` has no source query", insert.table.name))
        })?;
        if select.columns.len() != insert.columns.len() {
            return Err(DbError::QueryBuildError(format!(
                "insert into `{}` lists {} columns but its query yields {}",
                insert.table.name,
                insert.columns.len(),
                select.columns.len()
            )));
        }

        let sql = to_sql(insert, self.dialect());
        debug!(sql = %sql, "Executing insert from select");
        self.exec(&sql).await
    }

    // Dialect
    fn dialect(&self) -> &dyn Dialect;
    fn kind(&self) -> DatabaseKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_kind_from_str() {
        assert_eq!("MySQL".parse::<DatabaseKind>(), Ok(DatabaseKind::MySql));
        assert_eq!("sqlite".parse::<DatabaseKind>(), Ok(DatabaseKind::Sqlite));
        assert_eq!(
            "postgres".parse::<DatabaseKind>(),
            Err("postgres".to_string())
        );
        assert_eq!(DatabaseKind::Sqlite.to_string(), "sqlite");
    }
}

use crate::{
    error::AdapterError,
    sql::{
        base::adapter::{DatabaseKind, SqlAdapter},
        mysql::adapter::MySqlAdapter,
        sqlite::adapter::SqliteAdapter,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub enum Adapter {
    MySql(MySqlAdapter),
    Sqlite(SqliteAdapter),
}

impl Adapter {
    pub async fn sql(kind: DatabaseKind, conn_str: &str) -> Result<Self, AdapterError> {
        match kind {
            DatabaseKind::MySql => {
                let adapter = MySqlAdapter::connect(conn_str).await?;
                Ok(Adapter::MySql(adapter))
            }
            DatabaseKind::Sqlite => {
                let adapter = SqliteAdapter::connect(conn_str).await?;
                Ok(Adapter::Sqlite(adapter))
            }
        }
    }

    pub fn get_sql(&self) -> &(dyn SqlAdapter + Send + Sync) {
        match self {
            Adapter::MySql(adapter) => adapter,
            Adapter::Sqlite(adapter) => adapter,
        }
    }

    pub fn into_shared(self) -> Arc<dyn SqlAdapter> {
        match self {
            Adapter::MySql(adapter) => Arc::new(adapter),
            Adapter::Sqlite(adapter) => Arc::new(adapter),
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        self.get_sql().kind()
    }
}

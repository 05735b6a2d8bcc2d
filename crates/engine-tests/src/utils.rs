use connectors::sql::{
    base::adapter::SqlAdapter,
    sqlite::adapter::SqliteAdapter,
};
use engine_core::{
    connectors::{destination::Destination, source::Source},
    mapper::DocumentMap,
    progress::{ChannelProgressSink, ProgressReporter},
    stage::MigrationStage,
};
use model::{
    documents::{ColumnMapping, DocumentMapping},
    events::progress::ProgressEvent,
};
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Schema name the legacy database is attached under.
pub const SOURCE_SCHEMA: &str = "magento1";

/// Already migrated sales tables plus the empty grid documents.
pub const DESTINATION_DDL: &[&str] = &[
    "CREATE TABLE sales_order (
        entity_id INTEGER PRIMARY KEY,
        increment_id TEXT NOT NULL,
        status TEXT NOT NULL,
        shipping_address_id INTEGER,
        billing_address_id INTEGER
    )",
    "CREATE TABLE sales_order_address (
        entity_id INTEGER PRIMARY KEY,
        firstname TEXT,
        lastname TEXT,
        city TEXT
    )",
    "CREATE TABLE sales_invoice (entity_id INTEGER PRIMARY KEY, order_id INTEGER, increment_id TEXT)",
    "CREATE TABLE sales_shipment (entity_id INTEGER PRIMARY KEY, order_id INTEGER, increment_id TEXT)",
    "CREATE TABLE sales_creditmemo (entity_id INTEGER PRIMARY KEY, order_id INTEGER, increment_id TEXT)",
    "CREATE TABLE sales_order_grid (
        entity_id INTEGER PRIMARY KEY,
        increment_id TEXT,
        status TEXT,
        shipping_name TEXT,
        billing_name TEXT
    )",
    "CREATE TABLE sales_invoice_grid (
        entity_id INTEGER PRIMARY KEY,
        increment_id TEXT,
        order_increment_id TEXT,
        billing_name TEXT
    )",
    "CREATE TABLE sales_shipment_grid (
        entity_id INTEGER PRIMARY KEY,
        increment_id TEXT,
        order_increment_id TEXT,
        shipping_name TEXT
    )",
    "CREATE TABLE sales_creditmemo_grid (
        entity_id INTEGER PRIMARY KEY,
        increment_id TEXT,
        order_increment_id TEXT,
        billing_name TEXT
    )",
];

/// Orders 1..3; order 2 has no shipping address.
pub const DESTINATION_DATA: &[&str] = &[
    "INSERT INTO sales_order_address VALUES
        (10, 'Ada', 'Lovelace', 'London'),
        (11, 'Ada', 'Byron', 'London'),
        (12, 'Alan', 'Turing', 'Wilmslow'),
        (13, 'Grace', 'Hopper', 'Arlington'),
        (14, 'Grace', 'Murray', 'New York')",
    "INSERT INTO sales_order VALUES
        (1, '100000001', 'complete', 10, 11),
        (2, '100000002', 'pending', NULL, 12),
        (3, '100000003', 'processing', 13, 14)",
    "INSERT INTO sales_invoice VALUES (1, 1, '200000001'), (2, 3, '200000002')",
    "INSERT INTO sales_shipment VALUES (1, 1, '300000001')",
    "INSERT INTO sales_creditmemo VALUES (1, 3, '400000001')",
];

/// Legacy grids listing the ids to migrate. Order 4 no longer exists in the
/// destination's `sales_order`.
pub fn source_ddl(with_invoice_grid: bool) -> Vec<String> {
    let mut statements = vec![
        format!("CREATE TABLE {SOURCE_SCHEMA}.sales_flat_order_grid (entity_id INTEGER PRIMARY KEY)"),
        format!("INSERT INTO {SOURCE_SCHEMA}.sales_flat_order_grid VALUES (1), (2), (3), (4)"),
        format!("CREATE TABLE {SOURCE_SCHEMA}.sales_flat_shipment_grid (entity_id INTEGER PRIMARY KEY)"),
        format!("INSERT INTO {SOURCE_SCHEMA}.sales_flat_shipment_grid VALUES (1)"),
        format!("CREATE TABLE {SOURCE_SCHEMA}.sales_flat_creditmemo_grid (entity_id INTEGER PRIMARY KEY)"),
        format!("INSERT INTO {SOURCE_SCHEMA}.sales_flat_creditmemo_grid VALUES (1)"),
    ];
    if with_invoice_grid {
        statements.push(format!(
            "CREATE TABLE {SOURCE_SCHEMA}.sales_flat_invoice_grid (entity_id INTEGER PRIMARY KEY)"
        ));
        statements.push(format!(
            "INSERT INTO {SOURCE_SCHEMA}.sales_flat_invoice_grid VALUES (1), (2)"
        ));
    }
    statements
}

/// A destination database with the legacy database attached, both in a
/// temporary directory.
pub struct Fixture {
    dir: TempDir,
    pub adapter: SqliteAdapter,
}

impl Fixture {
    pub async fn new(with_invoice_grid: bool) -> Fixture {
        let dir = TempDir::new().expect("create temp dir");
        let adapter = SqliteAdapter::connect(&sqlite_url(&dir.path().join("magento2.db")))
            .await
            .expect("open destination");
        let source_path = dir.path().join("magento1.db");
        adapter
            .attach(source_path.to_str().expect("utf-8 path"), SOURCE_SCHEMA)
            .await
            .expect("attach source");

        let fixture = Fixture { dir, adapter };
        for sql in DESTINATION_DDL.iter().chain(DESTINATION_DATA) {
            fixture.execute(sql).await;
        }
        for sql in source_ddl(with_invoice_grid) {
            fixture.execute(&sql).await;
        }
        fixture
    }

    pub fn destination_path(&self) -> PathBuf {
        self.dir.path().join("magento2.db")
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.path().join("magento1.db")
    }

    pub fn dir(&self) -> &TempDir {
        &self.dir
    }

    pub async fn execute(&self, sql: &str) {
        self.adapter
            .exec(sql)
            .await
            .unwrap_or_else(|err| panic!("executing `{sql}`: {err}"));
    }

    pub fn shared(&self) -> Arc<dyn SqlAdapter> {
        Arc::new(self.adapter.clone())
    }

    pub fn stage(
        &self,
        documents: Vec<DocumentMapping>,
    ) -> (MigrationStage, UnboundedReceiver<ProgressEvent>) {
        let (sink, rx) = ChannelProgressSink::new();
        let stage = MigrationStage::new(
            DocumentMap::new(documents).expect("valid document map"),
            Source::new(self.shared(), "", Some(SOURCE_SCHEMA.to_string())),
            Destination::new(self.shared(), ""),
            ProgressReporter::new(Arc::new(sink)),
        );
        (stage, rx)
    }

    pub async fn row_count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.adapter.pool())
            .await
            .expect("count rows")
    }

    /// `(entity_id, <column>)` pairs of a grid, ordered by id.
    pub async fn grid_column(&self, table: &str, column: &str) -> Vec<(i64, Option<String>)> {
        sqlx::query_as(&format!(
            "SELECT entity_id, {column} FROM {table} ORDER BY entity_id"
        ))
        .fetch_all(self.adapter.pool())
        .await
        .expect("fetch grid")
    }
}

pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

fn full_name(alias: &str) -> String {
    format!("{alias}.firstname || ' ' || {alias}.lastname")
}

pub fn order_grid() -> DocumentMapping {
    DocumentMapping::new(
        "sales_order_grid",
        "sales_flat_order_grid",
        "sales_order_grid",
        vec![
            ColumnMapping::new("entity_id", "sales_order.entity_id"),
            ColumnMapping::new("increment_id", "sales_order.increment_id"),
            ColumnMapping::new("status", "UPPER(sales_order.status)"),
            ColumnMapping::new("shipping_name", full_name("sales_shipping_address")),
            ColumnMapping::new("billing_name", full_name("sales_billing_address")),
        ],
    )
}

pub fn invoice_grid() -> DocumentMapping {
    DocumentMapping::new(
        "sales_invoice_grid",
        "sales_flat_invoice_grid",
        "sales_invoice_grid",
        vec![
            ColumnMapping::new("entity_id", "sales_invoice.entity_id"),
            ColumnMapping::new("increment_id", "sales_invoice.increment_id"),
            ColumnMapping::new("order_increment_id", "sales_order.increment_id"),
            ColumnMapping::new("billing_name", full_name("sales_billing_address")),
        ],
    )
}

pub fn shipment_grid() -> DocumentMapping {
    DocumentMapping::new(
        "sales_shipment_grid",
        "sales_flat_shipment_grid",
        "sales_shipment_grid",
        vec![
            ColumnMapping::new("entity_id", "sales_shipment.entity_id"),
            ColumnMapping::new("increment_id", "sales_shipment.increment_id"),
            ColumnMapping::new("order_increment_id", "sales_order.increment_id"),
            ColumnMapping::new("shipping_name", full_name("sales_shipping_address")),
        ],
    )
}

pub fn creditmemo_grid() -> DocumentMapping {
    DocumentMapping::new(
        "sales_creditmemo_grid",
        "sales_flat_creditmemo_grid",
        "sales_creditmemo_grid",
        vec![
            ColumnMapping::new("entity_id", "sales_creditmemo.entity_id"),
            ColumnMapping::new("increment_id", "sales_creditmemo.increment_id"),
            ColumnMapping::new("order_increment_id", "sales_order.increment_id"),
            ColumnMapping::new("billing_name", full_name("sales_billing_address")),
        ],
    )
}

pub fn all_grids() -> Vec<DocumentMapping> {
    vec![order_grid(), invoice_grid(), shipment_grid(), creditmemo_grid()]
}

pub fn drain(rx: &mut UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

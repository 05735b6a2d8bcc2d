#[cfg(test)]
mod tests {
    use crate::utils::{
        DESTINATION_DDL, Fixture, SOURCE_SCHEMA, all_grids, drain, order_grid, sqlite_url,
    };
    use engine_config::settings::{Settings, context::build_stage};
    use engine_core::{
        connectors::{destination::Destination, source::Source},
        error::{ProjectionError, StageError},
        metrics::StageMetricsSnapshot,
        progress::TracingProgressSink,
        projection::{GridKind, ProjectionBuilder},
        selector::IdentifierSelector,
        stage::{Stage, StagePhase},
        upsert::BulkUpsertExecutor,
    };
    use model::{
        documents::{ColumnMapping, DocumentMapping},
        events::progress::{ProgressEvent, ProgressLevel},
    };
    use std::{fs, sync::Arc};
    use tracing_test::traced_test;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    // Scenario: orders {1,2,3}, order 2 has no shipping address, the legacy
    // grid still lists a deleted order 4.
    // Expected: exactly one grid row per surviving order, null shipping name
    // for order 2, and the same rows after a second run.
    #[tokio::test]
    #[traced_test]
    async fn order_grid_keeps_rows_without_address_and_converges() {
        let fixture = Fixture::new(true).await;
        let (mut stage, _rx) = fixture.stage(vec![order_grid()]);

        assert!(stage.perform().await.unwrap());
        assert_eq!(stage.phase(), StagePhase::AllDone);

        let shipping = fixture.grid_column("sales_order_grid", "shipping_name").await;
        assert_eq!(
            shipping,
            vec![
                (1, some("Ada Lovelace")),
                (2, None),
                (3, some("Grace Hopper")),
            ]
        );
        let billing = fixture.grid_column("sales_order_grid", "billing_name").await;
        assert_eq!(billing[1], (2, some("Alan Turing")));
        let status = fixture.grid_column("sales_order_grid", "status").await;
        assert_eq!(status[0], (1, some("COMPLETE")));

        assert!(stage.perform().await.unwrap());
        assert_eq!(fixture.row_count("sales_order_grid").await, 3);
        assert_eq!(
            fixture.grid_column("sales_order_grid", "shipping_name").await,
            shipping
        );
    }

    // Scenario: the legacy invoice grid does not exist.
    // Expected: the invoice grid is cleared and left empty, every other grid is
    // populated and progress reaches 100%.
    #[tokio::test]
    #[traced_test]
    async fn missing_invoice_source_is_skipped() {
        let fixture = Fixture::new(false).await;
        fixture
            .execute("INSERT INTO sales_invoice_grid VALUES (99, 'stale', NULL, NULL)")
            .await;
        let (mut stage, mut rx) = fixture.stage(all_grids());

        assert!(stage.perform().await.unwrap());

        assert_eq!(fixture.row_count("sales_order_grid").await, 3);
        assert_eq!(fixture.row_count("sales_invoice_grid").await, 0);
        assert_eq!(
            fixture.grid_column("sales_shipment_grid", "shipping_name").await,
            vec![(1, some("Ada Lovelace"))]
        );
        assert_eq!(
            fixture.grid_column("sales_creditmemo_grid", "order_increment_id").await,
            vec![(1, some("100000003"))]
        );

        assert_eq!(
            stage.metrics(),
            StageMetricsSnapshot {
                documents_migrated: 3,
                documents_skipped: 1,
                rows_affected: 5,
            }
        );
        let events = drain(&mut rx);
        assert_eq!(
            events.last(),
            Some(&ProgressEvent::Finished {
                depth: 0,
                level: ProgressLevel::Info,
                completed: 4,
                total: 4,
            })
        );
    }

    #[tokio::test]
    async fn invoice_grid_reads_addresses_through_order() {
        let fixture = Fixture::new(true).await;
        let (mut stage, _rx) = fixture.stage(all_grids());

        assert!(stage.perform().await.unwrap());

        assert_eq!(
            fixture.grid_column("sales_invoice_grid", "billing_name").await,
            vec![(1, some("Ada Byron")), (2, some("Grace Murray"))]
        );
        assert_eq!(
            fixture.grid_column("sales_invoice_grid", "order_increment_id").await,
            vec![(1, some("100000001")), (2, some("100000003"))]
        );
    }

    // Scenario: a destination document with no registered projection.
    // Expected: the run fails with UnknownDocumentType and nothing is cleared.
    #[tokio::test]
    async fn unknown_document_type_aborts_run() {
        let fixture = Fixture::new(true).await;
        fixture
            .execute("INSERT INTO sales_order_grid VALUES (99, 'stale', NULL, NULL, NULL)")
            .await;
        let quote_grid = DocumentMapping::new(
            "sales_quote_grid",
            "sales_flat_quote_grid",
            "sales_quote_grid",
            vec![ColumnMapping::new("entity_id", "sales_quote.entity_id")],
        );
        let (mut stage, _rx) = fixture.stage(vec![order_grid(), quote_grid]);

        let err = stage.perform().await.unwrap_err();

        assert!(matches!(
            err,
            StageError::Projection(ProjectionError::UnknownDocumentType(kind)) if kind == "sales_quote_grid"
        ));
        assert_eq!(fixture.row_count("sales_order_grid").await, 1);
    }

    // Scenario: the destination grid is missing, so clearing it fails; the
    // table is then restored and the stage re-run.
    // Expected: the first run surfaces the database error, the second run
    // starts from an empty progress stack and reports only its own work.
    #[tokio::test]
    async fn rerun_after_database_error_starts_fresh() {
        let fixture = Fixture::new(true).await;
        let (mut stage, mut rx) = fixture.stage(vec![order_grid()]);
        fixture.execute("DROP TABLE sales_order_grid").await;

        let err = stage.perform().await.unwrap_err();
        assert!(matches!(err, StageError::Database(_)));
        assert_eq!(drain(&mut rx).len(), 1, "outer span left open");

        let ddl = DESTINATION_DDL
            .iter()
            .find(|sql| sql.contains("CREATE TABLE sales_order_grid ("))
            .unwrap();
        fixture.execute(ddl).await;

        assert!(stage.perform().await.unwrap());
        let events = drain(&mut rx);
        assert_eq!(
            events.first(),
            Some(&ProgressEvent::Started {
                depth: 0,
                level: ProgressLevel::Info,
                total: 1,
            })
        );
        assert_eq!(events.last().map(ProgressEvent::depth), Some(0));
        assert_eq!(fixture.row_count("sales_order_grid").await, 3);

        assert!(stage.perform().await.unwrap());
        assert_eq!(
            stage.metrics(),
            StageMetricsSnapshot {
                documents_migrated: 1,
                documents_skipped: 0,
                rows_affected: 3,
            }
        );
    }

    async fn upsert_grid(source: &Source, destination: &Destination, grid: &DocumentMapping) -> u64 {
        let pending = IdentifierSelector::new(source)
            .pending_ids(&grid.source)
            .await
            .unwrap();
        let projection = ProjectionBuilder::new(destination).project(
            GridKind::Order,
            &grid.destination,
            &grid.columns,
            pending,
        );
        BulkUpsertExecutor::new(destination.adapter())
            .upsert(projection, &grid.key)
            .await
            .unwrap()
    }

    // The upsert alone, without clearing, overwrites changed rows in place.
    #[tokio::test]
    async fn upsert_overwrites_existing_rows() {
        let fixture = Fixture::new(true).await;
        let source = Source::new(fixture.shared(), "", Some(SOURCE_SCHEMA.to_string()));
        let destination = Destination::new(fixture.shared(), "");
        let grid = order_grid();

        assert_eq!(upsert_grid(&source, &destination, &grid).await, 3);
        fixture
            .execute("UPDATE sales_order SET status = 'canceled' WHERE entity_id = 2")
            .await;
        upsert_grid(&source, &destination, &grid).await;

        assert_eq!(fixture.row_count("sales_order_grid").await, 3);
        let status = fixture.grid_column("sales_order_grid", "status").await;
        assert_eq!(status[1], (2, some("CANCELED")));
    }

    #[tokio::test]
    async fn stage_built_from_config_file() {
        let fixture = Fixture::new(true).await;
        let config = format!(
            r#"
[source]
driver = "sqlite"
url = "{source}"
database = "{schema}"

[destination]
driver = "sqlite"
url = "{destination}"

[[order_grids.documents]]
kind = "sales_order_grid"
source = "sales_flat_order_grid"
destination = "sales_order_grid"
[order_grids.documents.columns]
entity_id = "sales_order.entity_id"
increment_id = "sales_order.increment_id"
shipping_name = "sales_shipping_address.firstname || ' ' || sales_shipping_address.lastname"
"#,
            source = sqlite_url(&fixture.source_path()),
            schema = SOURCE_SCHEMA,
            destination = sqlite_url(&fixture.destination_path()),
        );
        let path = fixture.dir().path().join("grid-migrate.toml");
        fs::write(&path, config).unwrap();

        let settings = Settings::load(&path).unwrap();
        let sink = Arc::new(TracingProgressSink::new(settings.progress.level));
        let mut stage = build_stage(&settings, sink).await.unwrap();

        assert!(stage.perform().await.unwrap());
        assert_eq!(
            fixture.grid_column("sales_order_grid", "increment_id").await,
            vec![
                (1, some("100000001")),
                (2, some("100000002")),
                (3, some("100000003")),
            ]
        );
    }
}

//! Per grid kind join plans and the projection queries built from them.

use crate::{connectors::destination::Destination, error::ProjectionError, selector::PendingIds};
use model::{
    core::identifiers::DocumentName,
    documents::{ColumnMapping, DEFAULT_KEY_COLUMN},
};
use planner::query::{
    ast::{common::{JoinKind, TableRef}, expr::Expr, select::Select},
    builder::select::SelectBuilder,
    eq, literal, qualified,
};
use std::{fmt, str::FromStr};

const ORDER: &str = "sales_order";
const ORDER_ADDRESS: &str = "sales_order_address";
const SHIPPING_ADDRESS: &str = "sales_shipping_address";
const BILLING_ADDRESS: &str = "sales_billing_address";

/// Destination grid documents with a registered projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Order,
    Invoice,
    Shipment,
    CreditMemo,
}

/// `LEFT JOIN document AS alias ON left_alias.left_column = alias.entity_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JoinStep {
    document: &'static str,
    alias: &'static str,
    left_alias: &'static str,
    left_column: &'static str,
}

const ADDRESS_JOINS: [JoinStep; 2] = [
    JoinStep {
        document: ORDER_ADDRESS,
        alias: SHIPPING_ADDRESS,
        left_alias: ORDER,
        left_column: "shipping_address_id",
    },
    JoinStep {
        document: ORDER_ADDRESS,
        alias: BILLING_ADDRESS,
        left_alias: ORDER,
        left_column: "billing_address_id",
    },
];

impl GridKind {
    pub const ALL: [GridKind; 4] = [
        GridKind::Order,
        GridKind::Invoice,
        GridKind::Shipment,
        GridKind::CreditMemo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            GridKind::Order => "sales_order_grid",
            GridKind::Invoice => "sales_invoice_grid",
            GridKind::Shipment => "sales_shipment_grid",
            GridKind::CreditMemo => "sales_creditmemo_grid",
        }
    }

    /// The document each grid row is computed from. Column expressions refer
    /// to it by this unprefixed name.
    pub fn base_document(&self) -> &'static str {
        match self {
            GridKind::Order => ORDER,
            GridKind::Invoice => "sales_invoice",
            GridKind::Shipment => "sales_shipment",
            GridKind::CreditMemo => "sales_creditmemo",
        }
    }

    fn joins(&self) -> Vec<JoinStep> {
        let mut steps = Vec::with_capacity(3);
        if *self != GridKind::Order {
            steps.push(JoinStep {
                document: ORDER,
                alias: ORDER,
                left_alias: self.base_document(),
                left_column: "order_id",
            });
        }
        steps.extend(ADDRESS_JOINS);
        steps
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GridKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| ProjectionError::UnknownDocumentType(s.to_string()))
    }
}

/// A projection ready to be upserted: the prefixed target document, its
/// column list and the query whose select list lines up with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub target: TableRef,
    pub columns: Vec<String>,
    pub query: Select,
}

pub struct ProjectionBuilder<'a> {
    destination: &'a Destination,
}

impl<'a> ProjectionBuilder<'a> {
    pub fn new(destination: &'a Destination) -> Self {
        ProjectionBuilder { destination }
    }

    /// Resolves `kind` and builds its projection.
    pub fn build_projection(
        &self,
        kind: &str,
        destination_document: &DocumentName,
        columns: &[ColumnMapping],
        pending: PendingIds,
    ) -> Result<Projection, ProjectionError> {
        let kind = kind.parse::<GridKind>()?;
        Ok(self.project(kind, destination_document, columns, pending))
    }

    /// Base document restricted to the pending ids, left joined with the
    /// kind's auxiliary documents. Left joins keep one row per base row even
    /// when an address is absent.
    pub fn project(
        &self,
        kind: GridKind,
        destination_document: &DocumentName,
        columns: &[ColumnMapping],
        pending: PendingIds,
    ) -> Projection {
        let base = kind.base_document();
        let select_list = columns
            .iter()
            .map(|c| Expr::Alias {
                expr: Box::new(literal(&c.expression)),
                alias: c.column.clone(),
            })
            .collect();

        let mut builder = SelectBuilder::new()
            .select(select_list)
            .from(self.table(base), Some(base));

        for step in kind.joins() {
            builder = builder.join(
                JoinKind::Left,
                self.table(step.document),
                Some(step.alias),
                eq(
                    qualified(step.left_alias, step.left_column),
                    qualified(step.alias, DEFAULT_KEY_COLUMN),
                ),
            );
        }

        let query = builder
            .where_in(qualified(base, DEFAULT_KEY_COLUMN), pending.into_query())
            .build();

        Projection {
            target: self.destination.table_ref(destination_document),
            columns: columns.iter().map(|c| c.column.clone()).collect(),
            query,
        }
    }

    fn table(&self, document: &str) -> TableRef {
        self.destination.table_ref(&DocumentName::from(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connectors::source::Source,
        selector::{IdentifierSelector, tests::RecordingAdapter},
    };
    use planner::query::{dialect, renderer::to_sql};
    use std::sync::Arc;

    async fn pending(source: &Source, document: &str) -> PendingIds {
        IdentifierSelector::new(source)
            .pending_ids(&document.into())
            .await
            .unwrap()
    }

    fn columns() -> Vec<ColumnMapping> {
        vec![
            ColumnMapping::new("entity_id", "sales_order.entity_id"),
            ColumnMapping::new("shipping_name", "sales_shipping_address.firstname"),
        ]
    }

    #[test]
    fn test_grid_kind_keys() {
        for kind in GridKind::ALL {
            assert_eq!(kind.key().parse::<GridKind>(), Ok(kind));
        }
        assert_eq!(
            "sales_quote_grid".parse::<GridKind>(),
            Err(ProjectionError::UnknownDocumentType("sales_quote_grid".into()))
        );
    }

    #[tokio::test]
    async fn test_order_grid_projection() {
        let adapter = Arc::new(RecordingAdapter::with_tables(&[(Some("m1"), "sales_flat_order_grid")]));
        let source = Source::new(adapter.clone(), "", Some("m1".into()));
        let destination = Destination::new(adapter, "m2_");

        let projection = ProjectionBuilder::new(&destination).project(
            GridKind::Order,
            &"sales_order_grid".into(),
            &columns(),
            pending(&source, "sales_flat_order_grid").await,
        );

        assert_eq!(projection.target.name, "m2_sales_order_grid");
        assert_eq!(projection.columns, vec!["entity_id", "shipping_name"]);

        let sql = to_sql(&projection.query, &dialect::Sqlite);
        let expected = concat!(
            r#"SELECT sales_order.entity_id AS "entity_id", sales_shipping_address.firstname AS "shipping_name" "#,
            r#"FROM "m2_sales_order" AS "sales_order" "#,
            r#"LEFT JOIN "m2_sales_order_address" AS "sales_shipping_address" "#,
            r#"ON ("sales_order"."shipping_address_id" = "sales_shipping_address"."entity_id") "#,
            r#"LEFT JOIN "m2_sales_order_address" AS "sales_billing_address" "#,
            r#"ON ("sales_order"."billing_address_id" = "sales_billing_address"."entity_id") "#,
            r#"WHERE ("sales_order"."entity_id" IN (SELECT "entity_id" FROM "m1"."sales_flat_order_grid"))"#
        );
        assert_eq!(sql, expected);
    }

    #[tokio::test]
    async fn test_invoice_grid_joins_order_before_addresses() {
        let adapter = Arc::new(RecordingAdapter::with_tables(&[(None, "sales_flat_invoice_grid")]));
        let source = Source::new(adapter.clone(), "", None);
        let destination = Destination::new(adapter, "");

        let projection = ProjectionBuilder::new(&destination)
            .build_projection(
                "sales_invoice_grid",
                &"sales_invoice_grid".into(),
                &[ColumnMapping::new("entity_id", "sales_invoice.entity_id")],
                pending(&source, "sales_flat_invoice_grid").await,
            )
            .unwrap();

        let sql = to_sql(&projection.query, &dialect::MySql);
        assert!(sql.starts_with(
            "SELECT sales_invoice.entity_id AS `entity_id` FROM `sales_invoice` AS `sales_invoice` \
             LEFT JOIN `sales_order` AS `sales_order` ON (`sales_invoice`.`order_id` = `sales_order`.`entity_id`) \
             LEFT JOIN `sales_order_address` AS `sales_shipping_address` \
             ON (`sales_order`.`shipping_address_id` = `sales_shipping_address`.`entity_id`)"
        ));
        assert!(sql.ends_with(
            "WHERE (`sales_invoice`.`entity_id` IN (SELECT `entity_id` FROM `sales_flat_invoice_grid`))"
        ));
    }

    #[tokio::test]
    async fn test_unknown_kind() {
        let adapter = Arc::new(RecordingAdapter::with_tables(&[(None, "grid")]));
        let source = Source::new(adapter.clone(), "", None);
        let destination = Destination::new(adapter, "");

        let err = ProjectionBuilder::new(&destination)
            .build_projection("sales_quote_grid", &"grid".into(), &columns(), pending(&source, "grid").await)
            .unwrap_err();
        assert_eq!(err, ProjectionError::UnknownDocumentType("sales_quote_grid".into()));
    }
}

//! Provides a fluent builder for constructing `Insert` ASTs.

use crate::query::ast::{
    common::TableRef,
    expr::Expr,
    insert::{ConflictAction, ConflictAssignment, Insert, OnConflict},
    select::Select,
};

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                ..Default::default()
            },
        }
    }

    pub fn columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.ast.columns = columns.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Uses `select` as the row source.
    pub fn select(mut self, select: Select) -> Self {
        self.ast.select = Some(select);
        self
    }

    /// On a conflict over `key`, overwrites every non-key column with the
    /// incoming value. When every column is part of the key the existing row
    /// is kept as is. Must be called after `columns`.
    pub fn on_conflict_update<S: AsRef<str>>(mut self, key: &[S]) -> Self {
        let key: Vec<String> = key.iter().map(|s| s.as_ref().to_string()).collect();
        let assignments: Vec<ConflictAssignment> = self
            .ast
            .columns
            .iter()
            .filter(|c| !key.contains(*c))
            .map(|c| ConflictAssignment {
                column: c.clone(),
                value: Expr::Excluded(c.clone()),
            })
            .collect();

        let action = if assignments.is_empty() {
            ConflictAction::DoNothing
        } else {
            ConflictAction::DoUpdate { assignments }
        };
        self.ast.on_conflict = Some(OnConflict {
            columns: key,
            action,
        });
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{common::TableRef, expr::Expr, insert::ConflictAction},
        builder::{insert::InsertBuilder, select::SelectBuilder},
        ident,
    };

    fn table(name: &str) -> TableRef {
        TableRef::new(name)
    }

    #[test]
    fn test_on_conflict_update_skips_key_columns() {
        let select = SelectBuilder::new()
            .select(vec![ident("entity_id"), ident("status"), ident("grand_total")])
            .from(table("sales_order"), None)
            .build();

        let ast = InsertBuilder::new(table("sales_order_grid"))
            .columns(&["entity_id", "status", "grand_total"])
            .select(select)
            .on_conflict_update(&["entity_id"])
            .build();

        let on_conflict = ast.on_conflict.unwrap();
        assert_eq!(on_conflict.columns, vec!["entity_id"]);
        match on_conflict.action {
            ConflictAction::DoUpdate { assignments } => {
                let columns: Vec<_> = assignments.iter().map(|a| a.column.as_str()).collect();
                assert_eq!(columns, vec!["status", "grand_total"]);
                assert_eq!(assignments[0].value, Expr::Excluded("status".to_string()));
            }
            ConflictAction::DoNothing => panic!("expected an update action"),
        }
    }

    #[test]
    fn test_key_only_insert_keeps_existing_row() {
        let ast = InsertBuilder::new(table("ids"))
            .columns(&["entity_id"])
            .on_conflict_update(&["entity_id"])
            .build();

        let on_conflict = ast.on_conflict.unwrap();
        assert_eq!(on_conflict.action, ConflictAction::DoNothing);
        assert!(on_conflict.is_noop());
    }
}

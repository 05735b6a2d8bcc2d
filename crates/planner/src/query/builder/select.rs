//! Provides a type-safe, fluent builder for constructing `Select` ASTs.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct SQL order at compile time.

use crate::query::ast::{
    common::{JoinKind, TableRef},
    expr::Expr,
    select::{FromClause, JoinClause, Select},
};

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    _state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            _state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of columns.
    /// This is the entry point for building a select query.
    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            _state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl SelectBuilder<SelectState> {
    /// Adds a `FROM` clause specifying the primary table.
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(String::from),
        });
        SelectBuilder {
            ast: self.ast,
            _state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, we can add optional clauses like `JOIN` and `WHERE`.
impl SelectBuilder<FromState> {
    /// Adds a `JOIN` clause to the query.
    pub fn join(mut self, kind: JoinKind, table: TableRef, alias: Option<&str>, on: Expr) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            table,
            alias: alias.map(String::from),
            on,
        });
        self
    }

    /// Adds a `WHERE` clause to the query.
    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(condition);
        self
    }

    /// Restricts `expr` to the rows produced by `subquery`.
    pub fn where_in(self, expr: Expr, subquery: Select) -> Self {
        self.where_clause(Expr::InSubquery {
            expr: Box::new(expr),
            subquery: Box::new(subquery),
        })
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{
            common::{JoinKind, TableRef},
            expr::Expr,
        },
        builder::select::SelectBuilder,
        eq, ident, qualified,
    };

    fn table(name: &str) -> TableRef {
        TableRef::new(name)
    }

    #[test]
    fn test_build_simple_select() {
        let ast = SelectBuilder::new()
            .select(vec![ident("entity_id")])
            .from(table("sales_flat_order_grid"), None)
            .build();

        assert_eq!(ast.columns, vec![ident("entity_id")]);
        assert_eq!(ast.from.unwrap().table.name, "sales_flat_order_grid");
        assert!(ast.where_clause.is_none());
    }

    #[test]
    fn test_build_with_joins_in_order() {
        let ast = SelectBuilder::new()
            .select(vec![qualified("o", "entity_id")])
            .from(table("sales_order"), Some("o"))
            .join(
                JoinKind::Left,
                table("sales_order_address"),
                Some("ship"),
                eq(qualified("o", "shipping_address_id"), qualified("ship", "entity_id")),
            )
            .join(
                JoinKind::Left,
                table("sales_order_address"),
                Some("bill"),
                eq(qualified("o", "billing_address_id"), qualified("bill", "entity_id")),
            )
            .build();

        assert_eq!(ast.from.unwrap().alias, Some("o".to_string()));
        assert_eq!(ast.joins.len(), 2);
        assert_eq!(ast.joins[0].alias.as_deref(), Some("ship"));
        assert_eq!(ast.joins[1].alias.as_deref(), Some("bill"));
        assert!(ast.joins.iter().all(|j| j.kind == JoinKind::Left));
    }

    #[test]
    fn test_where_in_wraps_subquery() {
        let ids = SelectBuilder::new()
            .select(vec![ident("entity_id")])
            .from(table("ids"), None)
            .build();

        let ast = SelectBuilder::new()
            .select(vec![ident("entity_id")])
            .from(table("sales_order"), None)
            .where_in(ident("entity_id"), ids.clone())
            .build();

        match ast.where_clause {
            Some(Expr::InSubquery { subquery, .. }) => assert_eq!(*subquery, ids),
            other => panic!("unexpected where clause: {other:?}"),
        }
    }
}

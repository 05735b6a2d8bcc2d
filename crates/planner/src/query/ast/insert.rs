//! Defines the AST for an INSERT ... SELECT statement.

use crate::query::ast::{common::TableRef, expr::Expr, select::Select};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    pub columns: Vec<String>,
    /// SELECT query used as the data source. Its column list must line up
    /// with `columns`.
    pub select: Option<Select>,
    /// Optional conflict handling, rendered per dialect.
    pub on_conflict: Option<OnConflict>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    /// Conflict target (primary or unique key columns).
    pub columns: Vec<String>,
    pub action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    DoNothing,
    DoUpdate {
        assignments: Vec<ConflictAssignment>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictAssignment {
    pub column: String,
    pub value: Expr,
}

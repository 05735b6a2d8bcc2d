use crate::query::ast::common::TableRef;

/// Removes every row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncate {
    pub table: TableRef,
}

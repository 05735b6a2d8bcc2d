//! Defines the AST for SQL expressions.

use crate::query::ast::select::Select;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// Raw SQL, rendered as-is. Used for configured column expressions.
    Literal(String),

    /// A binary operation, e.g., `a.id = b.a_id`.
    BinaryOp(Box<BinaryOp>),

    /// `expr IN (SELECT ...)`, evaluated by the server.
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Select>,
    },

    /// An aliased expression, e.g. `CONCAT(a, b) AS full_name`
    Alias { expr: Box<Expr>, alias: String },

    /// The value proposed for insertion into `column`, valid inside the
    /// update assignments of an upsert.
    Excluded(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'users' in 'users.id'
    pub name: String,              // e.g., the 'id' in 'users.id'
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
}

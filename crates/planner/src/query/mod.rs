use crate::query::ast::expr::{BinaryOp, BinaryOperator, Expr, Ident};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident {
        qualifier: None,
        name: name.to_string(),
    })
}

pub fn qualified(qualifier: &str, name: &str) -> Expr {
    Expr::Identifier(Ident {
        qualifier: Some(qualifier.to_string()),
        name: name.to_string(),
    })
}

/// Raw SQL emitted verbatim by the renderer.
pub fn literal(sql: &str) -> Expr {
    Expr::Literal(sql.to_string())
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp(Box::new(BinaryOp {
        left,
        op: BinaryOperator::Eq,
        right,
    }))
}

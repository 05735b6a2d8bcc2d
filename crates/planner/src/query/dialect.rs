//! Defines the `Dialect` trait for database-specific SQL syntax.

/// How a dialect expresses "insert, or update the existing row on key conflict".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStyle {
    /// `INSERT ... ON DUPLICATE KEY UPDATE col = VALUES(col)` (MySQL).
    OnDuplicateKey,
    /// `INSERT ... ON CONFLICT (key) DO UPDATE SET col = excluded.col` (SQLite, PostgreSQL).
    OnConflict,
}

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - SQLite uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    fn upsert_style(&self) -> UpsertStyle;

    /// Renders a reference to the value proposed for insertion into `column`,
    /// for use on the right-hand side of an upsert assignment.
    fn excluded_column(&self, column: &str) -> String;

    /// Statement prefix that empties a table, followed by the table name.
    fn truncate_keyword(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn upsert_style(&self) -> UpsertStyle {
        UpsertStyle::OnDuplicateKey
    }

    fn excluded_column(&self, column: &str) -> String {
        format!("VALUES({})", self.quote_identifier(column))
    }

    fn truncate_keyword(&self) -> &'static str {
        "TRUNCATE TABLE"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn upsert_style(&self) -> UpsertStyle {
        UpsertStyle::OnConflict
    }

    fn excluded_column(&self, column: &str) -> String {
        format!("excluded.{}", self.quote_identifier(column))
    }

    // SQLite has no TRUNCATE; an unqualified DELETE uses the truncate optimization.
    fn truncate_keyword(&self) -> &'static str {
        "DELETE FROM"
    }
}

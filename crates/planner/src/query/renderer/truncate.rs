use crate::query::{
    ast::truncate::Truncate,
    renderer::{Render, Renderer},
};

impl Render for Truncate {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(r.dialect.truncate_keyword());
        r.sql.push(' ');
        r.render_table_ref(&self.table);
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{common::TableRef, truncate::Truncate},
        dialect::{MySql, Sqlite},
        renderer::to_sql,
    };

    #[test]
    fn test_render_truncate() {
        let ast = Truncate {
            table: TableRef::new("sales_order_grid"),
        };

        let mysql = to_sql(&ast, &MySql);
        assert_eq!(mysql, "TRUNCATE TABLE `sales_order_grid`");

        let sqlite = to_sql(&ast, &Sqlite);
        assert_eq!(sqlite, r#"DELETE FROM "sales_order_grid""#);
    }
}

use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Literal(sql) => r.sql.push_str(sql),
            Expr::BinaryOp(op) => op.render(r),
            Expr::InSubquery { expr, subquery } => {
                r.sql.push('(');
                expr.render(r);
                r.sql.push_str(" IN (");
                subquery.render(r);
                r.sql.push_str("))");
            }
            Expr::Alias { expr, alias } => {
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(&r.dialect.quote_identifier(alias));
            }
            Expr::Excluded(column) => {
                let excluded = r.dialect.excluded_column(column);
                r.sql.push_str(&excluded);
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.sql.push('(');
        self.left.render(r);

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
        };
        r.sql.push_str(op_str);

        self.right.render(r);
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::expr::Expr,
        dialect::{MySql, Sqlite},
        eq, literal, qualified,
        renderer::to_sql,
    };

    #[test]
    fn test_render_join_condition() {
        let expr = eq(
            qualified("sales_order", "shipping_address_id"),
            qualified("sales_shipping_address", "entity_id"),
        );

        let sql = to_sql(&expr, &MySql);
        assert_eq!(
            sql,
            "(`sales_order`.`shipping_address_id` = `sales_shipping_address`.`entity_id`)"
        );
    }

    #[test]
    fn test_literal_is_not_quoted() {
        let expr = Expr::Alias {
            expr: Box::new(literal("IFNULL(sales_order.status, 'new')")),
            alias: "status".to_string(),
        };

        let sql = to_sql(&expr, &Sqlite);
        assert_eq!(sql, r#"IFNULL(sales_order.status, 'new') AS "status""#);
    }

}

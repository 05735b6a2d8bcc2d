use crate::query::{
    ast::insert::{ConflictAction, Insert, OnConflict},
    dialect::UpsertStyle,
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        let style = r.dialect.upsert_style();

        // MySQL has no "do nothing" branch for ON DUPLICATE KEY.
        let ignore = style == UpsertStyle::OnDuplicateKey
            && self.on_conflict.as_ref().is_some_and(OnConflict::is_noop);

        // 1. INSERT INTO table (...)
        r.sql
            .push_str(if ignore { "INSERT IGNORE INTO " } else { "INSERT INTO " });
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(", "));
        r.sql.push(')');

        // 2. SELECT ...
        if let Some(select) = &self.select {
            r.sql.push(' ');
            select.render(r);
        }

        // 3. Conflict handling
        if let Some(on_conflict) = &self.on_conflict {
            match style {
                UpsertStyle::OnDuplicateKey if !ignore => render_on_duplicate_key(on_conflict, r),
                UpsertStyle::OnDuplicateKey => {}
                UpsertStyle::OnConflict => render_on_conflict(on_conflict, r),
            }
        }
    }
}

impl OnConflict {
    /// True when a conflict leaves the existing row untouched.
    pub fn is_noop(&self) -> bool {
        match &self.action {
            ConflictAction::DoNothing => true,
            ConflictAction::DoUpdate { assignments } => assignments.is_empty(),
        }
    }
}

fn render_on_duplicate_key(on_conflict: &OnConflict, r: &mut Renderer) {
    let ConflictAction::DoUpdate { assignments } = &on_conflict.action else {
        return;
    };

    r.sql.push_str(" ON DUPLICATE KEY UPDATE ");
    for (i, assignment) in assignments.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(", ");
        }
        r.sql
            .push_str(&r.dialect.quote_identifier(&assignment.column));
        r.sql.push_str(" = ");
        assignment.value.render(r);
    }
}

fn render_on_conflict(on_conflict: &OnConflict, r: &mut Renderer) {
    r.sql.push_str(" ON CONFLICT");
    if !on_conflict.columns.is_empty() {
        r.sql.push_str(" (");
        let quoted: Vec<String> = on_conflict
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted.join(", "));
        r.sql.push(')');
    }

    match &on_conflict.action {
        ConflictAction::DoUpdate { assignments } if !assignments.is_empty() => {
            r.sql.push_str(" DO UPDATE SET ");
            for (i, assignment) in assignments.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.sql
                    .push_str(&r.dialect.quote_identifier(&assignment.column));
                r.sql.push_str(" = ");
                assignment.value.render(r);
            }
        }
        _ => r.sql.push_str(" DO NOTHING"),
    }
}

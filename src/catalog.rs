//! Catalog row shape and the constraint discovery query

use crate::constraint::ConstraintKind;

/// One row of the constraint discovery query: the constraint name, its
/// `pg_constraint.contype` tag and PostgreSQL's canonical definition text.
///
/// Rows are fetched fresh for every schema dump; nothing is cached here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConstraint {
    pub name: String,
    pub contype: char,
    pub definition: String,
}

impl CatalogConstraint {
    pub fn new(name: impl Into<String>, contype: char, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contype,
            definition: definition.into(),
        }
    }

    /// The registry kind for this row, when its tag is supported.
    pub fn kind(&self) -> Option<ConstraintKind> {
        ConstraintKind::from_type_tag(self.contype)
    }
}

/// Build the `pg_constraint` query for every supported constraint on
/// `table`, ready for the host adapter to execute.
///
/// The filter covers exactly the registry's type tags, so every row it
/// returns has a reverse compiler.
pub fn constraints_query(table: &str) -> String {
    let tags = ConstraintKind::ALL
        .iter()
        .map(|kind| format!("'{}'", kind.type_tag()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT conname, contype, pg_get_constraintdef(pg_constraint.oid) AS definition \
         FROM pg_constraint \
         JOIN pg_class ON pg_constraint.conrelid = pg_class.oid \
         WHERE pg_constraint.contype IN ({}) AND pg_class.relname = '{}'",
        tags, table
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_filters_to_supported_tags_and_table() {
        let sql = constraints_query("phases");
        assert!(sql.contains("contype IN ('c', 'x')"));
        assert!(sql.contains("relname = 'phases'"));
        assert!(sql.contains("pg_get_constraintdef"));
    }

    #[test]
    fn row_kind_follows_the_type_tag() {
        let row = CatalogConstraint::new("t", 'x', "EXCLUDE (a WITH =)");
        assert_eq!(row.kind(), Some(ConstraintKind::Exclude));

        let foreign_key = CatalogConstraint::new("t", 'f', "FOREIGN KEY (a) REFERENCES b(id)");
        assert_eq!(foreign_key.kind(), None);
    }
}

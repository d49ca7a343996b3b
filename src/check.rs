//! CHECK constraint forward and reverse compilers

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::CatalogConstraint;
use crate::conditions::{normalize, Conditions};
use crate::constraint::{Constraint, ConstraintBody, ConstraintKind};
use crate::error::ConstraintError;
use crate::name;

/// Render the `CONSTRAINT <name> CHECK (...)` fragment for `table`.
///
/// `constraint_name` of `None` synthesizes a name from the table and the
/// process clock.
pub fn to_sql(table: &str, constraint_name: Option<&str>, conditions: &Conditions) -> String {
    let resolved = name::resolve(table, constraint_name);
    format!("CONSTRAINT {} CHECK ({})", resolved, normalize(conditions))
}

/// Registry entry point: compile a declared CHECK constraint.
pub(crate) fn compile(constraint: &Constraint) -> Result<String, ConstraintError> {
    match &constraint.body {
        ConstraintBody::Check(conditions) => {
            Ok(to_sql(&constraint.table, constraint.name.as_deref(), conditions))
        }
        other => Err(ConstraintError::KindMismatch {
            expected: ConstraintKind::Check,
            actual: other.kind(),
        }),
    }
}

// PostgreSQL's canonical rendering always balances the outer parens, so the
// anchored pattern is safe on catalog input.
static DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CHECK\s*\((.*)\)\s*$").expect("failed to compile CHECK pattern"));

/// Reverse-compile a catalog CHECK row into its schema-dump line.
///
/// # Errors
///
/// Returns `ConstraintError::MalformedDefinition` when the definition does
/// not match `CHECK (<predicate>)`.
pub fn to_dump_line(row: &CatalogConstraint) -> Result<String, ConstraintError> {
    let captures = DEFINITION.captures(row.definition.trim()).ok_or_else(|| {
        ConstraintError::MalformedDefinition {
            definition: row.definition.clone(),
            detail: "expected `CHECK (<predicate>)`".to_string(),
        }
    })?;

    Ok(format!(
        "    check_constraint :{}, {}",
        row.name,
        quoted(&captures[1])
    ))
}

fn quoted(predicate: &str) -> String {
    format!("\"{}\"", predicate.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constraint_uses_the_given_name() {
        let sql = to_sql("prices", Some("test_constraint"), &Conditions::from("price > 1000"));
        assert_eq!(sql, "CONSTRAINT test_constraint CHECK (price > 1000)");
    }

    #[test]
    fn dump_line_strips_the_check_wrapper() {
        let row = CatalogConstraint::new("test_constraint", 'c', "CHECK ((price > 1000))");
        assert_eq!(
            to_dump_line(&row).unwrap(),
            "    check_constraint :test_constraint, \"(price > 1000)\""
        );
    }

    #[test]
    fn dump_line_escapes_embedded_quotes() {
        let row = CatalogConstraint::new("state_check", 'c', r#"CHECK ((state = "open"))"#);
        assert_eq!(
            to_dump_line(&row).unwrap(),
            r#"    check_constraint :state_check, "(state = \"open\")""#
        );
    }

    #[test]
    fn definition_without_parens_is_malformed() {
        let row = CatalogConstraint::new("broken", 'c', "CHECK price > 1000");
        assert!(matches!(
            to_dump_line(&row),
            Err(ConstraintError::MalformedDefinition { .. })
        ));
    }
}

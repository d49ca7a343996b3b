//! DDL entry points for the host migration adapter
//!
//! The host framework owns connections and execution; these functions only
//! build the statements it runs.

use log::debug;

use crate::constraint::Constraint;
use crate::error::ConstraintError;

/// `ALTER TABLE <table> ADD CONSTRAINT ...` for a declared constraint.
pub fn add_constraint_sql(constraint: &Constraint) -> Result<String, ConstraintError> {
    let fragment = constraint.to_sql()?;
    let sql = format!("ALTER TABLE {} ADD {}", constraint.table, fragment);
    debug!("add {} constraint: {}", constraint.kind(), sql);
    Ok(sql)
}

/// `ALTER TABLE <table> DROP CONSTRAINT <name>`. Removal is name-only and
/// kind-independent.
pub fn drop_constraint_sql(table: &str, name: &str) -> String {
    let sql = format!("ALTER TABLE {} DROP CONSTRAINT {}", table, name);
    debug!("drop constraint: {}", sql);
    sql
}

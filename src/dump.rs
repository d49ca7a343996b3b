//! Schema-dump rendering for discovered constraints

use std::fmt::Write;

use log::debug;

use crate::catalog::CatalogConstraint;
use crate::error::ConstraintError;
use crate::registry;

/// Render one catalog row as its declarative dump line.
pub fn dump_line(row: &CatalogConstraint) -> Result<String, ConstraintError> {
    (registry::compiler_for_type_tag(row.contype)?.reverse)(row)
}

/// Render a batch of catalog rows, sorted lexically for deterministic
/// schema-file diffs.
pub fn constraint_lines(rows: &[CatalogConstraint]) -> Result<Vec<String>, ConstraintError> {
    let mut lines = rows.iter().map(dump_line).collect::<Result<Vec<_>, _>>()?;
    lines.sort();
    Ok(lines)
}

/// Write the sorted dump lines for `rows` to `out`, one per line.
pub fn write_constraints<W: Write>(
    out: &mut W,
    rows: &[CatalogConstraint],
) -> Result<(), ConstraintError> {
    let lines = constraint_lines(rows)?;
    debug!("dumping {} constraint line(s)", lines.len());
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Drop index names shadowed by a constraint in the same batch.
///
/// An EXCLUDE constraint is backed by an index with the same name; dumping
/// both would re-create the index on schema load.
pub fn reject_shadowed_indexes<S: AsRef<str>>(
    index_names: &[S],
    rows: &[CatalogConstraint],
) -> Vec<String> {
    index_names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| rows.iter().all(|row| row.name != *name))
        .map(str::to_string)
        .collect()
}

//! Kind registry: one static compiler record per constraint kind

use crate::catalog::CatalogConstraint;
use crate::constraint::{Constraint, ConstraintKind};
use crate::error::ConstraintError;
use crate::{check, exclude};

/// Forward/reverse compiler pair for one constraint kind.
pub struct ConstraintCompiler {
    pub kind: ConstraintKind,
    /// Declarative form -> `CONSTRAINT ...` DDL fragment.
    pub forward: fn(&Constraint) -> Result<String, ConstraintError>,
    /// Catalog row -> schema-dump line.
    pub reverse: fn(&CatalogConstraint) -> Result<String, ConstraintError>,
}

/// The closed compiler table. Adding a constraint kind means adding a
/// [`ConstraintKind`] variant and one row here.
pub static COMPILERS: [ConstraintCompiler; 2] = [
    ConstraintCompiler {
        kind: ConstraintKind::Check,
        forward: check::compile,
        reverse: check::to_dump_line,
    },
    ConstraintCompiler {
        kind: ConstraintKind::Exclude,
        forward: exclude::compile,
        reverse: exclude::to_dump_line,
    },
];

/// Look up the compiler pair for a kind.
pub fn compiler_for(kind: ConstraintKind) -> &'static ConstraintCompiler {
    match kind {
        ConstraintKind::Check => &COMPILERS[0],
        ConstraintKind::Exclude => &COMPILERS[1],
    }
}

/// Look up the compiler pair by `pg_constraint.contype` tag, as retrieved
/// from the catalog.
pub fn compiler_for_type_tag(tag: char) -> Result<&'static ConstraintCompiler, ConstraintError> {
    ConstraintKind::from_type_tag(tag)
        .map(compiler_for)
        .ok_or(ConstraintError::UnknownTypeTag(tag))
}

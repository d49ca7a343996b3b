//! Constraint compiler error types

use crate::constraint::ConstraintKind;
use thiserror::Error;

/// Errors raised by the constraint compilers and the migration bookkeeping
/// built on them.
///
/// All of these surface synchronously at the call site and are never
/// retried: they indicate either a migration authoring mistake or catalog
/// output this compiler does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// A constraint removal did not carry the full specification (table,
    /// name, conditions), so the migration cannot be reversed.
    #[error(
        "To make this migration reversible, pass the constraint to \
         remove_{kind}_constraint, i.e. `remove_{kind}_constraint :{table}, :{name}, {example}`",
        example = .kind.example_conditions()
    )]
    IrreversibleMigration {
        kind: ConstraintKind,
        table: String,
        name: String,
    },

    /// Reverse compilation met a SQL operator that is not in the fixed
    /// operator table.
    #[error("unrecognized exclude operator `{0}` in constraint definition")]
    UnrecognizedOperator(String),

    /// A catalog definition did not match the expected shape for its kind.
    #[error("malformed constraint definition `{definition}`: {detail}")]
    MalformedDefinition { definition: String, detail: String },

    /// A catalog row carried a `contype` tag outside the registry.
    #[error("unknown constraint type tag `{0}`")]
    UnknownTypeTag(char),

    /// A registry compiler was invoked with a constraint of another kind.
    #[error("expected a {expected} constraint, got {actual}")]
    KindMismatch {
        expected: ConstraintKind,
        actual: ConstraintKind,
    },

    /// A CREATE TABLE statement had no column list to splice constraints
    /// into.
    #[error("statement has no column list to splice constraints into: `{0}`")]
    UnspliceableStatement(String),

    /// Writing dump output to the sink failed.
    #[error("failed to write schema dump: {0}")]
    DumpWrite(#[from] std::fmt::Error),
}

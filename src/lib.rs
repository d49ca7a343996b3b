//! # pg-constraints
//!
//! PostgreSQL CHECK and EXCLUDE constraint support for schema migrations
//! and schema dumps: declarative constraint forms compile to DDL fragments,
//! and catalog constraint definitions parse back into canonical dump lines.
//!
//! The two directions are symmetric per kind and share name resolution and
//! condition normalization; the host migration framework wires the
//! [`adapter`], [`dump`] and [`recorder`] entry points into its own runner.
//!
//! ```rust
//! use pg_constraints::{Constraint, Exclusion, Operator};
//!
//! let constraint = Constraint::exclude(
//!     "phases",
//!     Some("test_constraint"),
//!     Exclusion::new()
//!         .using("gist")
//!         .element(r#"tsrange("from","to")"#, Operator::Overlaps)
//!         .element("project_id", Operator::Equals),
//! );
//!
//! assert_eq!(
//!     constraint.to_sql().unwrap(),
//!     r#"CONSTRAINT test_constraint EXCLUDE USING gist (tsrange("from","to") WITH &&, project_id WITH =)"#
//! );
//! ```

pub mod adapter;
pub mod catalog;
pub mod check;
pub mod conditions;
pub mod constraint;
pub mod dump;
pub mod error;
pub mod exclude;
pub mod name;
pub mod recorder;
pub mod registry;
pub mod table;

pub use catalog::{constraints_query, CatalogConstraint};
pub use conditions::{normalize, Conditions};
pub use constraint::{Constraint, ConstraintBody, ConstraintKind};
pub use error::ConstraintError;
pub use exclude::{Deferrable, Exclusion, Operator};
pub use recorder::{CommandRecorder, MigrationCommand};
pub use registry::{compiler_for, compiler_for_type_tag, ConstraintCompiler};
pub use table::{splice_into_create_table, TableConstraints};

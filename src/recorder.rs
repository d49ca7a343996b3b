//! Migration command recording and reversal

use crate::adapter;
use crate::constraint::{Constraint, ConstraintBody, ConstraintKind};
use crate::error::ConstraintError;

/// A recorded constraint operation inside a reversible migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationCommand {
    /// `add_*_constraint` with the full declarative form.
    AddConstraint(Constraint),
    /// `remove_*_constraint`. `body` carries the original specification when
    /// the author supplied it, which is what makes the command invertible.
    RemoveConstraint {
        kind: ConstraintKind,
        table: String,
        name: String,
        body: Option<ConstraintBody>,
    },
}

impl MigrationCommand {
    /// The DDL statement this command executes.
    pub fn to_sql(&self) -> Result<String, ConstraintError> {
        match self {
            MigrationCommand::AddConstraint(constraint) => adapter::add_constraint_sql(constraint),
            MigrationCommand::RemoveConstraint { table, name, .. } => {
                Ok(adapter::drop_constraint_sql(table, name))
            }
        }
    }

    /// The inverse command: add and remove are symmetric as long as both
    /// sides carry the full constraint specification.
    ///
    /// # Errors
    ///
    /// `ConstraintError::IrreversibleMigration` when the remove side has no
    /// conditions to rebuild the constraint from, or when an anonymous add
    /// leaves no stable name to remove.
    pub fn invert(&self) -> Result<MigrationCommand, ConstraintError> {
        match self {
            MigrationCommand::AddConstraint(constraint) => match &constraint.name {
                Some(name) => Ok(MigrationCommand::RemoveConstraint {
                    kind: constraint.kind(),
                    table: constraint.table.clone(),
                    name: name.clone(),
                    body: Some(constraint.body.clone()),
                }),
                None => Err(ConstraintError::IrreversibleMigration {
                    kind: constraint.kind(),
                    table: constraint.table.clone(),
                    name: "constraint_name".to_string(),
                }),
            },
            MigrationCommand::RemoveConstraint {
                kind,
                table,
                name,
                body,
            } => match body {
                Some(body) => Ok(MigrationCommand::AddConstraint(Constraint {
                    table: table.clone(),
                    name: Some(name.clone()),
                    body: body.clone(),
                })),
                None => Err(ConstraintError::IrreversibleMigration {
                    kind: *kind,
                    table: table.clone(),
                    name: name.clone(),
                }),
            },
        }
    }
}

/// Records constraint commands on behalf of a reversible migration and
/// yields the inverse sequence for rollback.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<MigrationCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a constraint addition.
    pub fn record_add(&mut self, constraint: Constraint) {
        self.commands.push(MigrationCommand::AddConstraint(constraint));
    }

    /// Record a constraint removal. The full specification is required up
    /// front so the migration stays reversible.
    ///
    /// # Errors
    ///
    /// `ConstraintError::IrreversibleMigration` when `body` is absent;
    /// `ConstraintError::KindMismatch` when `body` is of another kind than
    /// `kind`.
    pub fn record_remove(
        &mut self,
        kind: ConstraintKind,
        table: impl Into<String>,
        name: impl Into<String>,
        body: Option<ConstraintBody>,
    ) -> Result<(), ConstraintError> {
        let table = table.into();
        let name = name.into();

        match &body {
            None => Err(ConstraintError::IrreversibleMigration { kind, table, name }),
            Some(body_ref) if body_ref.kind() != kind => Err(ConstraintError::KindMismatch {
                expected: kind,
                actual: body_ref.kind(),
            }),
            Some(_) => {
                self.commands.push(MigrationCommand::RemoveConstraint {
                    kind,
                    table,
                    name,
                    body,
                });
                Ok(())
            }
        }
    }

    pub fn commands(&self) -> &[MigrationCommand] {
        &self.commands
    }

    /// The inverse command sequence, newest first.
    pub fn invert_all(&self) -> Result<Vec<MigrationCommand>, ConstraintError> {
        self.commands.iter().rev().map(MigrationCommand::invert).collect()
    }
}

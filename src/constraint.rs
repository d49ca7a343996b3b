//! Declarative constraint forms and the closed kind enum

use std::fmt;

use crate::conditions::Conditions;
use crate::error::ConstraintError;
use crate::exclude::Exclusion;
use crate::registry;

/// The constraint kinds this crate compiles.
///
/// The set is closed: adding a kind means adding a variant here plus a row
/// in [`crate::registry::COMPILERS`]. Nothing is generated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Check,
    Exclude,
}

impl ConstraintKind {
    /// All supported kinds, in catalog tag order.
    pub const ALL: [ConstraintKind; 2] = [ConstraintKind::Check, ConstraintKind::Exclude];

    /// The `pg_constraint.contype` tag for this kind.
    pub fn type_tag(self) -> char {
        match self {
            ConstraintKind::Check => 'c',
            ConstraintKind::Exclude => 'x',
        }
    }

    /// Look up a kind by its `pg_constraint.contype` tag.
    pub fn from_type_tag(tag: char) -> Option<Self> {
        ConstraintKind::ALL.iter().copied().find(|kind| kind.type_tag() == tag)
    }

    /// The symbolic name used in migration method names and dump lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::Check => "check",
            ConstraintKind::Exclude => "exclude",
        }
    }

    /// Worked example conditions for this kind, embedded in the
    /// irreversible-migration guidance.
    pub fn example_conditions(self) -> &'static str {
        match self {
            ConstraintKind::Check => "'price > 999'",
            ConstraintKind::Exclude => {
                r#"using: :gist, 'tsrange("from", "to")' => :overlaps, project_id: :equals"#
            }
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of a declared constraint, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintBody {
    Check(Conditions),
    Exclude(Exclusion),
}

impl ConstraintBody {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            ConstraintBody::Check(_) => ConstraintKind::Check,
            ConstraintBody::Exclude(_) => ConstraintKind::Exclude,
        }
    }
}

/// A declarative table constraint, the input to the forward compilers.
///
/// `name` of `None` synthesizes a `<table>_<nanos>` identifier when the
/// constraint is compiled (see [`crate::name`]), which supports both the
/// named and the anonymous migration call shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub table: String,
    pub name: Option<String>,
    pub body: ConstraintBody,
}

impl Constraint {
    /// A CHECK constraint on `table`.
    pub fn check(
        table: impl Into<String>,
        name: Option<&str>,
        conditions: impl Into<Conditions>,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.map(str::to_string),
            body: ConstraintBody::Check(conditions.into()),
        }
    }

    /// An EXCLUDE constraint on `table`.
    pub fn exclude(table: impl Into<String>, name: Option<&str>, exclusion: Exclusion) -> Self {
        Self {
            table: table.into(),
            name: name.map(str::to_string),
            body: ConstraintBody::Exclude(exclusion),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.body.kind()
    }

    /// Compile to the `CONSTRAINT <name> ...` DDL fragment via the registry.
    pub fn to_sql(&self) -> Result<String, ConstraintError> {
        (registry::compiler_for(self.kind()).forward)(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_round_trip() {
        for kind in ConstraintKind::ALL {
            assert_eq!(ConstraintKind::from_type_tag(kind.type_tag()), Some(kind));
        }
        assert_eq!(ConstraintKind::from_type_tag('f'), None);
    }

    #[test]
    fn kind_is_derived_from_the_body() {
        let check = Constraint::check("prices", None, "price > 0");
        assert_eq!(check.kind(), ConstraintKind::Check);

        let exclude = Constraint::exclude("phases", None, Exclusion::new());
        assert_eq!(exclude.kind(), ConstraintKind::Exclude);
    }

    #[test]
    fn kind_displays_as_its_symbolic_name() {
        assert_eq!(ConstraintKind::Check.to_string(), "check");
        assert_eq!(ConstraintKind::Exclude.to_string(), "exclude");
    }
}

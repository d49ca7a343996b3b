//! Inline constraint collection for tables under creation

use crate::conditions::Conditions;
use crate::error::ConstraintError;
use crate::exclude::Exclusion;
use crate::{check, exclude};

/// Collects compiled constraint fragments while a `CREATE TABLE` statement
/// is being assembled, in declaration order.
///
/// Fragments are compiled eagerly so synthesized names are fixed at
/// declaration time.
#[derive(Debug, Default)]
pub struct TableConstraints {
    table: String,
    fragments: Vec<String>,
}

impl TableConstraints {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fragments: Vec::new(),
        }
    }

    /// Declare a CHECK constraint on the table under creation.
    pub fn check(&mut self, name: Option<&str>, conditions: impl Into<Conditions>) -> &mut Self {
        let fragment = check::to_sql(&self.table, name, &conditions.into());
        self.fragments.push(fragment);
        self
    }

    /// Declare an EXCLUDE constraint on the table under creation.
    pub fn exclude(&mut self, name: Option<&str>, exclusion: &Exclusion) -> &mut Self {
        self.fragments.push(exclude::to_sql(&self.table, name, exclusion));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}

/// Splice constraint fragments into a rendered `CREATE TABLE ... ( ... )`
/// statement, immediately before the closing paren of the column list.
///
/// The insertion point is found by tracking paren nesting depth; column
/// defaults and expressions may carry parens of their own, so the first
/// `)` is not necessarily the right one.
pub fn splice_into_create_table(sql: &str, fragments: &[String]) -> Result<String, ConstraintError> {
    if fragments.is_empty() {
        return Ok(sql.to_string());
    }

    let mut depth: usize = 0;
    for (index, ch) in sql.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Err(ConstraintError::UnspliceableStatement(sql.to_string()));
                }
                if depth == 1 {
                    let mut spliced = String::with_capacity(sql.len() + 64);
                    spliced.push_str(&sql[..index]);
                    spliced.push_str(", ");
                    spliced.push_str(&fragments.join(", "));
                    spliced.push_str(&sql[index..]);
                    return Ok(spliced);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    Err(ConstraintError::UnspliceableStatement(sql.to_string()))
}

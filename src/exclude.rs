//! EXCLUDE constraint forward and reverse compilers

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::CatalogConstraint;
use crate::constraint::{Constraint, ConstraintBody, ConstraintKind};
use crate::error::ConstraintError;
use crate::name;

/// Exclusion operators supported per element.
///
/// The symbol table is fixed: extending it means a new variant plus arms in
/// [`Operator::sql`] and [`Operator::keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    Overlaps,
}

impl Operator {
    pub const ALL: [Operator; 2] = [Operator::Equals, Operator::Overlaps];

    /// The SQL operator rendered after `WITH`.
    pub fn sql(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::Overlaps => "&&",
        }
    }

    /// The symbolic keyword used in dump lines.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Overlaps => "overlaps",
        }
    }

    /// Reverse lookup from the SQL operator text.
    pub fn from_sql(sql: &str) -> Option<Self> {
        Operator::ALL.iter().copied().find(|operator| operator.sql() == sql)
    }
}

/// Deferral timing for an EXCLUDE constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferrable {
    /// `DEFERRABLE`, with the timing left to the database default.
    Deferrable,
    /// `DEFERRABLE INITIALLY IMMEDIATE`
    Immediate,
    /// `DEFERRABLE INITIALLY DEFERRED`
    Deferred,
}

impl Deferrable {
    fn sql_suffix(self) -> &'static str {
        match self {
            Deferrable::Deferrable => " DEFERRABLE",
            Deferrable::Immediate => " DEFERRABLE INITIALLY IMMEDIATE",
            Deferrable::Deferred => " DEFERRABLE INITIALLY DEFERRED",
        }
    }

    fn dump_value(self) -> &'static str {
        match self {
            Deferrable::Deferrable => "true",
            Deferrable::Immediate => ":immediate",
            Deferrable::Deferred => ":deferred",
        }
    }
}

/// The declarative form of an EXCLUDE constraint body.
///
/// Elements keep their declaration order; `using`, `where_clause` and
/// `deferrable` are the optional clauses of the rendered DDL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exclusion {
    pub elements: Vec<(String, Operator)>,
    pub using: Option<String>,
    pub where_clause: Option<String>,
    pub deferrable: Option<Deferrable>,
}

impl Exclusion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `<expression> WITH <operator>` element.
    pub fn element(mut self, expression: impl Into<String>, operator: Operator) -> Self {
        self.elements.push((expression.into(), operator));
        self
    }

    /// Set the index method (`USING gist`).
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.using = Some(method.into());
        self
    }

    /// Restrict the constraint with a `WHERE (<predicate>)` clause.
    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }

    /// Mark the constraint deferrable.
    pub fn deferrable(mut self, deferrable: Deferrable) -> Self {
        self.deferrable = Some(deferrable);
        self
    }
}

/// Render the `CONSTRAINT <name> EXCLUDE ...` fragment for `table`.
pub fn to_sql(table: &str, constraint_name: Option<&str>, exclusion: &Exclusion) -> String {
    let resolved = name::resolve(table, constraint_name);

    let using = exclusion
        .using
        .as_deref()
        .map(|method| format!(" USING {}", method))
        .unwrap_or_default();

    let elements = exclusion
        .elements
        .iter()
        .map(|(expression, operator)| format!("{} WITH {}", expression, operator.sql()))
        .collect::<Vec<_>>()
        .join(", ");

    let where_clause = exclusion
        .where_clause
        .as_deref()
        .map(|predicate| format!(" WHERE ({})", predicate))
        .unwrap_or_default();

    let deferrable = exclusion
        .deferrable
        .map(Deferrable::sql_suffix)
        .unwrap_or_default();

    format!(
        "CONSTRAINT {} EXCLUDE{} ({}){}{}",
        resolved, using, elements, where_clause, deferrable
    )
}

/// Registry entry point: compile a declared EXCLUDE constraint.
pub(crate) fn compile(constraint: &Constraint) -> Result<String, ConstraintError> {
    match &constraint.body {
        ConstraintBody::Exclude(exclusion) => {
            Ok(to_sql(&constraint.table, constraint.name.as_deref(), exclusion))
        }
        other => Err(ConstraintError::KindMismatch {
            expected: ConstraintKind::Exclude,
            actual: other.kind(),
        }),
    }
}

static DEFERRABLE_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(NOT )?DEFERRABLE(?: INITIALLY (DEFERRED|IMMEDIATE))?\s*$")
        .expect("failed to compile DEFERRABLE pattern")
});

static WHERE_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*WHERE \((.*)\)\s*$").expect("failed to compile WHERE pattern")
});

static ELEMENT_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^EXCLUDE(?:\s+USING\s+(\w+))?\s*\((.*)\)\s*$")
        .expect("failed to compile EXCLUDE pattern")
});

/// Parse a catalog `EXCLUDE ...` definition back into its declarative form.
///
/// USING, WHERE and DEFERRABLE are detected independently by pattern, not
/// by position. The element list is split at depth-0 commas only, since an
/// element expression may contain parenthesized calls of its own.
///
/// # Errors
///
/// `ConstraintError::MalformedDefinition` when the definition does not
/// match the expected shape or its parens are unbalanced;
/// `ConstraintError::UnrecognizedOperator` when an element's operator is
/// outside the fixed symbol table.
pub fn parse_definition(definition: &str) -> Result<Exclusion, ConstraintError> {
    let mut remainder = definition.trim();

    let mut deferrable = None;
    if let Some(captures) = DEFERRABLE_TAIL.captures(remainder) {
        if captures.get(1).is_none() {
            deferrable = Some(match captures.get(2).map(|m| m.as_str()) {
                Some("DEFERRED") => Deferrable::Deferred,
                Some(_) => Deferrable::Immediate,
                None => Deferrable::Deferrable,
            });
        }
        let start = captures.get(0).map_or(remainder.len(), |m| m.start());
        remainder = &remainder[..start];
    }

    let mut where_clause = None;
    if let Some(captures) = WHERE_TAIL.captures(remainder) {
        if let Some(predicate) = captures.get(1) {
            where_clause = Some(strip_outer_parens(predicate.as_str()).to_string());
        }
        let start = captures.get(0).map_or(remainder.len(), |m| m.start());
        remainder = &remainder[..start];
    }

    let captures = ELEMENT_LIST.captures(remainder).ok_or_else(|| {
        malformed(definition, "expected `EXCLUDE [USING <method>] (<elements>)`")
    })?;
    let using = captures.get(1).map(|m| m.as_str().to_string());
    let inner = captures.get(2).map_or("", |m| m.as_str());

    let mut elements = Vec::new();
    for raw in split_depth_zero(inner).map_err(|detail| malformed(definition, detail))? {
        let element = raw.trim();
        let (expression, operator_sql) = element
            .rsplit_once(" WITH ")
            .ok_or_else(|| malformed(definition, "element missing ` WITH <operator>`"))?;
        let operator = Operator::from_sql(operator_sql.trim())
            .ok_or_else(|| ConstraintError::UnrecognizedOperator(operator_sql.trim().to_string()))?;
        elements.push((expression.trim().to_string(), operator));
    }

    trace!(
        "parsed exclude definition: {} element(s), using={:?}, where={:?}, deferrable={:?}",
        elements.len(),
        using,
        where_clause,
        deferrable
    );

    Ok(Exclusion {
        elements,
        using,
        where_clause,
        deferrable,
    })
}

/// Reverse-compile a catalog EXCLUDE row into its schema-dump line.
pub fn to_dump_line(row: &CatalogConstraint) -> Result<String, ConstraintError> {
    let parsed = parse_definition(&row.definition)?;

    let mut parts: Vec<String> = Vec::new();
    if let Some(method) = &parsed.using {
        parts.push(format!("using: :{}", method));
    }
    for (expression, operator) in &parsed.elements {
        parts.push(render_element(expression, *operator));
    }
    if let Some(predicate) = &parsed.where_clause {
        parts.push(format!("where: '({})'", predicate));
    }
    if let Some(deferrable) = parsed.deferrable {
        parts.push(format!("deferrable: {}", deferrable.dump_value()));
    }

    Ok(format!("    exclude_constraint :{}, {}", row.name, parts.join(", ")))
}

/// Dump rendering of one element: expressions containing calls become
/// quoted-string keys, bare column names become symbol keys. These are
/// exactly the input shapes the forward compiler accepts.
fn render_element(expression: &str, operator: Operator) -> String {
    if expression.contains('(') {
        format!("'{}' => :{}", expression, operator.keyword())
    } else {
        format!("{}: :{}", expression, operator.keyword())
    }
}

/// Split `input` at commas that sit outside any parenthesized group.
fn split_depth_zero(input: &str) -> Result<Vec<&str>, &'static str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Err("unbalanced parentheses in element list");
                }
                depth -= 1;
            }
            ',' if depth == 0 => {
                parts.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced parentheses in element list");
    }
    parts.push(&input[start..]);
    Ok(parts)
}

/// Strip one pair of parens when they wrap the whole expression.
fn strip_outer_parens(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with('(') || !trimmed.ends_with(')') {
        return trimmed;
    }
    let mut depth: usize = 0;
    for (index, ch) in trimmed.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return trimmed;
                }
                depth -= 1;
                if depth == 0 && index < trimmed.len() - 1 {
                    return trimmed;
                }
            }
            _ => {}
        }
    }
    if depth == 0 {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

fn malformed(definition: &str, detail: &str) -> ConstraintError {
    ConstraintError::MalformedDefinition {
        definition: definition.to_string(),
        detail: detail.to_string(),
    }
}

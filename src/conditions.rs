//! Condition payloads for CHECK constraints and their normalization

/// Conditions accepted by the CHECK compiler.
///
/// Mirrors the three call shapes migrations use: a raw predicate, an
/// ordered list of conditions AND-ed together, or a column membership map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditions {
    /// A raw SQL predicate, passed through verbatim.
    Predicate(String),
    /// An ordered list of conditions, implicitly AND-ed.
    All(Vec<Conditions>),
    /// Column -> allowed values, each entry rendered as `col IN (...)`.
    /// A scalar is a one-element set. Entry order is preserved.
    Membership(Vec<(String, Vec<String>)>),
}

impl Conditions {
    pub fn predicate(text: impl Into<String>) -> Self {
        Conditions::Predicate(text.into())
    }

    pub fn all(items: impl IntoIterator<Item = Conditions>) -> Self {
        Conditions::All(items.into_iter().collect())
    }

    pub fn membership<C, V>(entries: impl IntoIterator<Item = (C, Vec<V>)>) -> Self
    where
        C: Into<String>,
        V: Into<String>,
    {
        Conditions::Membership(
            entries
                .into_iter()
                .map(|(column, values)| {
                    (column.into(), values.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }

    /// Shorthand for a single-column membership condition.
    pub fn column_in<V: Into<String>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Conditions::Membership(vec![(
            column.into(),
            values.into_iter().map(Into::into).collect(),
        )])
    }
}

impl From<&str> for Conditions {
    fn from(text: &str) -> Self {
        Conditions::Predicate(text.to_string())
    }
}

impl From<String> for Conditions {
    fn from(text: String) -> Self {
        Conditions::Predicate(text)
    }
}

impl From<Vec<Conditions>> for Conditions {
    fn from(items: Vec<Conditions>) -> Self {
        Conditions::All(items)
    }
}

/// Render a condition payload as SQL boolean-expression text.
///
/// A singleton list collapses to its sole element unwrapped; longer lists
/// render as `(p1) AND (p2) AND ...`. Membership entries render as
/// `column IN ('v1', 'v2', ...)`, each parenthesized. Values are
/// interpolated literally; quoting is the caller's responsibility.
pub fn normalize(conditions: &Conditions) -> String {
    match conditions {
        Conditions::Predicate(text) => text.clone(),
        Conditions::All(items) => {
            if items.len() == 1 {
                return normalize(&items[0]);
            }
            let parts: Vec<String> = items.iter().map(normalize).collect();
            format!("({})", parts.join(") AND ("))
        }
        Conditions::Membership(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .map(|(column, values)| format!("{} IN ('{}')", column, values.join("', '")))
                .collect();
            format!("({})", parts.join(") AND ("))
        }
    }
}

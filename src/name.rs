//! Constraint name resolution

use chrono::{Timelike, Utc};

/// Resolve the SQL identifier for a constraint: the explicit name when
/// given, otherwise a synthesized `<table>_<subsecond-nanos>` identifier
/// read from the process clock.
///
/// Two anonymous constraints on the same table inside one clock tick can
/// collide; the database rejects the duplicate name when the second one is
/// added.
pub fn resolve(table: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => name.to_string(),
        None => synthesize(table),
    }
}

fn synthesize(table: &str) -> String {
    format!("{}_{}", table, Utc::now().nanosecond())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn explicit_names_are_used_as_given() {
        assert_eq!(resolve("prices", Some("test_constraint")), "test_constraint");
    }

    #[test]
    fn synthesized_names_are_table_prefixed_digits() {
        let name = resolve("prices", None);
        let suffix = name.strip_prefix("prices_").expect("table prefix");
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn synthesized_names_differ_across_clock_ticks() {
        let first = resolve("prices", None);
        thread::sleep(Duration::from_millis(5));
        let second = resolve("prices", None);
        assert_ne!(first, second);
    }
}

//! Schema dump generation from catalog rows

use pg_constraints::{
    constraints_query, dump, splice_into_create_table, CatalogConstraint, Exclusion, Operator,
    TableConstraints,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn phase_rows() -> Vec<CatalogConstraint> {
    vec![
        CatalogConstraint::new(
            "test_constraint",
            'x',
            r#"EXCLUDE USING gist (tsrange("from","to") WITH &&, project_id WITH =)"#,
        ),
        CatalogConstraint::new("price_check", 'c', "CHECK ((price > 1000))"),
    ]
}

#[test]
fn dump_lines_are_deterministically_sorted() {
    init_logging();
    let lines = dump::constraint_lines(&phase_rows()).unwrap();
    assert_eq!(
        lines,
        [
            "    check_constraint :price_check, \"(price > 1000)\"".to_string(),
            r#"    exclude_constraint :test_constraint, using: :gist, 'tsrange("from","to")' => :overlaps, project_id: :equals"#.to_string(),
        ]
    );
}

#[test]
fn writer_produces_newline_terminated_lines() {
    init_logging();
    let mut out = String::new();
    dump::write_constraints(&mut out, &phase_rows()).unwrap();
    assert_eq!(
        out,
        "    check_constraint :price_check, \"(price > 1000)\"\n    \
         exclude_constraint :test_constraint, using: :gist, \
         'tsrange(\"from\",\"to\")' => :overlaps, project_id: :equals\n"
    );
}

#[test]
fn backing_indexes_are_filtered_out_of_the_dump() {
    let indexes = ["test_constraint", "index_phases_on_project_id"];
    let kept = dump::reject_shadowed_indexes(&indexes, &phase_rows());
    assert_eq!(kept, ["index_phases_on_project_id".to_string()]);
}

#[test]
fn discovery_query_covers_both_kinds() {
    let sql = constraints_query("phases");
    assert!(sql.starts_with("SELECT conname, contype, pg_get_constraintdef"));
    assert!(sql.contains("IN ('c', 'x')"));
    assert!(sql.ends_with("pg_class.relname = 'phases'"));
}

#[test]
fn collected_constraints_splice_into_create_table() {
    let mut constraints = TableConstraints::new("phases");
    constraints
        .check(Some("price_check"), "price > 0")
        .exclude(
            Some("no_overlap"),
            &Exclusion::new().using("gist").element("project_id", Operator::Equals),
        );

    let spliced = splice_into_create_table(
        "CREATE TABLE phases (id serial, project_id integer)",
        constraints.fragments(),
    )
    .unwrap();

    assert_eq!(
        spliced,
        "CREATE TABLE phases (id serial, project_id integer, \
         CONSTRAINT price_check CHECK (price > 0), \
         CONSTRAINT no_overlap EXCLUDE USING gist (project_id WITH =))"
    );
}

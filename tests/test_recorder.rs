//! Reversibility bookkeeping for recorded constraint commands

use pg_constraints::{
    CommandRecorder, Conditions, Constraint, ConstraintBody, ConstraintError, ConstraintKind,
    Exclusion, MigrationCommand, Operator,
};

#[test]
fn removing_without_the_full_specification_is_irreversible() {
    let mut recorder = CommandRecorder::new();
    let error = recorder
        .record_remove(ConstraintKind::Exclude, "phases", "test_constraint", None)
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "To make this migration reversible, pass the constraint to \
         remove_exclude_constraint, i.e. `remove_exclude_constraint :phases, :test_constraint, \
         using: :gist, 'tsrange(\"from\", \"to\")' => :overlaps, project_id: :equals`"
    );
}

#[test]
fn check_guidance_uses_the_check_example() {
    let error = ConstraintError::IrreversibleMigration {
        kind: ConstraintKind::Check,
        table: "prices".to_string(),
        name: "test_constraint".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "To make this migration reversible, pass the constraint to \
         remove_check_constraint, i.e. `remove_check_constraint :prices, :test_constraint, \
         'price > 999'`"
    );
}

#[test]
fn a_recorded_migration_inverts_in_reverse_order() {
    let exclusion = Exclusion::new()
        .using("gist")
        .element("project_id", Operator::Equals);

    let mut recorder = CommandRecorder::new();
    recorder.record_add(Constraint::exclude("phases", Some("no_overlap"), exclusion.clone()));
    recorder
        .record_remove(
            ConstraintKind::Check,
            "prices",
            "price_check",
            Some(ConstraintBody::Check(Conditions::from("price > 0"))),
        )
        .unwrap();

    let inverted = recorder.invert_all().unwrap();
    assert_eq!(
        inverted,
        [
            MigrationCommand::AddConstraint(Constraint::check(
                "prices",
                Some("price_check"),
                Conditions::from("price > 0"),
            )),
            MigrationCommand::RemoveConstraint {
                kind: ConstraintKind::Exclude,
                table: "phases".to_string(),
                name: "no_overlap".to_string(),
                body: Some(ConstraintBody::Exclude(exclusion)),
            },
        ]
    );
}

#[test]
fn commands_compile_to_their_ddl_statements() {
    let add = MigrationCommand::AddConstraint(Constraint::check(
        "prices",
        Some("price_check"),
        "price > 0",
    ));
    assert_eq!(
        add.to_sql().unwrap(),
        "ALTER TABLE prices ADD CONSTRAINT price_check CHECK (price > 0)"
    );

    let remove = add.invert().unwrap();
    assert_eq!(
        remove.to_sql().unwrap(),
        "ALTER TABLE prices DROP CONSTRAINT price_check"
    );
}

#[test]
fn inverting_an_anonymous_add_is_refused() {
    let add = MigrationCommand::AddConstraint(Constraint::check("prices", None, "price > 0"));
    assert!(matches!(
        add.invert(),
        Err(ConstraintError::IrreversibleMigration { .. })
    ));
}

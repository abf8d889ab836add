#![cfg(test)]

use crate::constraints;
use crate::ConstraintOperationError;
use crate::IntRelation;
use crate::Space;
use crate::SpaceStatus;

#[test]
fn copies_are_independent() {
    let mut space = Space::new();
    let x = space.new_int_var(0, 10).expect("valid bounds");
    let y = space.new_int_var(0, 10).expect("valid bounds");
    space
        .add_constraint(constraints::less_than_or_equals(x, y))
        .post()
        .expect("x <= y is feasible");

    let mut copy = space.clone();
    copy.add_constraint(constraints::int_rel(y, IntRelation::LessOrEqual, 3))
        .post()
        .expect("y <= 3 is feasible");

    assert_eq!(copy.upper_bound(&x), 3);
    assert_eq!(space.upper_bound(&x), 10);
    assert_eq!(space.upper_bound(&y), 10);
}

#[test]
fn failed_space_rejects_constraints() {
    let mut space = Space::new();
    let x = space.new_int_var(0, 3).expect("valid bounds");

    let result = space
        .add_constraint(constraints::int_rel(x, IntRelation::Greater, 5))
        .post();
    assert_eq!(result, Err(ConstraintOperationError::InfeasiblePropagator));
    assert!(space.is_failed());

    let result = space
        .add_constraint(constraints::int_rel(x, IntRelation::Less, 2))
        .post();
    assert_eq!(result, Err(ConstraintOperationError::InfeasibleState));
    assert_eq!(space.status(), SpaceStatus::Failed);
}

#[test]
fn entailed_propagators_are_disposed() {
    let mut space = Space::new();
    let x = space.new_int_var(0, 3).expect("valid bounds");
    let y = space.new_int_var(5, 9).expect("valid bounds");

    space
        .add_constraint(constraints::less_than_or_equals(x, y))
        .post()
        .expect("x <= y holds");

    assert_eq!(space.num_propagators(), 0);
}

#[test]
fn advisors_see_changes_made_by_other_propagators() {
    let mut space = Space::new();
    let variables = (0..4)
        .map(|_| space.new_int_var(0, 2).expect("valid bounds"))
        .collect::<Vec<_>>();

    space
        .add_constraint(constraints::count(
            variables.clone(),
            1,
            IntRelation::Equal,
            2,
        ))
        .post()
        .expect("two ones fit in four variables");

    for &variable in &variables[..2] {
        space
            .add_constraint(constraints::int_rel(variable, IntRelation::Equal, 1))
            .post()
            .expect("the count still allows this");
    }

    let solution = space.solution();
    for variable in &variables[2..] {
        assert!(!solution.get_integer_domain(*variable).contains(1));
    }
}

#[test]
fn clause_propagates_the_last_literal() {
    let mut space = Space::new();
    let literals = (0..4).map(|_| space.new_bool_var()).collect::<Vec<_>>();

    space
        .add_constraint(constraints::clause(literals.clone()))
        .post()
        .expect("an unassigned clause is feasible");

    for &literal in &literals[..3] {
        space
            .add_constraint(constraints::bool_rel(literal, IntRelation::Equal, 0))
            .post()
            .expect("one literal remains");
    }

    assert!(space.solution().get_literal_value(literals[3]));
}

#[test]
fn discarding_reclaims_the_propagators() {
    let mut space = Space::new();
    let variables = (0..3)
        .map(|_| space.new_int_var(0, 5).expect("valid bounds"))
        .collect::<Vec<_>>();

    space
        .add_constraint(constraints::all_different(variables))
        .post()
        .expect("three values out of six");

    assert_eq!(space.num_propagators(), 1);
    assert!(space.memory() > 0);
    assert!(space.discard() > 0);
}

#[test]
fn clones_have_the_same_status_and_domains() {
    let mut space = Space::new();
    let x = space.new_int_var_from_values([-4, -3, -1, 1, 3, 4, 5]).expect("valid domain");
    let y = space.new_int_var(-3, 3).expect("valid bounds");
    space
        .add_constraint(constraints::equals(x, y))
        .post()
        .expect("x and y share values");

    let mut copy = space.clone();

    assert_eq!(copy.status(), space.status());
    for variable in [x, y] {
        assert_eq!(
            copy.solution().get_integer_domain(variable),
            space.solution().get_integer_domain(variable)
        );
    }
    assert_eq!(
        space.solution().get_integer_domain(y).to_string(),
        "{-3, -1, 1, 3}"
    );
}

#![cfg(test)]

use crate::branching::val_zero_one;
use crate::branching::InDomainMin;
use crate::branching::InputOrder;
use crate::branching::SetBrancher;
use crate::branching::SetValueSelection;
use crate::branching::ViewValBrancher;
use crate::constraints;
use crate::search::solve_all;
use crate::search::SearchOptions;
use crate::IntRelation;
use crate::RangeList;
use crate::Space;

#[test]
fn implication_is_reified_over_every_assignment() {
    let mut space = Space::new();
    let a = space.new_bool_var();
    let b = space.new_bool_var();
    let y = space.new_bool_var();

    space
        .add_constraint(constraints::bool_imp(a, b, y))
        .post()
        .expect("the reified implication is feasible");
    let _ = space.add_brancher(val_zero_one([a, b]));

    let solutions = solve_all(space, SearchOptions::default()).solutions;
    assert_eq!(solutions.len(), 4);

    for solution in solutions {
        let a = solution.get_literal_value(a);
        let b = solution.get_literal_value(b);
        assert_eq!(solution.get_literal_value(y), !a || b);
    }
}

#[test]
fn binary_boolean_relations() {
    let mut space = Space::new();
    let a = space.new_bool_var();
    let b = space.new_bool_var();
    let c = space.new_bool_var();

    space
        .add_constraint(constraints::bool_not_eq(a, b))
        .post()
        .expect("a != b is feasible");
    space
        .add_constraint(constraints::bool_lq(a, c))
        .post()
        .expect("a -> c is feasible");
    let _ = space.add_brancher(val_zero_one([a, b, c]));

    let mut assignments = solve_all(space, SearchOptions::default())
        .solutions
        .iter()
        .map(|solution| {
            (
                solution.get_literal_value(a),
                solution.get_literal_value(b),
                solution.get_literal_value(c),
            )
        })
        .collect::<Vec<_>>();
    assignments.sort();

    assert_eq!(
        assignments,
        vec![(false, true, false), (false, true, true), (true, false, true)]
    );
}

#[test]
fn negated_literals_share_the_domain() {
    let mut space = Space::new();
    let a = space.new_bool_var();

    assert!(a.is_positive());
    assert!(!(!a).is_positive());
    assert_eq!((!a).domain(), a.domain());
}

#[test]
fn not_member_removes_the_values() {
    let mut space = Space::new();
    let x = space.new_int_var(0, 6).expect("valid bounds");

    space
        .add_constraint(constraints::not_member(x, [0, 2, 3, 6]))
        .post()
        .expect("some values remain");

    let solution = space.solution();
    assert_eq!(solution.get_integer_domain(x).to_string(), "{1, 4..5}");
}

#[test]
fn members_of_a_set_with_fixed_cardinality() {
    let mut space = Space::new();
    let set = space
        .new_named_set_var(RangeList::empty(), RangeList::interval(1, 4), 0, 4, "s")
        .expect("valid set bounds");
    let cardinality = space.new_int_var(2, 2).expect("valid bounds");
    let x = space.new_int_var(0, 5).expect("valid bounds");

    space
        .add_constraint(constraints::set_cardinality(set, cardinality))
        .post()
        .expect("a set of two elements fits");
    space
        .add_constraint(constraints::set_member(x, set))
        .post()
        .expect("x can be in the set");
    space
        .add_constraint(constraints::int_rel(x, IntRelation::GreaterOrEqual, 3))
        .post()
        .expect("x >= 3 is feasible");

    assert_eq!(space.lower_bound(&x), 3);
    assert_eq!(space.upper_bound(&x), 4);

    let _ = space.add_brancher(SetBrancher::new([set], SetValueSelection::IncludeMin));
    let _ = space.add_brancher(ViewValBrancher::new([x], InputOrder, InDomainMin));

    let solutions = solve_all(space, SearchOptions::default()).solutions;
    assert_eq!(solutions.len(), 6);

    for solution in solutions {
        let value = solution.get_set_value(set);
        assert_eq!(value.size(), 2);
        assert!(value.contains(solution.get_integer_value(&x)));

        let fixed = solution.integer_values().collect::<Vec<_>>();
        assert!(fixed.contains(&(x, solution.get_integer_value(&x))));
        assert_eq!(solution.num_domains(), 2);
    }
}

#[test]
fn relations_under_swapping_and_negation() {
    let relations = [
        IntRelation::Equal,
        IntRelation::NotEqual,
        IntRelation::LessOrEqual,
        IntRelation::Less,
        IntRelation::GreaterOrEqual,
        IntRelation::Greater,
    ];

    for relation in relations {
        for left in -2..=2 {
            for right in -2..=2 {
                assert_eq!(
                    relation.holds(left, right),
                    relation.swap().holds(right, left)
                );
                assert_eq!(
                    relation.holds(left, right),
                    !relation.negate().holds(left, right)
                );
            }
        }
    }
}

#![cfg(test)]

use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::branching::InDomainMin;
use crate::branching::InputOrder;
use crate::branching::ViewValBrancher;
use crate::constraints;
use crate::engine::test_helper::TestSpace;
use crate::propagators::all_different::AllDifferent;
use crate::search::Dfs;
use crate::search::SearchOptions;
use crate::Space;

#[test]
fn sparse_domains_cascade() {
    let mut space = TestSpace::default();

    let x1 = space.new_sparse_variable(vec![1]);
    let x2 = space.new_sparse_variable(vec![1, 3]);
    let x3 = space.new_sparse_variable(vec![3, 4, 7]);
    let x4 = space.new_sparse_variable(vec![2, 7]);

    let propagator = space
        .new_propagator(AllDifferent::new([x1, x2, x3, x4].into()))
        .expect("Expected no error");
    let _ = space
        .propagate_until_fixed_point(propagator)
        .expect("Expected no error");

    space.assert_domain(x2, vec![3]);
    space.assert_domain(x3, vec![4, 7]);
    space.assert_domain(x4, vec![2, 7]);
}

fn is_all_different(values: &[i32]) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, value)| !values[i + 1..].contains(value))
}

/// Count the assignments of the domains which satisfy `predicate`.
fn brute_force(domains: &[Vec<i32>], predicate: impl Fn(&[i32]) -> bool) -> usize {
    let mut count = 0;
    let mut assignment = vec![0; domains.len()];

    fn enumerate(
        domains: &[Vec<i32>],
        assignment: &mut [i32],
        index: usize,
        count: &mut usize,
        predicate: &dyn Fn(&[i32]) -> bool,
    ) {
        if index == domains.len() {
            if predicate(assignment) {
                *count += 1;
            }
            return;
        }

        for &value in &domains[index] {
            assignment[index] = value;
            enumerate(domains, assignment, index + 1, count, predicate);
        }
    }

    enumerate(domains, &mut assignment, 0, &mut count, &predicate);
    count
}

#[test]
fn search_agrees_with_brute_force() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..25 {
        let num_variables = rng.gen_range(2..=5);
        let domains = (0..num_variables)
            .map(|_| {
                let mut values = (0..rng.gen_range(1..=4))
                    .map(|_| rng.gen_range(0..6))
                    .collect::<Vec<_>>();
                values.sort_unstable();
                values.dedup();
                values
            })
            .collect::<Vec<_>>();

        let mut space = Space::new();
        let variables = domains
            .iter()
            .map(|domain| {
                space
                    .new_int_var_from_values(domain.iter().copied())
                    .expect("non-empty domain")
            })
            .collect::<Vec<_>>();

        let expected = brute_force(&domains, is_all_different);

        let posted = space
            .add_constraint(constraints::all_different(variables.clone()))
            .post();
        if posted.is_err() {
            assert_eq!(expected, 0, "the propagator failed on {domains:?}");
            continue;
        }

        let _ = space.add_brancher(ViewValBrancher::new(variables, InputOrder, InDomainMin));
        let actual = Dfs::new(space, SearchOptions::default()).count();

        assert_eq!(actual, expected, "wrong number of solutions for {domains:?}");
    }
}

#![cfg(test)]

use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::branching::InDomainSplitMin;
use crate::branching::InputOrder;
use crate::branching::ViewValBrancher;
use crate::constraints;
use crate::search::Dfs;
use crate::search::SearchOptions;
use crate::IntRelation;
use crate::Space;

fn holds(weights: &[i32], values: &[i32], relation: IntRelation, rhs: i32) -> bool {
    let sum = weights
        .iter()
        .zip(values)
        .map(|(weight, value)| weight * value)
        .sum::<i32>();

    relation.holds(sum, rhs)
}

#[test]
fn weighted_sums_agree_with_brute_force() {
    let mut rng = SmallRng::seed_from_u64(7);
    let relations = [
        IntRelation::Equal,
        IntRelation::LessOrEqual,
        IntRelation::Less,
        IntRelation::GreaterOrEqual,
        IntRelation::Greater,
    ];

    for _ in 0..30 {
        let bounds = (0..3)
            .map(|_| {
                let lower_bound = rng.gen_range(-3..=2);
                (lower_bound, lower_bound + rng.gen_range(0..=3))
            })
            .collect::<Vec<_>>();
        let weights = (0..3).map(|_| rng.gen_range(-3..=3)).collect::<Vec<_>>();
        let relation = relations[rng.gen_range(0..relations.len())];
        let rhs = rng.gen_range(-6..=6);

        let mut expected = 0;
        for a in bounds[0].0..=bounds[0].1 {
            for b in bounds[1].0..=bounds[1].1 {
                for c in bounds[2].0..=bounds[2].1 {
                    if holds(&weights, &[a, b, c], relation, rhs) {
                        expected += 1;
                    }
                }
            }
        }

        let mut space = Space::new();
        let variables = bounds
            .iter()
            .map(|&(lower_bound, upper_bound)| {
                space
                    .new_int_var(lower_bound, upper_bound)
                    .expect("valid bounds")
            })
            .collect::<Vec<_>>();

        let posted = space
            .add_constraint(constraints::linear(
                weights.clone(),
                variables.clone(),
                relation,
                rhs as i64,
            ))
            .post();
        if posted.is_err() {
            assert_eq!(expected, 0, "{weights:?} {relation} {rhs} failed at the root");
            continue;
        }

        let _ = space.add_brancher(ViewValBrancher::new(
            variables,
            InputOrder,
            InDomainSplitMin,
        ));
        let actual = Dfs::new(space, SearchOptions::default()).count();

        assert_eq!(
            actual, expected,
            "wrong number of solutions for {weights:?} {relation} {rhs} over {bounds:?}"
        );
    }
}

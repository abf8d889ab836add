use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::branching::BranchRelation;
use crate::branching::ValueSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`ValueSelector`] which first tries a value drawn uniformly from the domain. The generator is
/// seeded, so a search with the same seed explores the same tree.
#[derive(Debug, Clone)]
pub struct InDomainRandom {
    rng: SmallRng,
}

impl InDomainRandom {
    pub fn new(seed: u64) -> Self {
        InDomainRandom {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainRandom {
    fn select_value(&mut self, context: &PropagationContext, decision_variable: &Var) -> i32 {
        let size = context.size(decision_variable);
        let index = self.rng.gen_range(0..size);

        context
            .iterate_domain(decision_variable)
            .nth(index as usize)
            .unwrap_or_else(|| context.lower_bound(decision_variable))
    }

    fn relation(&self) -> BranchRelation {
        BranchRelation::Equal
    }
}

#[cfg(test)]
mod tests {
    use crate::branching::InDomainRandom;
    use crate::branching::ValueSelector;
    use crate::engine::cp::propagation::PropagationContext;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn random_values_are_in_the_domain() {
        let mut space = TestSpace::default();
        let x = space.new_sparse_variable(vec![-4, 0, 3, 17]);
        let context = PropagationContext::new(space.assignments());

        let mut selector = InDomainRandom::new(7);
        for _ in 0..50 {
            let value = selector.select_value(&context, &x);
            assert!([-4, 0, 3, 17].contains(&value));
        }
    }

    #[test]
    fn equal_seeds_select_equal_values() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 1000);
        let context = PropagationContext::new(space.assignments());

        let mut first = InDomainRandom::new(42);
        let mut second = InDomainRandom::new(42);
        for _ in 0..10 {
            assert_eq!(
                first.select_value(&context, &x),
                second.select_value(&context, &x)
            );
        }
    }
}

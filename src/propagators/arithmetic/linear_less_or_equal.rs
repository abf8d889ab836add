use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// Propagator for the constraint `\sum x_i <= rhs`.
///
/// The propagator reasons about the upper bounds of the terms based on the lower bound of the
/// left-hand side:
///
/// `ub(x_i) <= rhs - (lb_lhs - lb(x_i))`
///
/// Only increases of lower bounds can enable this reasoning, so those are the only events the
/// propagator subscribes to. Coefficients are expressed through affine views.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqual<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var> LinearLessOrEqual<Var> {
    pub(crate) fn new(terms: Box<[Var]>, rhs: i32) -> Self {
        LinearLessOrEqual { terms, rhs }
    }
}

impl<Var: IntegerVariable> Propagator for LinearLessOrEqual<Var> {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::for_arity(self.terms.len())
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        for (index, term) in self.terms.iter().enumerate() {
            let _ = context.register(
                term.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(index as u32),
            );
        }

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let lb_lhs = self
            .terms
            .iter()
            .map(|term| context.lower_bound(term) as i64)
            .sum::<i64>();

        if lb_lhs > self.rhs as i64 {
            return Err(Inconsistency::Conflict);
        }

        let ub_lhs = self
            .terms
            .iter()
            .map(|term| context.upper_bound(term) as i64)
            .sum::<i64>();

        if ub_lhs <= self.rhs as i64 {
            return Ok(PropagatorStatus::Subsumed);
        }

        for term in self.terms.iter() {
            let bound = self.rhs as i64 - (lb_lhs - context.lower_bound(term) as i64);

            if (context.upper_bound(term) as i64) > bound {
                let _ = context.set_upper_bound(term, bound as i32)?;
            }
        }

        Ok(PropagatorStatus::Fix)
    }

    fn dispose(&mut self) -> usize {
        std::mem::size_of_val(self) + std::mem::size_of_val(&*self.terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;
    use crate::variables::TransformableVariable;

    #[test]
    fn bounds_are_propagated() {
        let mut space = TestSpace::default();
        let x = space.new_variable(1, 5);
        let y = space.new_variable(0, 10);

        let _ = space
            .new_propagator(LinearLessOrEqual::new([x, y].into(), 7))
            .expect("no empty domains");

        space.assert_bounds(x, 1, 5);
        space.assert_bounds(y, 0, 6);
    }

    #[test]
    fn negative_coefficients_raise_lower_bounds() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);
        let y = space.new_variable(2, 4);

        // -x + y <= -5, i.e. x >= y + 5
        let _ = space
            .new_propagator(LinearLessOrEqual::new([x.scaled(-1), y.scaled(1)].into(), -5))
            .expect("no empty domains");

        space.assert_bounds(x, 7, 10);
        space.assert_bounds(y, 2, 4);
    }

    #[test]
    fn overloaded_sum_is_a_conflict() {
        let mut space = TestSpace::default();
        let x = space.new_variable(4, 5);
        let y = space.new_variable(4, 5);

        assert_eq!(
            space
                .new_propagator(LinearLessOrEqual::new([x, y].into(), 7))
                .expect_err("the sum is at least 8"),
            Inconsistency::Conflict
        );
    }

    #[test]
    fn entailed_sum_is_subsumed() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 2);
        let y = space.new_variable(0, 2);

        let propagator = space
            .new_propagator(LinearLessOrEqual::new([x, y].into(), 7))
            .expect("no empty domains");

        assert_eq!(
            space.propagate(propagator),
            Ok(PropagatorStatus::Subsumed)
        );
    }
}

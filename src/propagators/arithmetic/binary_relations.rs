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

/// Bounds consistent propagator for `x <= y`. Strict inequalities are posted on an offset view.
#[derive(Clone, Debug)]
pub(crate) struct LessOrEqual<A, B> {
    x: A,
    y: B,
}

impl<A, B> LessOrEqual<A, B> {
    pub(crate) fn new(x: A, y: B) -> Self {
        LessOrEqual { x, y }
    }
}

impl<A: IntegerVariable, B: IntegerVariable> Propagator for LessOrEqual<A, B> {
    fn name(&self) -> &str {
        "LessOrEqual"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x.clone(), DomainEvents::LOWER_BOUND, LocalId::from(0));
        let _ = context.register(self.y.clone(), DomainEvents::UPPER_BOUND, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let _ = context.set_upper_bound(&self.x, context.upper_bound(&self.y))?;
        let _ = context.set_lower_bound(&self.y, context.lower_bound(&self.x))?;

        if context.upper_bound(&self.x) <= context.lower_bound(&self.y) {
            Ok(PropagatorStatus::Subsumed)
        } else {
            Ok(PropagatorStatus::Fix)
        }
    }
}

/// Domain consistent propagator for `x = y`.
///
/// Each run copies the domain of one view into the region and intersects the other view with
/// it, in both directions, after which both views have the same values.
#[derive(Clone, Debug)]
pub(crate) struct Equal<A, B> {
    x: A,
    y: B,
}

impl<A, B> Equal<A, B> {
    pub(crate) fn new(x: A, y: B) -> Self {
        Equal { x, y }
    }
}

impl<A: IntegerVariable, B: IntegerVariable> Propagator for Equal<A, B> {
    fn name(&self) -> &str {
        "Equal"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        let _ = context.register(self.y.clone(), DomainEvents::ANY_INT, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let region = context.region();

        let mut ranges = region.vec();
        ranges.extend(context.iterate_ranges(&self.y));
        let _ = context.intersect(&self.x, ranges.iter().copied())?;

        ranges.clear();
        ranges.extend(context.iterate_ranges(&self.x));
        let _ = context.intersect(&self.y, ranges.iter().copied())?;

        if context.is_fixed(&self.x) {
            Ok(PropagatorStatus::Subsumed)
        } else {
            Ok(PropagatorStatus::Fix)
        }
    }
}

/// Propagator for `x != y`; it waits until one of the views is fixed.
#[derive(Clone, Debug)]
pub(crate) struct NotEqual<A, B> {
    x: A,
    y: B,
}

impl<A, B> NotEqual<A, B> {
    pub(crate) fn new(x: A, y: B) -> Self {
        NotEqual { x, y }
    }
}

impl<A: IntegerVariable, B: IntegerVariable> Propagator for NotEqual<A, B> {
    fn name(&self) -> &str {
        "NotEqual"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x.clone(), DomainEvents::ASSIGN, LocalId::from(0));
        let _ = context.register(self.y.clone(), DomainEvents::ASSIGN, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.is_fixed(&self.x) {
            let _ = context.remove(&self.y, context.lower_bound(&self.x))?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if context.is_fixed(&self.y) {
            let _ = context.remove(&self.x, context.lower_bound(&self.y))?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if context.upper_bound(&self.x) < context.lower_bound(&self.y)
            || context.upper_bound(&self.y) < context.lower_bound(&self.x)
        {
            return Ok(PropagatorStatus::Subsumed);
        }

        Ok(PropagatorStatus::Fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;
    use crate::variables::TransformableVariable;

    #[test]
    fn bounds_are_exchanged() {
        let mut space = TestSpace::default();
        let x = space.new_variable(3, 10);
        let y = space.new_variable(0, 7);

        let _ = space
            .new_propagator(LessOrEqual::new(x, y))
            .expect("no empty domains");

        space.assert_bounds(x, 3, 7);
        space.assert_bounds(y, 3, 7);
    }

    #[test]
    fn strict_inequality_through_an_offset_view() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 5);
        let y = space.new_variable(0, 5);

        // x < y is x <= y - 1
        let _ = space
            .new_propagator(LessOrEqual::new(x, y.offset(-1)))
            .expect("no empty domains");

        space.assert_bounds(x, 0, 4);
        space.assert_bounds(y, 1, 5);
    }

    #[test]
    fn equality_intersects_holes() {
        let mut space = TestSpace::default();
        let x = space.new_sparse_variable(vec![1, 3, 5, 7, 9]);
        let y = space.new_sparse_variable(vec![2, 3, 4, 5, 6]);

        let _ = space
            .new_propagator(Equal::new(x, y))
            .expect("no empty domains");

        space.assert_domain(x, vec![3, 5]);
        space.assert_domain(y, vec![3, 5]);
    }

    #[test]
    fn equality_through_a_negation() {
        let mut space = TestSpace::default();
        let x = space.new_sparse_variable(vec![-3, 1, 2]);
        let y = space.new_variable(-2, 3);

        let _ = space
            .new_propagator(Equal::new(x, y.scaled(-1)))
            .expect("no empty domains");

        space.assert_domain(x, vec![-3, 1, 2]);
        space.assert_domain(y, vec![-2, -1, 3]);
    }

    #[test]
    fn disjoint_domains_fail_equality() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 3);
        let y = space.new_variable(4, 6);

        assert!(space.new_propagator(Equal::new(x, y)).is_err());
    }

    #[test]
    fn disequality_removes_the_fixed_value() {
        let mut space = TestSpace::default();
        let x = space.new_variable(2, 2);
        let y = space.new_variable(1, 5);

        let _ = space
            .new_propagator(NotEqual::new(x, y))
            .expect("no empty domains");

        space.assert_domain(y, vec![1, 3, 4, 5]);
    }
}

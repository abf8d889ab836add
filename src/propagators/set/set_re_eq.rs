use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::basic_types::RangeList;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::propagators::set::SetSubset;
use crate::variables::Literal;
use crate::variables::SetVariable;

/// Propagator for `b <-> x = y`. A true `b` rewrites the propagator into two [`SetSubset`]s.
#[derive(Clone, Debug)]
pub(crate) struct SetReEq<A, B> {
    x: A,
    y: B,
    b: Literal,
}

impl<A, B> SetReEq<A, B> {
    pub(crate) fn new(x: A, y: B, b: Literal) -> Self {
        SetReEq { x, y, b }
    }
}

impl<A: SetVariable, B: SetVariable> Propagator for SetReEq<A, B> {
    fn name(&self) -> &str {
        "SetReEq"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Ternary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register_set(self.x.clone(), DomainEvents::ANY_SET, LocalId::from(0));
        let _ = context.register_set(self.y.clone(), DomainEvents::ANY_SET, LocalId::from(1));
        let _ = context.register(self.b, DomainEvents::ASSIGN, LocalId::from(2));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.is_fixed(&self.b) && context.lower_bound(&self.b) == 1 {
            context.rewrite(SetSubset::new(self.x.clone(), self.y.clone()));
            context.rewrite(SetSubset::new(self.y.clone(), self.x.clone()));
            return Ok(PropagatorStatus::Subsumed);
        }

        let glb_x = RangeList::from_sorted_ranges(context.glb_ranges(&self.x));
        let glb_y = RangeList::from_sorted_ranges(context.glb_ranges(&self.y));

        let disentailed = !glb_x.is_subset_of(context.lub_ranges(&self.y))
            || !glb_y.is_subset_of(context.lub_ranges(&self.x))
            || context.card_max(&self.x) < context.card_min(&self.y)
            || context.card_max(&self.y) < context.card_min(&self.x);

        if disentailed {
            let _ = context.assign(&self.b, 0)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if context.is_set_fixed(&self.x) && context.is_set_fixed(&self.y) {
            // Both sets are fixed and not disentailed, hence equal.
            let _ = context.assign(&self.b, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        Ok(PropagatorStatus::Fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn equal_fixed_sets_entail() {
        let mut space = TestSpace::default();
        let x = space.new_set_variable(&[1, 3], &[1, 3]);
        let y = space.new_set_variable(&[1, 3], &[1, 3]);
        let b = space.new_literal();

        let _ = space
            .new_propagator(SetReEq::new(x, y, b))
            .expect("no empty domains");

        assert!(space.is_literal_true(b));
    }

    #[test]
    fn incompatible_bounds_disentail() {
        let mut space = TestSpace::default();
        let x = space.new_set_variable(&[4], &[1, 4]);
        let y = space.new_set_variable(&[], &[1, 2, 3]);
        let b = space.new_literal();

        let _ = space
            .new_propagator(SetReEq::new(x, y, b))
            .expect("no empty domains");

        assert!(space.is_literal_false(b));
    }

    #[test]
    fn false_control_with_equal_fixed_sets_fails() {
        let mut space = TestSpace::default();
        let x = space.new_set_variable(&[2], &[2]);
        let y = space.new_set_variable(&[2], &[2]);
        let b = space.new_literal();
        space.set_literal(b, false);

        assert!(space.new_propagator(SetReEq::new(x, y, b)).is_err());
    }
}

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

/// Propagator for `x = y` over two 0/1 views. Posted with a negated literal it propagates
/// `x != y`.
#[derive(Clone, Debug)]
pub(crate) struct BoolEq<A, B> {
    x: A,
    y: B,
}

impl<A, B> BoolEq<A, B> {
    pub(crate) fn new(x: A, y: B) -> Self {
        BoolEq { x, y }
    }
}

impl<A: IntegerVariable, B: IntegerVariable> Propagator for BoolEq<A, B> {
    fn name(&self) -> &str {
        "BoolEq"
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
            let _ = context.assign(&self.y, context.lower_bound(&self.x))?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if context.is_fixed(&self.y) {
            let _ = context.assign(&self.x, context.lower_bound(&self.y))?;
            return Ok(PropagatorStatus::Subsumed);
        }

        Ok(PropagatorStatus::Fix)
    }
}

/// Propagator for `x <= y` over two 0/1 views, i.e. the implication `x -> y`.
#[derive(Clone, Debug)]
pub(crate) struct BoolLq<A, B> {
    x: A,
    y: B,
}

impl<A, B> BoolLq<A, B> {
    pub(crate) fn new(x: A, y: B) -> Self {
        BoolLq { x, y }
    }
}

impl<A: IntegerVariable, B: IntegerVariable> Propagator for BoolLq<A, B> {
    fn name(&self) -> &str {
        "BoolLq"
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
        if context.upper_bound(&self.x) == 0 || context.lower_bound(&self.y) == 1 {
            return Ok(PropagatorStatus::Subsumed);
        }

        if context.lower_bound(&self.x) == 1 {
            let _ = context.set_lower_bound(&self.y, 1)?;
            return Ok(PropagatorStatus::Subsumed);
        }

        if context.upper_bound(&self.y) == 0 {
            let _ = context.set_upper_bound(&self.x, 0)?;
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
    fn equality_copies_a_fixed_value() {
        let mut space = TestSpace::default();
        let x = space.new_literal();
        let y = space.new_literal();

        let propagator = space
            .new_propagator(BoolEq::new(x, y))
            .expect("no empty domains");

        space.set_literal(y, false);
        let status = space.propagate(propagator).expect("no empty domains");

        assert_eq!(status, PropagatorStatus::Subsumed);
        assert!(space.is_literal_false(x));
    }

    #[test]
    fn negated_view_gives_disequality() {
        let mut space = TestSpace::default();
        let x = space.new_literal();
        let y = space.new_literal();
        space.set_literal(x, true);

        let _ = space
            .new_propagator(BoolEq::new(x, !y))
            .expect("no empty domains");

        assert!(space.is_literal_false(y));
    }

    #[test]
    fn implication_fails_on_true_and_false() {
        let mut space = TestSpace::default();
        let x = space.new_literal();
        let y = space.new_literal();
        space.set_literal(x, true);
        space.set_literal(y, false);

        let result = space.new_propagator(BoolLq::new(x, y));
        assert!(result.is_err());
    }
}

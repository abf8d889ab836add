use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::variables::IntegerVariable;
use crate::variables::SetVariable;

/// Propagator for `x ∈ s`.
#[derive(Clone, Debug)]
pub(crate) struct SetMembership<Var, Set> {
    x: Var,
    set: Set,
}

impl<Var, Set> SetMembership<Var, Set> {
    pub(crate) fn new(x: Var, set: Set) -> Self {
        SetMembership { x, set }
    }
}

impl<Var: IntegerVariable, Set: SetVariable> Propagator for SetMembership<Var, Set> {
    fn name(&self) -> &str {
        "SetMembership"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        let _ = context.register_set(self.set.clone(), DomainEvents::LUB, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let mut lub = context.region().vec();
        lub.extend(context.lub_ranges(&self.set));
        let _ = context.intersect(&self.x, lub.iter().copied())?;

        if context.is_fixed(&self.x) {
            let value = context.lower_bound(&self.x);
            let _ = context.include(&self.set, [ValueRange::singleton(value)])?;
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
    fn member_is_restricted_to_the_upper_bound() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);
        let set = space.new_set_variable(&[], &[2, 4, 6, 20]);

        let _ = space
            .new_propagator(SetMembership::new(x, set))
            .expect("no empty domains");

        space.assert_domain(x, vec![2, 4, 6]);
    }

    #[test]
    fn fixed_member_is_included() {
        let mut space = TestSpace::default();
        let x = space.new_variable(4, 4);
        let set = space.new_set_variable(&[], &[2, 4, 6]);

        let _ = space
            .new_propagator(SetMembership::new(x, set))
            .expect("no empty domains");

        assert!(space.glb(set).contains(4));
    }
}

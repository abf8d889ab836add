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
use crate::variables::SetVariable;

/// Propagator for `|s| = c`.
#[derive(Clone, Debug)]
pub(crate) struct SetCardinality<Set, Var> {
    set: Set,
    cardinality: Var,
}

impl<Set, Var> SetCardinality<Set, Var> {
    pub(crate) fn new(set: Set, cardinality: Var) -> Self {
        SetCardinality { set, cardinality }
    }
}

impl<Set: SetVariable, Var: IntegerVariable> Propagator for SetCardinality<Set, Var> {
    fn name(&self) -> &str {
        "SetCardinality"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register_set(self.set.clone(), DomainEvents::CARD, LocalId::from(0));
        let _ = context.register(
            self.cardinality.clone(),
            DomainEvents::BOUNDS,
            LocalId::from(1),
        );

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let _ = context.set_lower_bound(&self.cardinality, 0)?;

        let lower = context.lower_bound(&self.cardinality) as u64;
        let upper = context.upper_bound(&self.cardinality) as u64;
        let _ = context.set_card_min(&self.set, lower)?;
        let _ = context.set_card_max(&self.set, upper)?;

        let card_min = i32::try_from(context.card_min(&self.set)).unwrap_or(i32::MAX);
        let card_max = i32::try_from(context.card_max(&self.set)).unwrap_or(i32::MAX);
        let _ = context.set_lower_bound(&self.cardinality, card_min)?;
        let _ = context.set_upper_bound(&self.cardinality, card_max)?;

        if context.is_set_fixed(&self.set) {
            Ok(PropagatorStatus::Subsumed)
        } else {
            Ok(PropagatorStatus::NoFix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::RangeList;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn cardinality_follows_the_bounds() {
        let mut space = TestSpace::default();
        let set = space.new_set_variable(&[1, 2], &[1, 2, 3, 4, 5]);
        let cardinality = space.new_variable(0, 10);

        let _ = space
            .new_propagator(SetCardinality::new(set, cardinality))
            .expect("no empty domains");

        space.assert_bounds(cardinality, 2, 5);
    }

    #[test]
    fn fixed_cardinality_can_fix_the_set() {
        let mut space = TestSpace::default();
        let set = space.new_set_variable(&[1, 2], &[1, 2, 3]);
        let cardinality = space.new_variable(2, 2);

        let _ = space
            .new_propagator(SetCardinality::new(set, cardinality))
            .expect("no empty domains");

        assert_eq!(space.lub(set), &RangeList::interval(1, 2));
    }
}

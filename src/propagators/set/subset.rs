use crate::basic_types::Diff;
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
use crate::variables::SetVariable;

/// Propagator for `x ⊆ y`.
#[derive(Clone, Debug)]
pub(crate) struct SetSubset<A, B> {
    x: A,
    y: B,
}

impl<A, B> SetSubset<A, B> {
    pub(crate) fn new(x: A, y: B) -> Self {
        SetSubset { x, y }
    }
}

impl<A: SetVariable, B: SetVariable> Propagator for SetSubset<A, B> {
    fn name(&self) -> &str {
        "SetSubset"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register_set(self.x.clone(), DomainEvents::ANY_SET, LocalId::from(0));
        let _ = context.register_set(self.y.clone(), DomainEvents::ANY_SET, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let region = context.region();

        let mut glb_x = region.vec();
        glb_x.extend(context.glb_ranges(&self.x));
        let _ = context.include(&self.y, glb_x.iter().copied())?;

        let mut lub_y = region.vec();
        lub_y.extend(context.lub_ranges(&self.y));
        let _ = context.intersect_lub(&self.x, lub_y.iter().copied())?;

        let card_max_y = context.card_max(&self.y);
        let _ = context.set_card_max(&self.x, card_max_y)?;
        let card_min_x = context.card_min(&self.x);
        let _ = context.set_card_min(&self.y, card_min_x)?;

        let mut lub_x = region.vec();
        lub_x.extend(context.lub_ranges(&self.x));
        let mut glb_y = region.vec();
        glb_y.extend(context.glb_ranges(&self.y));

        if Diff::new(lub_x.iter().copied(), glb_y.iter().copied())
            .next()
            .is_none()
        {
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
    fn bounds_flow_between_the_sets() {
        let mut space = TestSpace::default();
        let x = space.new_set_variable(&[1], &[1, 2, 3, 7]);
        let y = space.new_set_variable(&[], &[0, 1, 2, 3, 4]);

        let propagator = space
            .new_propagator(SetSubset::new(x, y))
            .expect("no empty domains");
        let _ = space
            .propagate_until_fixed_point(propagator)
            .expect("no empty domains");

        assert_eq!(space.lub(x), &RangeList::interval(1, 3));
        assert_eq!(space.glb(y), &RangeList::interval(1, 1));
    }

    #[test]
    fn subsumed_once_entailed() {
        let mut space = TestSpace::default();
        let x = space.new_set_variable(&[], &[2, 3]);
        let y = space.new_set_variable(&[2, 3], &[2, 3, 4]);

        let propagator = space
            .new_propagator(SetSubset::new(x, y))
            .expect("no empty domains");

        assert_eq!(space.propagate(propagator), Ok(PropagatorStatus::Subsumed));
    }

    #[test]
    fn required_value_outside_the_superset_fails() {
        let mut space = TestSpace::default();
        let x = space.new_set_variable(&[5], &[5, 6]);
        let y = space.new_set_variable(&[], &[1, 2]);

        assert!(space.new_propagator(SetSubset::new(x, y)).is_err());
    }
}

use crate::basic_types::compare;
use crate::basic_types::Inconsistency;
use crate::basic_types::IntSet;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::basic_types::SetComparison;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::variables::IntegerVariable;
use crate::variables::Literal;

/// Propagator for `x in S` (or `x not in S` when negated), with `S` a constant set. It narrows
/// once and is subsumed.
#[derive(Clone, Debug)]
pub(crate) struct IntSetDom<Var> {
    x: Var,
    set: IntSet,
    negated: bool,
}

impl<Var> IntSetDom<Var> {
    pub(crate) fn new(x: Var, set: IntSet) -> Self {
        IntSetDom {
            x,
            set,
            negated: false,
        }
    }

    pub(crate) fn not_in(x: Var, set: IntSet) -> Self {
        IntSetDom {
            x,
            set,
            negated: true,
        }
    }
}

impl<Var: IntegerVariable> Propagator for IntSetDom<Var> {
    fn name(&self) -> &str {
        "IntSetDom"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Unary
    }

    fn initialise(&mut self, _: &mut PropagatorInitialisationContext) -> Result<(), Inconsistency> {
        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if self.negated {
            let _ = context.subtract(&self.x, self.set.iter())?;
        } else {
            let _ = context.intersect(&self.x, self.set.iter())?;
        }

        Ok(PropagatorStatus::Subsumed)
    }
}

/// Propagator for `b <-> x in S`. Once `b` is fixed the propagator rewrites itself into an
/// [`IntSetDom`].
#[derive(Clone, Debug)]
pub(crate) struct ReIntSet<Var> {
    x: Var,
    set: IntSet,
    b: Literal,
}

impl<Var> ReIntSet<Var> {
    pub(crate) fn new(x: Var, set: IntSet, b: Literal) -> Self {
        ReIntSet { x, set, b }
    }
}

impl<Var: IntegerVariable> Propagator for ReIntSet<Var> {
    fn name(&self) -> &str {
        "ReIntSet"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Binary
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.x.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        let _ = context.register(self.b, DomainEvents::ASSIGN, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.is_fixed(&self.b) {
            if context.lower_bound(&self.b) == 1 {
                context.rewrite(IntSetDom::new(self.x.clone(), self.set.clone()));
            } else {
                context.rewrite(IntSetDom::not_in(self.x.clone(), self.set.clone()));
            }

            return Ok(PropagatorStatus::Subsumed);
        }

        match compare(context.iterate_ranges(&self.x), self.set.iter()) {
            SetComparison::Subset => {
                let _ = context.assign(&self.b, 1)?;
                Ok(PropagatorStatus::Subsumed)
            }
            SetComparison::Disjoint => {
                let _ = context.assign(&self.b, 0)?;
                Ok(PropagatorStatus::Subsumed)
            }
            SetComparison::None => Ok(PropagatorStatus::Fix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn membership_keeps_only_members() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);

        let _ = space
            .new_propagator(IntSetDom::new(x, IntSet::from_values([2, 3, 4, 8, 12])))
            .expect("no empty domains");

        space.assert_domain(x, vec![2, 3, 4, 8]);
    }

    #[test]
    fn reification_is_decided_by_the_domain() {
        let mut space = TestSpace::default();
        let x = space.new_variable(5, 7);
        let b = space.new_literal();

        let _ = space
            .new_propagator(ReIntSet::new(x, IntSet::interval(0, 4), b))
            .expect("no empty domains");

        assert!(space.is_literal_false(b));
    }

    #[test]
    fn reification_is_undecided_on_overlap() {
        let mut space = TestSpace::default();
        let x = space.new_variable(3, 7);
        let b = space.new_literal();

        let propagator = space
            .new_propagator(ReIntSet::new(x, IntSet::interval(0, 4), b))
            .expect("no empty domains");

        assert_eq!(space.propagate(propagator), Ok(PropagatorStatus::Fix));
    }
}

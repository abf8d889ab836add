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

/// Value consistent propagator for `x_i != x_j` for all `i != j`: the value of every fixed view
/// is removed from all other views, until no new view becomes fixed.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferent<Var> {
    variables: Box<[Var]>,
}

impl<Var> AllDifferent<Var> {
    pub(crate) fn new(variables: Box<[Var]>) -> Self {
        AllDifferent { variables }
    }
}

impl<Var: IntegerVariable> Propagator for AllDifferent<Var> {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn cost(&self) -> PropagatorCost {
        if self.variables.len() <= 3 {
            PropagatorCost::for_arity(self.variables.len())
        } else {
            PropagatorCost::Quadratic
        }
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        for (index, variable) in self.variables.iter().enumerate() {
            let _ = context.register(
                variable.clone(),
                DomainEvents::ASSIGN,
                LocalId::from(index as u32),
            );
        }

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let region = context.region();

        let processed = region.alloc_slice(self.variables.len(), false);
        let mut pending = region.vec();
        pending.extend(
            self.variables
                .iter()
                .enumerate()
                .filter(|(_, variable)| context.is_fixed(*variable))
                .map(|(index, _)| index),
        );

        while let Some(fixed) = pending.pop() {
            if processed[fixed] {
                continue;
            }
            processed[fixed] = true;

            let value = context.lower_bound(&self.variables[fixed]);
            for (other, variable) in self.variables.iter().enumerate() {
                if other == fixed {
                    continue;
                }

                let _ = context.remove(variable, value)?;
                if !processed[other] && context.is_fixed(variable) {
                    pending.push(other);
                }
            }
        }

        if processed.iter().all(|&is_processed| is_processed) {
            Ok(PropagatorStatus::Subsumed)
        } else {
            Ok(PropagatorStatus::Fix)
        }
    }

    fn dispose(&mut self) -> usize {
        std::mem::size_of_val(self) + std::mem::size_of_val(&*self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn fixed_values_cascade() {
        let mut space = TestSpace::default();
        let x = space.new_variable(1, 1);
        let y = space.new_variable(1, 2);
        let z = space.new_variable(1, 3);

        let propagator = space
            .new_propagator(AllDifferent::new([x, y, z].into()))
            .expect("no empty domains");

        space.assert_domain(y, vec![2]);
        space.assert_domain(z, vec![3]);
        assert_eq!(
            space.propagate(propagator),
            Ok(PropagatorStatus::Subsumed)
        );
    }

    #[test]
    fn equal_fixed_values_fail() {
        let mut space = TestSpace::default();
        let x = space.new_variable(4, 4);
        let y = space.new_variable(4, 4);
        let z = space.new_variable(0, 10);

        assert!(space
            .new_propagator(AllDifferent::new([x, y, z].into()))
            .is_err());
    }

    #[test]
    fn unfixed_views_are_left_alone() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 3);
        let y = space.new_variable(0, 3);

        let propagator = space
            .new_propagator(AllDifferent::new([x, y].into()))
            .expect("no empty domains");

        space.assert_bounds(x, 0, 3);
        space.set_lower_bound(x, 3);
        let _ = space.propagate(propagator).expect("no empty domains");

        space.assert_domain(y, vec![0, 1, 2]);
    }
}

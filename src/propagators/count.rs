use enumset::EnumSet;

use crate::basic_types::Inconsistency;
use crate::basic_types::IntRelation;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::variables::IntegerVariable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Occurrence {
    /// The view may or may not take the counted value.
    Unknown,
    /// The view is fixed to the counted value.
    Equal,
    /// The view cannot take the counted value.
    Different,
}

/// Propagator for `#{i | x_i = c} ~ m`, where `~` is `=`, `!=`, `<=` or `>=`. Strict relations
/// are posted on an offset view of `m`.
///
/// The advisors keep track of which views are decided, so the propagator only runs when the
/// number of occurrences changed or when `m` changed.
#[derive(Clone, Debug)]
pub(crate) struct Count<Var, Total> {
    variables: Box<[Var]>,
    value: i32,
    relation: IntRelation,
    total: Total,
    occurrences: Box<[Occurrence]>,
    num_equal: usize,
    num_unknown: usize,
}

impl<Var, Total> Count<Var, Total> {
    pub(crate) fn new(
        variables: Box<[Var]>,
        value: i32,
        relation: IntRelation,
        total: Total,
    ) -> Self {
        assert!(
            !matches!(relation, IntRelation::Less | IntRelation::Greater),
            "strict relations are posted through an offset view"
        );

        let num_variables = variables.len();
        Count {
            variables,
            value,
            relation,
            total,
            occurrences: vec![Occurrence::Unknown; num_variables].into(),
            num_equal: 0,
            num_unknown: num_variables,
        }
    }
}

impl<Var: IntegerVariable, Total> Count<Var, Total> {
    /// Record what is known about view `index`; returns whether something changed.
    fn update_occurrence<Context: ReadDomains>(&mut self, context: &Context, index: usize) -> bool {
        if self.occurrences[index] != Occurrence::Unknown {
            return false;
        }

        let variable = &self.variables[index];
        if !context.contains(variable, self.value) {
            self.occurrences[index] = Occurrence::Different;
        } else if context.is_fixed(variable) {
            self.occurrences[index] = Occurrence::Equal;
            self.num_equal += 1;
        } else {
            return false;
        }

        self.num_unknown -= 1;
        true
    }

    /// Decide every undecided view: either all take the value, or none does.
    fn decide_unknown(
        &mut self,
        context: &mut PropagationContextMut,
        take_value: bool,
    ) -> Result<(), Inconsistency> {
        for index in 0..self.variables.len() {
            if self.occurrences[index] != Occurrence::Unknown {
                continue;
            }

            if take_value {
                let _ = context.assign(&self.variables[index], self.value)?;
            } else {
                let _ = context.remove(&self.variables[index], self.value)?;
            }
            let _ = self.update_occurrence(context, index);
        }

        Ok(())
    }
}

impl<Var: IntegerVariable, Total: IntegerVariable> Propagator for Count<Var, Total> {
    fn name(&self) -> &str {
        "Count"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Linear
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        for (index, variable) in self.variables.iter().enumerate() {
            let _ = context.register_advisor(
                variable.clone(),
                DomainEvents::ANY_INT,
                LocalId::from(index as u32),
            );
        }
        let _ = context.register(
            self.total.clone(),
            DomainEvents::ANY_INT,
            LocalId::from(self.variables.len() as u32),
        );

        for index in 0..self.variables.len() {
            let _ = self.update_occurrence(&*context, index);
        }

        Ok(())
    }

    fn advise(
        &mut self,
        context: PropagationContext,
        local_id: LocalId,
        _events: EnumSet<IntDomainEvent>,
        _delta: Delta,
    ) -> EnqueueDecision {
        if self.update_occurrence(&context, local_id.unpack() as usize) {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let at_least = self.num_equal as i32;
        let at_most = (self.num_equal + self.num_unknown) as i32;

        match self.relation {
            IntRelation::Equal => {
                let _ = context.set_lower_bound(&self.total, at_least)?;
                let _ = context.set_upper_bound(&self.total, at_most)?;

                if context.upper_bound(&self.total) == at_least {
                    self.decide_unknown(&mut context, false)?;
                } else if context.lower_bound(&self.total) == at_most {
                    self.decide_unknown(&mut context, true)?;
                }
            }
            IntRelation::LessOrEqual => {
                let _ = context.set_lower_bound(&self.total, at_least)?;

                if context.upper_bound(&self.total) == at_least {
                    self.decide_unknown(&mut context, false)?;
                }
                if context.lower_bound(&self.total) >= at_most {
                    return Ok(PropagatorStatus::Subsumed);
                }
            }
            IntRelation::GreaterOrEqual => {
                let _ = context.set_upper_bound(&self.total, at_most)?;

                if context.lower_bound(&self.total) == at_most {
                    self.decide_unknown(&mut context, true)?;
                }
                if context.upper_bound(&self.total) <= at_least {
                    return Ok(PropagatorStatus::Subsumed);
                }
            }
            IntRelation::NotEqual => {
                if self.num_unknown == 0 {
                    let _ = context.remove(&self.total, at_least)?;
                    return Ok(PropagatorStatus::Subsumed);
                }

                if self.num_unknown == 1 && context.is_fixed(&self.total) {
                    let total = context.lower_bound(&self.total);
                    if total == at_least {
                        self.decide_unknown(&mut context, true)?;
                    } else if total == at_most {
                        self.decide_unknown(&mut context, false)?;
                    }
                }

                if context.upper_bound(&self.total) < at_least
                    || context.lower_bound(&self.total) > at_most
                {
                    return Ok(PropagatorStatus::Subsumed);
                }
            }
            IntRelation::Less | IntRelation::Greater => {
                unreachable!("strict relations are posted through an offset view")
            }
        }

        if self.num_unknown == 0 && context.is_fixed(&self.total) {
            Ok(PropagatorStatus::Subsumed)
        } else {
            Ok(PropagatorStatus::Fix)
        }
    }

    fn dispose(&mut self) -> usize {
        std::mem::size_of_val(self)
            + std::mem::size_of_val(&*self.variables)
            + std::mem::size_of_val(&*self.occurrences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn total_is_bounded_by_the_occurrences() {
        let mut space = TestSpace::default();
        let variables = vec![
            space.new_variable(2, 2),
            space.new_variable(0, 5),
            space.new_variable(3, 5),
            space.new_variable(0, 2),
        ];
        let total = space.new_variable(0, 10);

        let _ = space
            .new_propagator(Count::new(
                variables.into(),
                2,
                IntRelation::Equal,
                total,
            ))
            .expect("no empty domains");

        space.assert_bounds(total, 1, 3);
    }

    #[test]
    fn reaching_the_total_removes_the_value_elsewhere() {
        let mut space = TestSpace::default();
        let variables = vec![
            space.new_variable(1, 1),
            space.new_variable(0, 3),
            space.new_variable(1, 3),
        ];
        let total = space.new_variable(0, 1);

        let _ = space
            .new_propagator(Count::new(
                variables.clone().into(),
                1,
                IntRelation::LessOrEqual,
                total,
            ))
            .expect("no empty domains");

        space.assert_bounds(total, 1, 1);
        space.assert_domain(variables[1], vec![0, 2, 3]);
        space.assert_domain(variables[2], vec![2, 3]);
    }

    #[test]
    fn a_lower_total_forces_the_value() {
        let mut space = TestSpace::default();
        let variables = vec![space.new_variable(0, 1), space.new_variable(0, 1)];
        let total = space.new_variable(2, 4);

        let _ = space
            .new_propagator(Count::new(
                variables.clone().into(),
                0,
                IntRelation::GreaterOrEqual,
                total,
            ))
            .expect("no empty domains");

        space.assert_bounds(total, 2, 2);
        space.assert_domain(variables[0], vec![0]);
        space.assert_domain(variables[1], vec![0]);
    }

    #[test]
    fn disequality_waits_for_a_single_unknown() {
        let mut space = TestSpace::default();
        let variables = vec![space.new_variable(3, 3), space.new_variable(0, 5)];
        let total = space.new_variable(1, 1);

        let _ = space
            .new_propagator(Count::new(
                variables.clone().into(),
                3,
                IntRelation::NotEqual,
                total,
            ))
            .expect("no empty domains");

        space.assert_domain(variables[1], vec![3]);
    }
}

use std::sync::Arc;

use log::trace;
use log::warn;

use crate::branching::Brancher;
use crate::branching::Choice;
use crate::branching::InDomainMin;
use crate::branching::InputOrder;
use crate::branching::ValueSelector;
use crate::branching::VariableSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;

/// A brancher over integer views which combines a [`VariableSelector`] with a [`ValueSelector`].
///
/// The views are shared between all copies of a space. Views before `start` are known to be
/// fixed; since domains only shrink, copies made later never need to look at them again.
#[derive(Debug, Clone)]
pub struct ViewValBrancher<Var, VarSel, ValSel> {
    variables: Arc<[Var]>,
    start: usize,
    variable_selector: VarSel,
    value_selector: ValSel,
}

impl<Var, VarSel, ValSel> ViewValBrancher<Var, VarSel, ValSel>
where
    Var: IntegerVariable,
    VarSel: VariableSelector<Var>,
    ValSel: ValueSelector<Var>,
{
    pub fn new(
        variables: impl IntoIterator<Item = Var>,
        variable_selector: VarSel,
        value_selector: ValSel,
    ) -> Self {
        let variables: Arc<[Var]> = variables.into_iter().collect();
        if variables.is_empty() {
            warn!("A brancher was created without any variables to branch on");
        }

        ViewValBrancher {
            variables,
            start: 0,
            variable_selector,
            value_selector,
        }
    }
}

impl<Var, VarSel, ValSel> Brancher for ViewValBrancher<Var, VarSel, ValSel>
where
    Var: IntegerVariable,
    VarSel: VariableSelector<Var>,
    ValSel: ValueSelector<Var>,
{
    fn name(&self) -> &str {
        "ViewValBrancher"
    }

    fn status(&mut self, context: PropagationContext) -> bool {
        while self.start < self.variables.len() {
            if !context.is_fixed(&self.variables[self.start]) {
                return true;
            }
            self.start += 1;
        }

        false
    }

    fn choice(&mut self, context: PropagationContext) -> Choice {
        let position = self
            .variable_selector
            .select_variable(&context, &self.variables[self.start..])
            .map(|offset| self.start + offset)
            .expect("the brancher status reported an unfixed variable");

        let value = self
            .value_selector
            .select_value(&context, &self.variables[position]);

        Choice::new(2, position, value)
    }

    fn commit(
        &self,
        assignments: &mut Assignments,
        choice: &Choice,
        alternative: u32,
    ) -> Result<ModEvent, EmptyDomain> {
        let variable = &self.variables[choice.position()];
        let relation = self.value_selector.relation();
        trace!(
            "Branching on {variable:?} {} {}",
            relation.describe(alternative),
            choice.value()
        );

        relation.commit(variable, assignments, choice.value(), alternative)
    }
}

/// Branch on Boolean variables in input order, trying `false` first.
pub fn val_zero_one(
    literals: impl IntoIterator<Item = Literal>,
) -> ViewValBrancher<Literal, InputOrder, InDomainMin> {
    ViewValBrancher::new(literals, InputOrder, InDomainMin)
}

/// Branch on Boolean variables in input order, trying `true` first. The brancher works on the
/// negated literals, for which the smallest value means `true`.
pub fn val_one_zero(
    literals: impl IntoIterator<Item = Literal>,
) -> ViewValBrancher<Literal, InputOrder, InDomainMin> {
    ViewValBrancher::new(literals.into_iter().map(|literal| !literal), InputOrder, InDomainMin)
}

#[cfg(test)]
mod tests {
    use super::ViewValBrancher;
    use crate::branching::Brancher;
    use crate::branching::FirstFail;
    use crate::branching::InDomainSplitMax;
    use crate::engine::cp::propagation::PropagationContext;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn alternatives_partition_the_domain() {
        let mut space = TestSpace::default();
        let variables = vec![space.new_variable(0, 0), space.new_variable(2, 9)];
        let mut brancher = ViewValBrancher::new(variables.clone(), FirstFail, InDomainSplitMax);

        assert!(brancher.status(PropagationContext::new(space.assignments())));
        let choice = brancher.choice(PropagationContext::new(space.assignments()));
        assert_eq!(choice.position(), 1);
        assert_eq!(choice.value(), 5);

        let mut first = space.assignments().clone();
        let _ = brancher
            .commit(&mut first, &choice, 0)
            .expect("non-empty alternative");
        assert_eq!(first.get_lower_bound(variables[1]), 6);

        let mut second = space.assignments().clone();
        let _ = brancher
            .commit(&mut second, &choice, 1)
            .expect("non-empty alternative");
        assert_eq!(second.get_upper_bound(variables[1]), 5);
    }

    #[test]
    fn exhausted_once_every_variable_is_fixed() {
        let mut space = TestSpace::default();
        let variables = vec![space.new_variable(1, 1), space.new_variable(4, 4)];
        let mut brancher = ViewValBrancher::new(variables, FirstFail, InDomainSplitMax);

        assert!(!brancher.status(PropagationContext::new(space.assignments())));
    }
}

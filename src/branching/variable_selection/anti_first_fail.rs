use super::variable_selector::find_extremum;
use super::variable_selector::Direction;
use crate::branching::VariableSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the largest domain.
#[derive(Clone, Copy, Debug, Default)]
pub struct AntiFirstFail;

impl<Var: IntegerVariable> VariableSelector<Var> for AntiFirstFail {
    fn select_variable(&mut self, context: &PropagationContext, variables: &[Var]) -> Option<usize> {
        find_extremum(
            context,
            variables,
            |variable| context.size(variable),
            Direction::Maximum,
        )
    }
}

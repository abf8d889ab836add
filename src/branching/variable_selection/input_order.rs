use crate::branching::VariableSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the first unfixed variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputOrder;

impl<Var: IntegerVariable> VariableSelector<Var> for InputOrder {
    fn select_variable(&mut self, context: &PropagationContext, variables: &[Var]) -> Option<usize> {
        variables
            .iter()
            .position(|variable| !context.is_fixed(variable))
    }
}

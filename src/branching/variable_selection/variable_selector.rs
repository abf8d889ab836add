use std::fmt::Debug;

use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A trait containing the interface for [`VariableSelector`]s, which decide which variable a
/// brancher branches on next.
pub trait VariableSelector<Var>: Clone + Debug + Send + 'static {
    /// Select the position of the variable to branch on among `variables`. Should only return
    /// [`None`] when all the given variables are fixed; it must never select a fixed variable.
    fn select_variable(&mut self, context: &PropagationContext, variables: &[Var]) -> Option<usize>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Minimum,
    Maximum,
}

/// The position of the unfixed variable with the smallest or largest key. Ties are broken in
/// favour of the earliest variable.
pub(crate) fn find_extremum<Var: IntegerVariable, Key: Ord>(
    context: &PropagationContext,
    variables: &[Var],
    key: impl Fn(&Var) -> Key,
    direction: Direction,
) -> Option<usize> {
    let mut best: Option<(usize, Key)> = None;

    for (position, variable) in variables.iter().enumerate() {
        if context.is_fixed(variable) {
            continue;
        }

        let candidate = key(variable);
        let is_better = match &best {
            None => true,
            Some((_, current)) => match direction {
                Direction::Minimum => candidate < *current,
                Direction::Maximum => candidate > *current,
            },
        };

        if is_better {
            best = Some((position, candidate));
        }
    }

    best.map(|(position, _)| position)
}

use super::variable_selector::find_extremum;
use super::variable_selector::Direction;
use crate::branching::VariableSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the largest upper bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Largest;

impl<Var: IntegerVariable> VariableSelector<Var> for Largest {
    fn select_variable(&mut self, context: &PropagationContext, variables: &[Var]) -> Option<usize> {
        find_extremum(
            context,
            variables,
            |variable| context.upper_bound(variable),
            Direction::Maximum,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::branching::Largest;
    use crate::branching::Smallest;
    use crate::branching::VariableSelector;
    use crate::engine::cp::propagation::PropagationContext;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn bounds_decide_the_selection() {
        let mut space = TestSpace::default();
        let variables = vec![
            space.new_variable(3, 9),
            space.new_variable(-2, 4),
            space.new_variable(0, 12),
            space.new_variable(-5, -5),
        ];
        let context = PropagationContext::new(space.assignments());

        assert_eq!(Smallest.select_variable(&context, &variables), Some(1));
        assert_eq!(Largest.select_variable(&context, &variables), Some(2));
    }
}

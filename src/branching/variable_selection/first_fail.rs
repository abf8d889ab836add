use super::variable_selector::find_extremum;
use super::variable_selector::Direction;
use crate::branching::VariableSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the smallest domain (counting the
/// actual number of values, holes included).
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFail;

impl<Var: IntegerVariable> VariableSelector<Var> for FirstFail {
    fn select_variable(&mut self, context: &PropagationContext, variables: &[Var]) -> Option<usize> {
        find_extremum(
            context,
            variables,
            |variable| context.size(variable),
            Direction::Minimum,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::branching::FirstFail;
    use crate::branching::VariableSelector;
    use crate::engine::cp::propagation::PropagationContext;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn test_correctly_selected() {
        let mut space = TestSpace::default();
        let variables = vec![space.new_variable(0, 10), space.new_variable(5, 20)];
        let mut strategy = FirstFail;

        let selected =
            strategy.select_variable(&PropagationContext::new(space.assignments()), &variables);
        assert_eq!(selected, Some(0));

        space.set_lower_bound(variables[1], 15);

        let selected =
            strategy.select_variable(&PropagationContext::new(space.assignments()), &variables);
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let mut space = TestSpace::default();
        let variables = vec![space.new_variable(10, 10), space.new_variable(20, 20)];

        let mut strategy = FirstFail;
        let selected =
            strategy.select_variable(&PropagationContext::new(space.assignments()), &variables);
        assert!(selected.is_none());
    }

    #[test]
    fn holes_count_towards_the_size() {
        let mut space = TestSpace::default();
        let variables = vec![
            space.new_variable(0, 5),
            space.new_sparse_variable(vec![0, 10, 20]),
        ];

        let selected = FirstFail
            .select_variable(&PropagationContext::new(space.assignments()), &variables);
        assert_eq!(selected, Some(1));
    }
}

use crate::branching::BranchRelation;
use crate::branching::ValueSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// [`ValueSelector`] which first tries the median value of the domain; for an even number of
/// values this is the smaller of the two middle values.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMedian;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMedian {
    fn select_value(&mut self, context: &PropagationContext, decision_variable: &Var) -> i32 {
        let size = context.size(decision_variable);
        let median = (size - 1) / 2;

        context
            .iterate_domain(decision_variable)
            .nth(median as usize)
            .unwrap_or_else(|| context.lower_bound(decision_variable))
    }

    fn relation(&self) -> BranchRelation {
        BranchRelation::Equal
    }
}

#[cfg(test)]
mod tests {
    use crate::branching::InDomainMedian;
    use crate::branching::ValueSelector;
    use crate::engine::cp::propagation::PropagationContext;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn median_skips_holes() {
        let mut space = TestSpace::default();
        let x = space.new_sparse_variable(vec![1, 2, 7, 8, 9, 20]);

        let value = InDomainMedian.select_value(&PropagationContext::new(space.assignments()), &x);
        assert_eq!(value, 7);
    }
}

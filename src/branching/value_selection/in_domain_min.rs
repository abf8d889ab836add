use crate::branching::BranchRelation;
use crate::branching::ValueSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// [`ValueSelector`] which first tries the smallest value of the domain.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMin {
    fn select_value(&mut self, context: &PropagationContext, decision_variable: &Var) -> i32 {
        context.lower_bound(decision_variable)
    }

    fn relation(&self) -> BranchRelation {
        BranchRelation::Equal
    }
}

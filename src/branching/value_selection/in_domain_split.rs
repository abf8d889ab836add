use crate::branching::BranchRelation;
use crate::branching::ValueSelector;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::marrow_assert_advanced;
use crate::math::num_ext::NumExt;

/// The middle of the bounds, rounded down. Both halves of a split on it are non-empty.
fn middle<Var: IntegerVariable>(context: &PropagationContext, decision_variable: &Var) -> i32 {
    let lower_bound = context.lower_bound(decision_variable);
    let upper_bound = context.upper_bound(decision_variable);

    let middle = NumExt::div_floor(lower_bound as i64 + upper_bound as i64, 2) as i32;
    marrow_assert_advanced!(
        lower_bound <= middle && middle < upper_bound,
        "It should hold that {lower_bound} <= {middle} < {upper_bound}"
    );

    middle
}

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and first explores the lower half.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainSplitMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainSplitMin {
    fn select_value(&mut self, context: &PropagationContext, decision_variable: &Var) -> i32 {
        middle(context, decision_variable)
    }

    fn relation(&self) -> BranchRelation {
        BranchRelation::LessOrEqual
    }
}

/// A [`ValueSelector`] which splits the domain in half and first explores the upper half.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainSplitMax;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainSplitMax {
    fn select_value(&mut self, context: &PropagationContext, decision_variable: &Var) -> i32 {
        middle(context, decision_variable)
    }

    fn relation(&self) -> BranchRelation {
        BranchRelation::Greater
    }
}

#[cfg(test)]
mod tests {
    use crate::branching::InDomainSplitMin;
    use crate::branching::ValueSelector;
    use crate::engine::cp::propagation::PropagationContext;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn split_rounds_towards_minus_infinity() {
        let mut space = TestSpace::default();
        let x = space.new_variable(-5, 0);
        let y = space.new_variable(0, 10);

        let context = PropagationContext::new(space.assignments());
        assert_eq!(InDomainSplitMin.select_value(&context, &x), -3);
        assert_eq!(InDomainSplitMin.select_value(&context, &y), 5);
    }
}

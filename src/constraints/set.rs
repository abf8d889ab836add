use super::Constraint;
use super::ReifiableConstraint;
use crate::propagators::set::SetCardinality;
use crate::propagators::set::SetMembership;
use crate::propagators::set::SetReEq;
use crate::propagators::set::SetSubset;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::variables::SetVariable;
use crate::variables::SingletonView;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`Constraint`] `x ⊆ y`.
pub fn subset<A: SetVariable, B: SetVariable>(x: A, y: B) -> impl Constraint {
    SetSubset::new(x, y)
}

/// Creates the [`ReifiableConstraint`] `x = y`.
pub fn set_equals<A: SetVariable, B: SetVariable>(x: A, y: B) -> impl ReifiableConstraint {
    SetEquals { x, y }
}

/// Creates the [`Constraint`] `set = {variable}`.
pub fn set_equals_int<Set: SetVariable, Var: IntegerVariable>(
    set: Set,
    variable: Var,
) -> impl ReifiableConstraint {
    SetEquals {
        x: set,
        y: SingletonView::new(variable),
    }
}

/// Creates the [`Constraint`] `variable ∈ set`.
pub fn set_member<Var: IntegerVariable, Set: SetVariable>(
    variable: Var,
    set: Set,
) -> impl Constraint {
    SetMembership::new(variable, set)
}

/// Creates the [`Constraint`] `|set| = cardinality`.
pub fn set_cardinality<Set: SetVariable, Var: IntegerVariable>(
    set: Set,
    cardinality: Var,
) -> impl Constraint {
    SetCardinality::new(set, cardinality)
}

struct SetEquals<A, B> {
    x: A,
    y: B,
}

impl<A: SetVariable, B: SetVariable> Constraint for SetEquals<A, B> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        space.post(SetSubset::new(self.x.clone(), self.y.clone()))?;
        space.post(SetSubset::new(self.y, self.x))
    }
}

impl<A: SetVariable, B: SetVariable> ReifiableConstraint for SetEquals<A, B> {
    fn reify(
        self,
        space: &mut Space,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        space.post(SetReEq::new(self.x, self.y, reification_literal))
    }
}

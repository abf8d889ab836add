use super::Constraint;
use super::ReifiableConstraint;
use crate::basic_types::IntSet;
use crate::propagators::int_set_dom::IntSetDom;
use crate::propagators::int_set_dom::ReIntSet;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`ReifiableConstraint`] `variable ∈ values`.
pub fn member<Var: IntegerVariable + 'static>(
    variable: Var,
    values: impl IntoIterator<Item = i32>,
) -> impl ReifiableConstraint {
    Member {
        variable,
        values: IntSet::from_values(values),
    }
}

/// Creates the [`Constraint`] `variable ∉ values`.
pub fn not_member<Var: IntegerVariable + 'static>(
    variable: Var,
    values: impl IntoIterator<Item = i32>,
) -> impl Constraint {
    IntSetDom::not_in(variable, IntSet::from_values(values))
}

struct Member<Var> {
    variable: Var,
    values: IntSet,
}

impl<Var: IntegerVariable + 'static> Constraint for Member<Var> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        space.post(IntSetDom::new(self.variable, self.values))
    }
}

impl<Var: IntegerVariable + 'static> ReifiableConstraint for Member<Var> {
    fn reify(
        self,
        space: &mut Space,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        space.post(ReIntSet::new(self.variable, self.values, reification_literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::IntRelation;
    use crate::constraints::bool_rel;

    #[test]
    fn reified_membership_rewrites_once_decided() {
        let mut space = Space::new();
        let x = space.new_int_var(0, 9).expect("valid bounds");
        let b = space.new_bool_var();

        space
            .add_constraint(member(x, [1, 3, 5]))
            .reify(b)
            .expect("membership is undecided");
        assert_eq!(space.num_propagators(), 1);

        space
            .add_constraint(bool_rel(b, IntRelation::Equal, 1))
            .post()
            .expect("x can be a member");

        assert_eq!(space.lower_bound(&x), 1);
        assert_eq!(space.upper_bound(&x), 5);
        assert_eq!(space.num_propagators(), 0);
    }
}

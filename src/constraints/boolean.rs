use super::Constraint;
use super::ReifiableConstraint;
use crate::basic_types::IntRelation;
use crate::basic_types::IntSet;
use crate::propagators::boolean::BinaryOrTrue;
use crate::propagators::boolean::BoolEq;
use crate::propagators::boolean::BoolLq;
use crate::propagators::boolean::NaryOr;
use crate::propagators::boolean::NaryOrTrue;
use crate::propagators::boolean::TernaryOr;
use crate::propagators::int_set_dom::IntSetDom;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`Constraint`] `a = b`.
pub fn bool_eq(a: Literal, b: Literal) -> impl Constraint {
    BoolEq::new(a, b)
}

/// Creates the [`Constraint`] `a != b`.
pub fn bool_not_eq(a: Literal, b: Literal) -> impl Constraint {
    BoolEq::new(a, !b)
}

/// Creates the [`Constraint`] `a -> b`.
pub fn bool_lq(a: Literal, b: Literal) -> impl Constraint {
    BoolLq::new(a, b)
}

/// Creates the [`Constraint`] `literal ~ value`, where `value` must be 0 or 1.
pub fn bool_rel(literal: Literal, relation: IntRelation, value: i32) -> impl Constraint {
    BoolRel {
        literal,
        relation,
        value,
    }
}

/// Creates the [`ReifiableConstraint`] `\/ literal`
///
/// Its reified form `r <-> \/ literal` is the `or` of the literals.
pub fn clause(literals: impl Into<Vec<Literal>>) -> impl ReifiableConstraint {
    Clause(literals.into())
}

/// Creates the [`ReifiableConstraint`] `/\ literal`
pub fn conjunction(literals: impl Into<Vec<Literal>>) -> impl ReifiableConstraint {
    Conjunction(literals.into())
}

/// Creates the [`Constraint`] `y <-> \/ literal`.
pub fn bool_or(literals: impl Into<Vec<Literal>>, y: Literal) -> impl Constraint {
    Reified {
        constraint: Clause(literals.into()),
        literal: y,
    }
}

/// Creates the [`Constraint`] `y <-> /\ literal`.
pub fn bool_and(literals: impl Into<Vec<Literal>>, y: Literal) -> impl Constraint {
    Reified {
        constraint: Conjunction(literals.into()),
        literal: y,
    }
}

/// Creates the [`Constraint`] `y <-> (a -> b)`.
pub fn bool_imp(a: Literal, b: Literal, y: Literal) -> impl Constraint {
    TernaryOr::new(!a, b, y)
}

struct BoolRel {
    literal: Literal,
    relation: IntRelation,
    value: i32,
}

impl Constraint for BoolRel {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        if self.value != 0 && self.value != 1 {
            return Err(ConstraintOperationError::NotZeroOne(self.value));
        }

        let allowed = [0, 1]
            .into_iter()
            .filter(|&truth| self.relation.holds(truth, self.value));

        space.post(IntSetDom::new(self.literal, IntSet::from_values(allowed)))
    }
}

struct Clause(Vec<Literal>);

impl Constraint for Clause {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        match self.0.len() {
            0 => {
                space.fail();
                Err(ConstraintOperationError::InfeasiblePropagator)
            }
            1 => space.post(IntSetDom::new(self.0[0], IntSet::interval(1, 1))),
            2 => space.post(BinaryOrTrue::new(self.0[0], self.0[1])),
            _ => space.post(NaryOrTrue::new(self.0.into())),
        }
    }
}

impl ReifiableConstraint for Clause {
    fn reify(
        self,
        space: &mut Space,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        match self.0.len() {
            0 => space.post(IntSetDom::new(reification_literal, IntSet::interval(0, 0))),
            1 => space.post(BoolEq::new(self.0[0], reification_literal)),
            2 => space.post(TernaryOr::new(self.0[0], self.0[1], reification_literal)),
            _ => space.post(NaryOr::new(self.0.into(), reification_literal)),
        }
    }
}

struct Conjunction(Vec<Literal>);

impl Constraint for Conjunction {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        self.0
            .into_iter()
            .try_for_each(|literal| space.post(IntSetDom::new(literal, IntSet::interval(1, 1))))
    }
}

impl ReifiableConstraint for Conjunction {
    fn reify(
        self,
        space: &mut Space,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        // r <-> /\ x  is  !r <-> \/ !x
        Clause(self.0.into_iter().map(|literal| !literal).collect())
            .reify(space, !reification_literal)
    }
}

struct Reified<C> {
    constraint: C,
    literal: Literal,
}

impl<C: ReifiableConstraint> Constraint for Reified<C> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        self.constraint.reify(space, self.literal)
    }
}

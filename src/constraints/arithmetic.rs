use super::Constraint;
use crate::basic_types::check_int_value;
use crate::basic_types::IntRelation;
use crate::propagators::arithmetic::Equal;
use crate::propagators::arithmetic::LessOrEqual;
use crate::propagators::arithmetic::LinearLessOrEqual;
use crate::propagators::arithmetic::NotEqual;
use crate::variables::IntegerVariable;
use crate::variables::TransformableVariable;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`Constraint`] `lhs <= rhs`.
pub fn less_than_or_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: impl IntegerVariable + 'static,
) -> impl Constraint {
    LessOrEqual::new(lhs, rhs)
}

/// Creates the [`Constraint`] `lhs < rhs`.
pub fn less_than<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: impl IntegerVariable + 'static,
) -> impl Constraint {
    LessOrEqual::new(lhs, rhs.offset(-1))
}

/// Creates the [`Constraint`] `lhs = rhs`, propagated to domain consistency.
pub fn equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: impl IntegerVariable + 'static,
) -> impl Constraint {
    Equal::new(lhs, rhs)
}

/// Creates the [`Constraint`] `lhs != rhs`.
pub fn not_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: impl IntegerVariable + 'static,
) -> impl Constraint {
    NotEqual::new(lhs, rhs)
}

/// Creates the [`Constraint`] `lhs ~ rhs` for any [`IntRelation`] `~`.
pub fn int_rel<Lhs, Rhs>(lhs: Lhs, relation: IntRelation, rhs: Rhs) -> impl Constraint
where
    Lhs: IntegerVariable + 'static,
    Rhs: IntegerVariable + 'static,
{
    IntRel { lhs, relation, rhs }
}

/// Creates the [`Constraint`] `\sum terms_i <= rhs`.
pub fn linear_less_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearLessOrEqual::new(terms.into(), rhs)
}

/// Creates the [`Constraint`] `\sum terms_i = rhs`.
pub fn linear_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    Linear {
        weights: None,
        terms: terms.into(),
        relation: IntRelation::Equal,
        rhs: rhs as i64,
    }
}

/// Creates the [`Constraint`] `\sum weights_i * variables_i ~ rhs`. The disequality is not
/// supported.
pub fn linear<Var: IntegerVariable + 'static>(
    weights: impl Into<Vec<i32>>,
    variables: impl Into<Box<[Var]>>,
    relation: IntRelation,
    rhs: i64,
) -> impl Constraint {
    Linear {
        weights: Some(weights.into()),
        terms: variables.into(),
        relation,
        rhs,
    }
}

struct IntRel<Lhs, Rhs> {
    lhs: Lhs,
    relation: IntRelation,
    rhs: Rhs,
}

impl<Lhs, Rhs> Constraint for IntRel<Lhs, Rhs>
where
    Lhs: IntegerVariable + 'static,
    Rhs: IntegerVariable + 'static,
{
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        let IntRel { lhs, relation, rhs } = self;

        match relation {
            IntRelation::Equal => space.post(Equal::new(lhs, rhs)),
            IntRelation::NotEqual => space.post(NotEqual::new(lhs, rhs)),
            IntRelation::LessOrEqual => space.post(LessOrEqual::new(lhs, rhs)),
            IntRelation::Less => space.post(LessOrEqual::new(lhs, rhs.offset(-1))),
            IntRelation::GreaterOrEqual => space.post(LessOrEqual::new(rhs, lhs)),
            IntRelation::Greater => space.post(LessOrEqual::new(rhs, lhs.offset(-1))),
        }
    }
}

struct Linear<Var> {
    weights: Option<Vec<i32>>,
    terms: Box<[Var]>,
    relation: IntRelation,
    rhs: i64,
}

impl<Var: IntegerVariable + 'static> Constraint for Linear<Var> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        let weights = match self.weights {
            Some(weights) if weights.len() != self.terms.len() => {
                return Err(ConstraintOperationError::ArgumentSizeMismatch {
                    expected: self.terms.len(),
                    actual: weights.len(),
                });
            }
            Some(weights) => weights,
            None => vec![1; self.terms.len()],
        };

        // Every scaled term, and the bounds of their sum, must stay within the value limits.
        let mut sum_min = 0_i64;
        let mut sum_max = 0_i64;
        for (term, &weight) in self.terms.iter().zip(&weights) {
            let weight = check_int_value(weight as i64)? as i64;
            let at_lower = check_int_value(weight * space.lower_bound(term) as i64)? as i64;
            let at_upper = check_int_value(weight * space.upper_bound(term) as i64)? as i64;

            sum_min += at_lower.min(at_upper);
            sum_max += at_lower.max(at_upper);
        }
        let _ = check_int_value(sum_min)?;
        let _ = check_int_value(sum_max)?;

        // A zero weight does not contribute to the sum, and cannot be expressed as a view.
        let scaled = |sign: i32| {
            self.terms
                .iter()
                .zip(&weights)
                .filter(|(_, &weight)| weight != 0)
                .map(|(term, &weight)| term.scaled(sign * weight))
                .collect::<Box<[_]>>()
        };

        // Strict relations are tightened by one, so every case is a conjunction of `<=`.
        let (upper, lower) = match self.relation {
            IntRelation::Equal => (Some(self.rhs), Some(self.rhs)),
            IntRelation::LessOrEqual => (Some(self.rhs), None),
            IntRelation::Less => (Some(self.rhs - 1), None),
            IntRelation::GreaterOrEqual => (None, Some(self.rhs)),
            IntRelation::Greater => (None, Some(self.rhs + 1)),
            IntRelation::NotEqual => {
                return Err(ConstraintOperationError::UnsupportedRelation(self.relation))
            }
        };

        if let Some(upper) = upper {
            let upper = check_int_value(upper)?;
            space.post(LinearLessOrEqual::new(scaled(1), upper))?;
        }

        if let Some(lower) = lower {
            let lower = check_int_value(lower)?;
            space.post(LinearLessOrEqual::new(scaled(-1), -lower))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_relation_through_an_offset_view() {
        let mut space = Space::new();
        let x = space.new_int_var(0, 10).expect("valid bounds");
        let y = space.new_int_var(0, 5).expect("valid bounds");

        space
            .add_constraint(int_rel(x, IntRelation::Greater, y))
            .post()
            .expect("x can exceed y");

        assert_eq!(space.lower_bound(&x), 1);
    }

    #[test]
    fn weights_must_match_the_variables() {
        let mut space = Space::new();
        let x = space.new_int_var(0, 10).expect("valid bounds");
        let y = space.new_int_var(0, 5).expect("valid bounds");

        let result = space
            .add_constraint(linear(vec![1, 2, 3], vec![x, y], IntRelation::LessOrEqual, 4))
            .post();

        assert_eq!(
            result,
            Err(ConstraintOperationError::ArgumentSizeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn scaled_terms_must_stay_within_the_limits() {
        let mut space = Space::new();
        let x = space.new_int_var(0, 1_000_000_000).expect("valid bounds");
        let y = space.new_int_var(0, 600_000_000).expect("valid bounds");
        let z = space.new_int_var(0, 10).expect("valid bounds");

        let result = space
            .add_constraint(linear(vec![3], vec![x], IntRelation::LessOrEqual, 5))
            .post();
        assert_eq!(
            result,
            Err(ConstraintOperationError::ValueOutOfLimits(3_000_000_000))
        );

        let result = space
            .add_constraint(linear(vec![i32::MIN], vec![z], IntRelation::LessOrEqual, 5))
            .post();
        assert_eq!(
            result,
            Err(ConstraintOperationError::ValueOutOfLimits(i32::MIN as i64))
        );

        let result = space
            .add_constraint(linear(vec![1, 1], vec![y, y], IntRelation::LessOrEqual, 5))
            .post();
        assert_eq!(
            result,
            Err(ConstraintOperationError::ValueOutOfLimits(1_200_000_000))
        );

        assert!(!space.is_failed());
        assert_eq!(space.upper_bound(&x), 1_000_000_000);
    }

    #[test]
    fn weighted_sum_bounds_each_term() {
        let mut space = Space::new();
        let x = space.new_int_var(0, 10).expect("valid bounds");
        let y = space.new_int_var(0, 10).expect("valid bounds");

        space
            .add_constraint(linear(vec![2, 3], vec![x, y], IntRelation::Equal, 12))
            .post()
            .expect("2x + 3y = 12 has solutions");

        assert_eq!(space.upper_bound(&x), 6);
        assert_eq!(space.upper_bound(&y), 4);
    }

    #[test]
    fn disequality_is_rejected_for_sums() {
        let mut space = Space::new();
        let x = space.new_int_var(0, 10).expect("valid bounds");

        let result = space
            .add_constraint(linear(vec![1], vec![x], IntRelation::NotEqual, 4))
            .post();

        assert_eq!(
            result,
            Err(ConstraintOperationError::UnsupportedRelation(
                IntRelation::NotEqual
            ))
        );
    }
}

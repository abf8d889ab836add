use super::Constraint;
use crate::basic_types::check_int_value;
use crate::basic_types::IntRelation;
use crate::propagators::count::Count;
use crate::variables::IntegerVariable;
use crate::variables::TransformableVariable;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`Constraint`] `#{i | variables_i = value} ~ total`.
pub fn count<Var, Total>(
    variables: impl Into<Box<[Var]>>,
    value: i64,
    relation: IntRelation,
    total: Total,
) -> impl Constraint
where
    Var: IntegerVariable + 'static,
    Total: IntegerVariable + 'static,
{
    CountConstraint {
        variables: variables.into(),
        value,
        relation,
        total,
    }
}

struct CountConstraint<Var, Total> {
    variables: Box<[Var]>,
    value: i64,
    relation: IntRelation,
    total: Total,
}

impl<Var, Total> Constraint for CountConstraint<Var, Total>
where
    Var: IntegerVariable + 'static,
    Total: IntegerVariable + 'static,
{
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        let value = check_int_value(self.value)?;

        // `# < m` is `# <= m - 1` and `# > m` is `# >= m + 1`.
        let (relation, offset) = match self.relation {
            IntRelation::Less => (IntRelation::LessOrEqual, -1),
            IntRelation::Greater => (IntRelation::GreaterOrEqual, 1),
            relation => (relation, 0),
        };

        space.post(Count::new(
            self.variables,
            value,
            relation,
            self.total.offset(offset),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_upper_bound_on_the_occurrences() {
        let mut space = Space::new();
        let variables = vec![
            space.new_int_var(1, 1).expect("valid bounds"),
            space.new_int_var(0, 2).expect("valid bounds"),
        ];

        space
            .add_constraint(count(variables.clone(), 1, IntRelation::Less, 2))
            .post()
            .expect("one occurrence is allowed");

        assert_eq!(space.lower_bound(&variables[1]), 0);
        assert!(!space.assignments().get_domain(variables[1]).contains(1));
    }
}

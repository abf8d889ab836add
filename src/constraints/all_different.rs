use super::Constraint;
use crate::basic_types::HashSet;
use crate::propagators::all_different::AllDifferent;
use crate::variables::IntegerVariable;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct. The
/// variables must be distinct views.
pub fn all_different<Var: IntegerVariable + 'static>(
    variables: impl Into<Box<[Var]>>,
) -> impl Constraint {
    AllDifferentConstraint(variables.into())
}

struct AllDifferentConstraint<Var>(Box<[Var]>);

impl<Var: IntegerVariable + 'static> Constraint for AllDifferentConstraint<Var> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        let mut seen: HashSet<&Var> = HashSet::default();
        if !self.0.iter().all(|variable| seen.insert(variable)) {
            return Err(ConstraintOperationError::DuplicateViews);
        }

        space.post(AllDifferent::new(self.0))
    }
}

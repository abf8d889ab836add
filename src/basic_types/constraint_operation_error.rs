use thiserror::Error;

/// Errors reported when posting constraints or creating variables.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the constraint failed because the space is already failed")]
    InfeasibleState,
    #[error("Adding the propagator failed because it detected an inconsistency")]
    InfeasiblePropagator,
    #[error("Expected {expected} arguments, but {actual} were given")]
    ArgumentSizeMismatch { expected: usize, actual: usize },
    #[error("The value {0} lies outside of the supported range")]
    ValueOutOfLimits(i64),
    #[error("Expected 0 or 1 but got {0}")]
    NotZeroOne(i32),
    #[error("A variable cannot be created with an empty domain")]
    EmptyDomainCreation,
    #[error("The propagator requires pairwise distinct variables")]
    DuplicateViews,
    #[error("The relation {0} is not supported by this constraint")]
    UnsupportedRelation(crate::basic_types::IntRelation),
}

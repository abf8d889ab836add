//! Defines the constraints that marrow provides out of the box which can be added to a
//! [`Space`].
//!
//! A constraint is a relation over variables. A [`Space`] only knows propagators; the functions
//! in this module validate their arguments and decide which propagators implement the relation.
//! Constraints are added through a [`ConstraintPoster`]:
//! ```rust
//! # use marrow::constraints;
//! # use marrow::Space;
//! let mut space = Space::new();
//!
//! let a = space.new_int_var(0, 3).unwrap();
//! let b = space.new_int_var(0, 3).unwrap();
//!
//! space
//!     .add_constraint(constraints::less_than(a, b))
//!     .post()
//!     .expect("the space is consistent");
//!
//! assert_eq!(space.upper_bound(&a), 2);
//! assert_eq!(space.lower_bound(&b), 1);
//! ```
//!
//! A constraint which fails immediately leaves the space failed:
//! ```rust
//! # use marrow::constraints;
//! # use marrow::ConstraintOperationError;
//! # use marrow::Space;
//! let mut space = Space::new();
//! let x = space.new_int_var(5, 9).unwrap();
//!
//! let result = space
//!     .add_constraint(constraints::member(x, [1, 2, 3]))
//!     .post();
//!
//! assert_eq!(result, Err(ConstraintOperationError::InfeasiblePropagator));
//! assert!(space.is_failed());
//! ```
mod all_different;
mod arithmetic;
mod boolean;
mod constraint_poster;
mod count;
mod domain;
mod element;
mod set;

pub use all_different::*;
pub use arithmetic::*;
pub use boolean::*;
pub use constraint_poster::*;
pub use count::*;
pub use domain::*;
pub use element::*;
pub use set::*;

use crate::engine::cp::propagation::Propagator;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Space;

/// A [`Constraint`] is a relation over variables.
pub trait Constraint {
    /// Post the constraint to the space.
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: Propagator + 'static,
{
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        space.post(self)
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(space))
    }
}

/// A [`Constraint`] with a reified form `r <-> Self`.
pub trait ReifiableConstraint: Constraint {
    /// Post the reified version of the constraint to the space. I.e. post the constraint
    /// `r <-> Self` where `r` is a reification literal.
    fn reify(
        self,
        space: &mut Space,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError>;
}

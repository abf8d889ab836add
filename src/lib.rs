//! A propagation kernel for finite-domain constraint programming.
//!
//! Problems are modelled in a [`Space`]: variables are created with range-list domains,
//! [`constraints`] post propagators over views of those variables, and [`branching`] describes
//! how the search tree is shaped. The engines in [`search`] explore that tree by copying and
//! recomputing spaces.
//!
//! ```rust
//! # use marrow::Space;
//! # use marrow::branching::InputOrder;
//! # use marrow::branching::InDomainMin;
//! # use marrow::branching::ViewValBrancher;
//! # use marrow::constraints;
//! # use marrow::search::solve_all;
//! # use marrow::search::SearchOptions;
//! let mut space = Space::new();
//! let x = space.new_int_var(1, 3).unwrap();
//! let y = space.new_int_var(1, 3).unwrap();
//!
//! space
//!     .add_constraint(constraints::not_equals(x, y))
//!     .post()
//!     .expect("x and y can differ");
//! let _ = space.add_brancher(ViewValBrancher::new(vec![x, y], InputOrder, InDomainMin));
//!
//! let summary = solve_all(space, SearchOptions::default());
//! assert_eq!(summary.solutions.len(), 6);
//! ```
pub mod asserts;
pub mod basic_types;
pub mod branching;
pub mod constraints;
pub mod containers;
pub mod engine;
mod math;
pub(crate) mod propagators;
pub mod runner;
pub mod search;
pub mod statistics;

#[cfg(test)]
mod tests;

pub use basic_types::ConstraintOperationError;
pub use basic_types::IntRelation;
pub use basic_types::IntSet;
pub use basic_types::RangeList;
pub use basic_types::Solution;
pub use engine::cp::propagation;
pub use engine::termination;
pub use engine::variables;
pub use engine::PropagationOutcome;
pub use engine::Space;
pub use engine::SpaceStatus;

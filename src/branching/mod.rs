//! Contains the branchers which describe the shape of the search tree.
//!
//! A [`Brancher`] is added to a [`Space`](crate::Space); when propagation reaches a fixpoint and
//! the space is not solved, the first brancher with work left produces a [`Choice`] with (usually
//! two) alternatives, which the search engines commit one after the other on copies of the space.
//!
//! The integer brancher [`ViewValBrancher`] is assembled from a [`VariableSelector`] and a
//! [`ValueSelector`]:
//! ```rust
//! # use marrow::Space;
//! # use marrow::branching::ViewValBrancher;
//! # use marrow::branching::FirstFail;
//! # use marrow::branching::InDomainMin;
//! let mut space = Space::new();
//! let variables = vec![
//!     space.new_int_var(0, 5).unwrap(),
//!     space.new_int_var(2, 3).unwrap(),
//! ];
//! let _ = space.add_brancher(ViewValBrancher::new(variables, FirstFail, InDomainMin));
//! ```

mod brancher;
mod set_brancher;
pub mod value_selection;
pub mod variable_selection;
mod view_val_brancher;

pub use brancher::Brancher;
pub use brancher::BrancherId;
pub use brancher::Choice;
pub use set_brancher::SetBrancher;
pub use set_brancher::SetValueSelection;
pub use value_selection::*;
pub use variable_selection::*;
pub use view_val_brancher::val_one_zero;
pub use view_val_brancher::val_zero_one;
pub use view_val_brancher::ViewValBrancher;

//! Provides the [`VariableSelector`] trait which is required
//! for variable selectors to implement; the main method in this trait relies on
//! [`VariableSelector::select_variable`].
//!
//! Furthermore, it defines several implementations of the [`VariableSelector`] trait such as
//! [`InputOrder`] and [`FirstFail`]. Any [`VariableSelector`] should only select variables which
//! have a domain of size 2 or larger.

mod anti_first_fail;
mod first_fail;
mod input_order;
mod largest;
mod smallest;
mod variable_selector;

pub use anti_first_fail::AntiFirstFail;
pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use largest::Largest;
pub use smallest::Smallest;
pub use variable_selector::VariableSelector;

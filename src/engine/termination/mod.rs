//! Conditions which stop a search before it is exhausted.
//!
//! The search engines poll their [`TerminationCondition`] at every node transition. A triggered
//! condition suspends the search: the engine reports that it stopped, and can be resumed by
//! calling it again once the condition no longer holds.
mod combinator;
mod indefinite;
mod memory_budget;
mod node_budget;
mod os_signal;
mod time_budget;

use std::fmt::Debug;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use memory_budget::MemoryBudget;
pub use node_budget::FailBudget;
pub use node_budget::NodeBudget;
pub use os_signal::OsSignal;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines
/// when the search should give up.
pub trait TerminationCondition: Debug + Send {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called whenever the search explored a node.
    fn node_has_been_explored(&mut self) {}

    /// Called whenever the search ran into a failed space.
    fn failure_has_been_found(&mut self) {}

    /// Called with the estimated number of bytes held by the live spaces of the search.
    fn memory_in_use(&mut self, _bytes: usize) {}
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for Box<T> {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn node_has_been_explored(&mut self) {
        (**self).node_has_been_explored()
    }

    fn failure_has_been_found(&mut self) {
        (**self).failure_has_been_found()
    }

    fn memory_in_use(&mut self, bytes: usize) {
        (**self).memory_in_use(bytes)
    }
}

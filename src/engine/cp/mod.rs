//! The propagation kernel: domains, events, subscriptions and the scheduler.
mod assignments;
pub mod domain_events;
mod event_sink;
pub mod propagation;
mod propagator_queue;
mod region;
mod set_domain;
pub(crate) mod watch_list_cp;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use assignments::ModEvent;
pub(crate) use event_sink::EventSink;
pub(crate) use propagator_queue::PropagatorQueue;
pub use region::Region;
pub(crate) use set_domain::SetDomain;
pub(crate) use watch_list_cp::WatchListCP;
pub use watch_list_cp::Watchers;

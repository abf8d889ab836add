//! Contains the main building blocks for propagators.
//!
//! A propagator implements the [`Propagator`] trait. When it is posted, the space calls
//! [`Propagator::initialise`] with a [`PropagatorInitialisationContext`] through which the
//! propagator subscribes to events of its views, either directly or through its advisor. After
//! that, the space calls [`Propagator::propagate`] whenever a subscribed event happened (or an
//! advisor asked for it), passing a [`PropagationContextMut`] through which domains are read and
//! narrowed.
//!
//! Propagators are written against the [`IntegerVariable`](crate::variables::IntegerVariable) and
//! [`SetVariable`](crate::variables::SetVariable) traits, so a single implementation serves plain
//! variables as well as views on them: a disjunction over negated literals is a conjunction.
mod local_id;
mod propagation_context;
mod propagator;
mod propagator_id;
mod propagator_initialisation_context;
mod propagator_store;
mod propagator_var_id;

pub use super::domain_events::Delta;
pub use super::domain_events::DomainEvents;
pub use super::domain_events::IntDomainEvent;
pub use super::domain_events::SetDomainEvent;
pub use super::Assignments;
pub use super::EmptyDomain;
pub use super::ModEvent;
pub use super::Region;
pub use local_id::LocalId;
pub use propagation_context::HasAssignments;
pub use propagation_context::PropagationContext;
pub use propagation_context::PropagationContextMut;
pub use propagation_context::ReadDomains;
pub use propagator::EnqueueDecision;
pub use propagator::Propagator;
pub use propagator::PropagatorCost;
pub use propagator_id::PropagatorId;
pub use propagator_initialisation_context::PropagatorInitialisationContext;
pub(crate) use propagator_store::PropagatorStore;
pub(crate) use propagator_var_id::PropagatorVarId;

use dyn_clone::DynClone;
use enumset::EnumSet;

use super::LocalId;
use super::PropagatorInitialisationContext;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::basic_types::PropagatorStatus;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::domain_events::SetDomainEvent;
use crate::engine::cp::propagation::propagation_context::PropagationContext;
use crate::engine::cp::propagation::propagation_context::PropagationContextMut;
#[cfg(doc)]
use crate::engine::Space;

/// All propagators implement the [`Propagator`] trait. Structs implementing the trait define the
/// main propagator logic: which views they subscribe to, how they narrow domains, and when they
/// are entailed.
///
/// The required functions are [`Propagator::name`], [`Propagator::initialise`] and
/// [`Propagator::propagate`]; all other functions have default implementations.
///
/// Propagators are copied together with the space they live in, through [`Clone`]. Large constant
/// data should therefore be kept behind a reference count (for example
/// [`SharedArray`](crate::basic_types::SharedArray) or [`IntSet`](crate::basic_types::IntSet)),
/// so that copies share it.
pub trait Propagator: DynClone + Send {
    /// Return the name of the propagator, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// The cost class the propagator is scheduled in. It may change as the views get fixed.
    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Generic
    }

    /// Initialises the propagator without performing propagation. This method is called only once
    /// by the [`Space`] when the propagator is posted.
    ///
    /// The method registers the views of the propagator (see
    /// [`PropagatorInitialisationContext::register`] and
    /// [`PropagatorInitialisationContext::register_advisor`]), and can detect trivial
    /// inconsistencies. Propagation itself happens in [`Propagator::propagate`], which the space
    /// calls directly after posting.
    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency>;

    /// Narrow the domains of the views of the propagator.
    ///
    /// The outcome is one of:
    /// - [`PropagatorStatus::Fix`]: the propagator is at a fixpoint and is not scheduled for the
    ///   changes it made itself;
    /// - [`PropagatorStatus::NoFix`]: its own changes may enable further narrowing, so it is
    ///   scheduled again when they match its subscriptions;
    /// - [`PropagatorStatus::Subsumed`]: the constraint holds for every remaining assignment and
    ///   the propagator is disposed (possibly after asking to be rewritten, see
    ///   [`PropagationContextMut::rewrite`]);
    /// - an [`Inconsistency`], which fails the space.
    ///
    /// Running a propagator which has not been notified since it reported `Fix` must not change
    /// any domain.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Called for every change of an integer view registered with
    /// [`PropagatorInitialisationContext::register_advisor`]. `events` and `delta` describe the
    /// change of the underlying domain; translate them with
    /// [`IntegerVariable::unpack_event`](crate::variables::IntegerVariable::unpack_event) and
    /// [`IntegerVariable::unpack_delta`](crate::variables::IntegerVariable::unpack_delta) to see
    /// them through the view. The answer decides whether the propagator is scheduled.
    fn advise(
        &mut self,
        _context: PropagationContext,
        _local_id: LocalId,
        _events: EnumSet<IntDomainEvent>,
        _delta: Delta,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// As [`Propagator::advise`], for set views registered with
    /// [`PropagatorInitialisationContext::register_set_advisor`].
    fn advise_set(
        &mut self,
        _context: PropagationContext,
        _local_id: LocalId,
        _events: EnumSet<SetDomainEvent>,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Release the resources of the propagator when it is removed from a space, and report how
    /// many bytes were reclaimed.
    fn dispose(&mut self) -> usize {
        std::mem::size_of_val(self)
    }
}

dyn_clone::clone_trait_object!(Propagator);

/// Whether an advisor wants its propagator to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    Enqueue,
    Skip,
}

/// An estimate of how expensive a single invocation of a propagator is. Cheaper propagators are
/// run first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropagatorCost {
    Unary = 0,
    Binary,
    Ternary,
    Linear,
    Quadratic,
    Cubic,
    Generic,
}

impl PropagatorCost {
    pub(crate) const NUM_CLASSES: usize = 7;

    /// The cost of a propagator which does a constant amount of work per view.
    pub fn for_arity(num_views: usize) -> PropagatorCost {
        match num_views {
            0 | 1 => PropagatorCost::Unary,
            2 => PropagatorCost::Binary,
            3 => PropagatorCost::Ternary,
            _ => PropagatorCost::Linear,
        }
    }
}

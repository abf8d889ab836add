use super::PropagationContext;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
#[cfg(doc)]
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorVarId;
use crate::engine::cp::watch_list_cp::SubscriptionKind;
use crate::engine::cp::Assignments;
use crate::engine::cp::WatchListCP;
use crate::engine::cp::Watchers;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVariable;

/// [`PropagatorInitialisationContext`] is used when [`Propagator`]s are initialised after creation.
///
/// It represents a communication point between the space and the [`Propagator`].
/// Propagators use the [`PropagatorInitialisationContext`] to subscribe to domain changes
/// of their views and to retrieve the current domains of those views.
#[derive(Debug)]
pub struct PropagatorInitialisationContext<'a> {
    watch_list: &'a mut WatchListCP,
    propagator_id: PropagatorId,
    next_local_id: LocalId,

    context: PropagationContext<'a>,
}

impl PropagatorInitialisationContext<'_> {
    pub(crate) fn new<'a>(
        watch_list: &'a mut WatchListCP,
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
    ) -> PropagatorInitialisationContext<'a> {
        PropagatorInitialisationContext {
            watch_list,
            propagator_id,
            next_local_id: LocalId::from(0),

            context: PropagationContext::new(assignments),
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of `var`. Whenever one of the
    /// events happens, the propagator is scheduled.
    ///
    /// The [`LocalId`] is internal information related to the propagator. Each view *must* have
    /// a unique [`LocalId`]; most often it is the index of the view in the internal array of
    /// views.
    pub fn register<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        self.watch_int(&var, domain_events, local_id, SubscriptionKind::Propagator);
        var
    }

    /// Subscribes the advisor of the propagator to the given [`DomainEvents`] of `var`. Whenever
    /// one of the events happens, [`Propagator::advise`] is called with `local_id`, and its
    /// answer decides whether the propagator is scheduled.
    pub fn register_advisor<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        self.watch_int(&var, domain_events, local_id, SubscriptionKind::Advisor);
        var
    }

    pub fn register_set<Var: SetVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        self.watch_set(&var, domain_events, local_id, SubscriptionKind::Propagator);
        var
    }

    pub fn register_set_advisor<Var: SetVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        self.watch_set(&var, domain_events, local_id, SubscriptionKind::Advisor);
        var
    }

    pub fn get_next_local_id(&self) -> LocalId {
        self.next_local_id
    }

    fn watch_int<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        domain_events: DomainEvents,
        local_id: LocalId,
        kind: SubscriptionKind,
    ) {
        let mut watchers = Watchers::new(self.propagator_var(local_id), kind, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_int_events());
    }

    fn watch_set<Var: SetVariable>(
        &mut self,
        var: &Var,
        domain_events: DomainEvents,
        local_id: LocalId,
        kind: SubscriptionKind,
    ) {
        let mut watchers = Watchers::new(self.propagator_var(local_id), kind, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_set_events());
    }

    fn propagator_var(&mut self, local_id: LocalId) -> PropagatorVarId {
        self.next_local_id = self.next_local_id.max(LocalId::from(local_id.unpack() + 1));

        PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        }
    }
}

mod private {
    use super::*;
    use crate::engine::cp::propagation::propagation_context::HasAssignments;

    impl HasAssignments for PropagatorInitialisationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.context.assignments()
        }
    }
}

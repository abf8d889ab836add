use enumset::EnumSet;

use super::domain_events::IntDomainEvent;
use super::domain_events::SetDomainEvent;
use crate::containers::KeyedVec;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorVarId;
use crate::engine::variables::DomainId;
use crate::engine::variables::SetDomainId;

/// Who is told about an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SubscriptionKind {
    /// The propagator is scheduled.
    Propagator,
    /// The advisor of the propagator is run, and decides whether the propagator is scheduled.
    Advisor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Subscription {
    pub(crate) propagator_var: PropagatorVarId,
    pub(crate) kind: SubscriptionKind,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct IntWatch {
    pub(crate) subscription: Subscription,
    pub(crate) events: EnumSet<IntDomainEvent>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SetWatch {
    pub(crate) subscription: Subscription,
    pub(crate) events: EnumSet<SetDomainEvent>,
}

/// For every variable, the subscriptions of the propagators and advisors which depend on it.
///
/// Subscriptions of disposed propagators are not removed eagerly; the engine skips them while
/// dispatching and [`WatchListCP::prune`] drops them when a space is copied.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchListCP {
    int_watchers: KeyedVec<DomainId, Vec<IntWatch>>,
    set_watchers: KeyedVec<SetDomainId, Vec<SetWatch>>,
}

impl WatchListCP {
    pub(crate) fn grow_int(&mut self, domain: DomainId) {
        self.int_watchers.accommodate(domain, Vec::new());
    }

    pub(crate) fn grow_set(&mut self, domain: SetDomainId) {
        self.set_watchers.accommodate(domain, Vec::new());
    }

    pub(crate) fn get_int_watchers(&self, domain: DomainId) -> &[IntWatch] {
        self.int_watchers
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn get_set_watchers(&self, domain: SetDomainId) -> &[SetWatch] {
        self.set_watchers
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The number of live subscriptions; used for memory estimates.
    pub(crate) fn num_subscriptions(&self) -> usize {
        self.int_watchers.iter().map(Vec::len).sum::<usize>()
            + self.set_watchers.iter().map(Vec::len).sum::<usize>()
    }

    /// Drop every subscription of a propagator for which `is_alive` returns false.
    pub(crate) fn prune(&mut self, is_alive: impl Fn(PropagatorId) -> bool) {
        for watchers in self.int_watchers.iter_mut() {
            watchers.retain(|watch| is_alive(watch.subscription.propagator_var.propagator));
        }

        for watchers in self.set_watchers.iter_mut() {
            watchers.retain(|watch| is_alive(watch.subscription.propagator_var.propagator));
        }
    }

    fn watch_int(&mut self, domain: DomainId, watch: IntWatch) {
        self.grow_int(domain);

        let watchers = &mut self.int_watchers[domain];
        match watchers
            .iter_mut()
            .find(|existing| existing.subscription == watch.subscription)
        {
            Some(existing) => existing.events |= watch.events,
            None => watchers.push(watch),
        }
    }

    fn watch_set(&mut self, domain: SetDomainId, watch: SetWatch) {
        self.grow_set(domain);

        let watchers = &mut self.set_watchers[domain];
        match watchers
            .iter_mut()
            .find(|existing| existing.subscription == watch.subscription)
        {
            Some(existing) => existing.events |= watch.events,
            None => watchers.push(watch),
        }
    }
}

/// Handed to a view so it can subscribe its underlying domain on behalf of a propagator. Views
/// translate the requested events (an affine view with a negative scale watches the upper bound
/// when asked for the lower bound) before calling into the watch list.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    kind: SubscriptionKind,
    watch_list: &'a mut WatchListCP,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(
        propagator_var: PropagatorVarId,
        kind: SubscriptionKind,
        watch_list: &'a mut WatchListCP,
    ) -> Self {
        Watchers {
            propagator_var,
            kind,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<IntDomainEvent>) {
        if events.is_empty() {
            return;
        }

        self.watch_list.watch_int(
            domain,
            IntWatch {
                subscription: self.subscription(),
                events,
            },
        );
    }

    pub(crate) fn watch_all_set(&mut self, domain: SetDomainId, events: EnumSet<SetDomainEvent>) {
        if events.is_empty() {
            return;
        }

        self.watch_list.watch_set(
            domain,
            SetWatch {
                subscription: self.subscription(),
                events,
            },
        );
    }

    fn subscription(&self) -> Subscription {
        Subscription {
            propagator_var: self.propagator_var,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::SubscriptionKind;
    use super::WatchListCP;
    use super::Watchers;
    use crate::engine::cp::domain_events::IntDomainEvent;
    use crate::engine::cp::propagation::LocalId;
    use crate::engine::cp::propagation::PropagatorId;
    use crate::engine::cp::propagation::PropagatorVarId;
    use crate::engine::variables::DomainId;

    fn propagator_var(propagator: u32) -> PropagatorVarId {
        PropagatorVarId {
            propagator: PropagatorId(propagator),
            variable: LocalId::from(0),
        }
    }

    #[test]
    fn repeated_watches_are_merged() {
        let mut watch_list = WatchListCP::default();
        let x = DomainId::new(0);

        let mut watchers =
            Watchers::new(propagator_var(0), SubscriptionKind::Propagator, &mut watch_list);
        watchers.watch_all(x, EnumSet::only(IntDomainEvent::LowerBound));
        watchers.watch_all(x, EnumSet::only(IntDomainEvent::UpperBound));

        let watches = watch_list.get_int_watchers(x);
        assert_eq!(watches.len(), 1);
        assert_eq!(
            watches[0].events,
            IntDomainEvent::LowerBound | IntDomainEvent::UpperBound
        );
    }

    #[test]
    fn pruning_drops_dead_propagators() {
        let mut watch_list = WatchListCP::default();
        let x = DomainId::new(3);

        for propagator in 0..3 {
            let mut watchers = Watchers::new(
                propagator_var(propagator),
                SubscriptionKind::Advisor,
                &mut watch_list,
            );
            watchers.watch_all(x, EnumSet::all());
        }

        watch_list.prune(|propagator| propagator != PropagatorId(1));

        let remaining = watch_list
            .get_int_watchers(x)
            .iter()
            .map(|watch| watch.subscription.propagator_var.propagator)
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec![PropagatorId(0), PropagatorId(2)]);
        assert!(watch_list.get_int_watchers(DomainId::new(7)).is_empty());
    }
}

use enumset::EnumSet;

use super::domain_events::Delta;
use super::domain_events::IntDomainEvent;
use super::domain_events::SetDomainEvent;
use crate::engine::variables::DomainId;
use crate::engine::variables::SetDomainId;

/// Collects the changes made by narrowing operations until the engine hands them to the
/// subscribed propagators and advisors. Every successful narrowing operation records exactly one
/// entry holding all the events it raised.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventSink {
    int_events: Vec<(DomainId, EnumSet<IntDomainEvent>, Delta)>,
    set_events: Vec<(SetDomainId, EnumSet<SetDomainEvent>)>,
}

impl EventSink {
    pub(crate) fn push_int(
        &mut self,
        domain: DomainId,
        events: EnumSet<IntDomainEvent>,
        delta: Delta,
    ) {
        self.int_events.push((domain, events, delta));
    }

    pub(crate) fn push_set(&mut self, domain: SetDomainId, events: EnumSet<SetDomainEvent>) {
        self.set_events.push((domain, events));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.int_events.is_empty() && self.set_events.is_empty()
    }

    pub(crate) fn drain_int(
        &mut self,
    ) -> impl Iterator<Item = (DomainId, EnumSet<IntDomainEvent>, Delta)> + '_ {
        self.int_events.drain(..)
    }

    pub(crate) fn drain_set(
        &mut self,
    ) -> impl Iterator<Item = (SetDomainId, EnumSet<SetDomainEvent>)> + '_ {
        self.set_events.drain(..)
    }

    pub(crate) fn clear(&mut self) {
        self.int_events.clear();
        self.set_events.clear();
    }
}

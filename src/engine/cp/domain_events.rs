use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change to an integer domain, as seen through the variable it happened on.
#[derive(Debug, EnumSetType, Hash)]
pub enum IntDomainEvent {
    /// The domain became a single value.
    Assign,
    /// The smallest value increased.
    LowerBound,
    /// The largest value decreased.
    UpperBound,
    /// At least one value was removed. Every change raises this event.
    Removal,
}

/// A change to a set domain.
#[derive(Debug, EnumSetType, Hash)]
pub enum SetDomainEvent {
    /// The greatest lower bound grew.
    Glb,
    /// The least upper bound shrank.
    Lub,
    /// The cardinality bounds were tightened.
    Card,
    /// The lower and upper bound became equal.
    Assign,
}

/// The events a propagator subscribes to on a single view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    int_events: Option<EnumSet<IntDomainEvent>>,
    set_events: Option<EnumSet<SetDomainEvent>>,
}

impl DomainEvents {
    /// Lower and upper bound changes, but not holes.
    pub const BOUNDS: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        IntDomainEvent::LowerBound | IntDomainEvent::UpperBound
    ));
    /// Any change to an integer domain.
    pub const ANY_INT: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        IntDomainEvent::Assign
            | IntDomainEvent::LowerBound
            | IntDomainEvent::UpperBound
            | IntDomainEvent::Removal
    ));
    pub const LOWER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::UpperBound));
    pub const ASSIGN: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(IntDomainEvent::Assign));

    /// Any change to a set domain.
    pub const ANY_SET: DomainEvents = DomainEvents::create_with_set_events(enum_set!(
        SetDomainEvent::Glb | SetDomainEvent::Lub | SetDomainEvent::Card | SetDomainEvent::Assign
    ));
    pub const GLB: DomainEvents =
        DomainEvents::create_with_set_events(enum_set!(SetDomainEvent::Glb));
    pub const LUB: DomainEvents =
        DomainEvents::create_with_set_events(enum_set!(SetDomainEvent::Lub));
    pub const CARD: DomainEvents =
        DomainEvents::create_with_set_events(enum_set!(SetDomainEvent::Card));
    pub const SET_ASSIGN: DomainEvents =
        DomainEvents::create_with_set_events(enum_set!(SetDomainEvent::Assign));

    pub(crate) const fn create_with_int_events(int_events: EnumSet<IntDomainEvent>) -> DomainEvents {
        DomainEvents {
            int_events: Some(int_events),
            set_events: None,
        }
    }

    pub(crate) const fn create_with_set_events(set_events: EnumSet<SetDomainEvent>) -> DomainEvents {
        DomainEvents {
            int_events: None,
            set_events: Some(set_events),
        }
    }

    pub(crate) fn get_int_events(&self) -> EnumSet<IntDomainEvent> {
        self.int_events
            .expect("tried to retrieve integer events from a set subscription")
    }

    pub(crate) fn get_set_events(&self) -> EnumSet<SetDomainEvent> {
        self.set_events
            .expect("tried to retrieve set events from an integer subscription")
    }
}

/// The values an event may have removed: every removed value lies in `[min, max]`.
///
/// Advisors use the delta to decide cheaply whether a change is relevant to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta {
    pub min: i32,
    pub max: i32,
}

impl Delta {
    pub fn may_contain(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

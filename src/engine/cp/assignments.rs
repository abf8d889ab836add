use enumset::EnumSet;

use super::domain_events::Delta;
use super::domain_events::IntDomainEvent;
use super::domain_events::SetDomainEvent;
use super::event_sink::EventSink;
use super::set_domain::SetDomain;
use crate::basic_types::RangeList;
use crate::basic_types::ValueRange;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::engine::variables::SetDomainId;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

/// Returned by a narrowing operation which would leave a domain without values. The domain itself
/// is left unchanged; the space owning it is failed by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// How much a narrowing operation changed a domain, from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModEvent {
    /// Nothing changed.
    None,
    /// Values were removed, but the bounds stayed the same.
    Domain,
    /// At least one bound changed.
    Bounds,
    /// The domain became a single value.
    Val,
}

impl ModEvent {
    pub fn is_modified(self) -> bool {
        self != ModEvent::None
    }

    /// The strongest of two events; used to combine several operations on one view.
    pub fn join(self, other: ModEvent) -> ModEvent {
        self.max(other)
    }
}

/// The domains of all variables of a space, together with the events raised by narrowing them
/// which the engine has not yet processed.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    int_domains: KeyedVec<DomainId, RangeList>,
    set_domains: KeyedVec<SetDomainId, SetDomain>,
    events: EventSink,
}

impl Assignments {
    pub(crate) fn new_int_domain(&mut self, domain: RangeList) -> DomainId {
        marrow_assert_simple!(!domain.is_empty(), "integer domains cannot be empty");
        self.int_domains.push(domain)
    }

    pub(crate) fn new_set_domain(&mut self, domain: SetDomain) -> SetDomainId {
        self.set_domains.push(domain)
    }

    pub fn num_int_domains(&self) -> usize {
        self.int_domains.len()
    }

    pub fn num_set_domains(&self) -> usize {
        self.set_domains.len()
    }

    pub fn int_domains(&self) -> impl Iterator<Item = DomainId> {
        self.int_domains.keys()
    }

    pub fn set_domains(&self) -> impl Iterator<Item = SetDomainId> {
        self.set_domains.keys()
    }

    pub(crate) fn events_mut(&mut self) -> &mut EventSink {
        &mut self.events
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// An estimate of the heap memory used by the domains, in bytes.
    pub(crate) fn heap_bytes(&self) -> usize {
        let ranges: usize = self
            .int_domains
            .iter()
            .map(|domain| domain.num_ranges())
            .sum::<usize>()
            + self
                .set_domains
                .iter()
                .map(|domain| domain.glb().num_ranges() + domain.lub().num_ranges())
                .sum::<usize>();

        ranges * std::mem::size_of::<ValueRange>()
            + self.int_domains.len() * std::mem::size_of::<RangeList>()
            + self.set_domains.len() * std::mem::size_of::<SetDomain>()
    }
}

// Integer domains.
impl Assignments {
    pub fn get_domain(&self, domain: DomainId) -> &RangeList {
        &self.int_domains[domain]
    }

    pub fn get_lower_bound(&self, domain: DomainId) -> i32 {
        self.int_domains[domain].ranges()[0].min
    }

    pub fn get_upper_bound(&self, domain: DomainId) -> i32 {
        let ranges = self.int_domains[domain].ranges();
        ranges[ranges.len() - 1].max
    }

    pub fn get_size(&self, domain: DomainId) -> u64 {
        self.int_domains[domain].size()
    }

    pub fn is_fixed(&self, domain: DomainId) -> bool {
        self.get_lower_bound(domain) == self.get_upper_bound(domain)
    }

    pub fn is_value_in_domain(&self, domain: DomainId, value: i32) -> bool {
        self.int_domains[domain].contains(value)
    }

    pub fn get_ranges(&self, domain: DomainId) -> &[ValueRange] {
        self.int_domains[domain].ranges()
    }

    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain: DomainId,
        bound: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let (old_min, old_max) = (self.get_lower_bound(domain), self.get_upper_bound(domain));
        if bound <= old_min {
            return Ok(ModEvent::None);
        }
        if bound > old_max {
            return Err(EmptyDomain);
        }

        self.int_domains[domain].retain_at_least(bound);

        Ok(self.record_int_change(
            domain,
            old_min,
            old_max,
            Delta {
                min: old_min,
                max: bound - 1,
            },
        ))
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain: DomainId,
        bound: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        let (old_min, old_max) = (self.get_lower_bound(domain), self.get_upper_bound(domain));
        if bound >= old_max {
            return Ok(ModEvent::None);
        }
        if bound < old_min {
            return Err(EmptyDomain);
        }

        self.int_domains[domain].retain_at_most(bound);

        Ok(self.record_int_change(
            domain,
            old_min,
            old_max,
            Delta {
                min: bound + 1,
                max: old_max,
            },
        ))
    }

    pub(crate) fn remove_value(
        &mut self,
        domain: DomainId,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if !self.is_value_in_domain(domain, value) {
            return Ok(ModEvent::None);
        }
        if self.is_fixed(domain) {
            return Err(EmptyDomain);
        }

        let (old_min, old_max) = (self.get_lower_bound(domain), self.get_upper_bound(domain));
        let _ = self.int_domains[domain].remove(value);

        Ok(self.record_int_change(
            domain,
            old_min,
            old_max,
            Delta {
                min: value,
                max: value,
            },
        ))
    }

    pub(crate) fn make_assignment(
        &mut self,
        domain: DomainId,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if !self.is_value_in_domain(domain, value) {
            return Err(EmptyDomain);
        }
        if self.is_fixed(domain) {
            return Ok(ModEvent::None);
        }

        let (old_min, old_max) = (self.get_lower_bound(domain), self.get_upper_bound(domain));
        self.int_domains[domain] = RangeList::interval(value, value);

        Ok(self.record_int_change(
            domain,
            old_min,
            old_max,
            Delta {
                min: old_min,
                max: old_max,
            },
        ))
    }

    /// Keep only the values which also occur in `ranges`, which must be sorted and disjoint.
    pub(crate) fn intersect_domain(
        &mut self,
        domain: DomainId,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let narrowed = self.int_domains[domain].intersect(ranges);
        self.replace_domain(domain, narrowed)
    }

    /// Remove the values in `ranges`, which must be sorted and disjoint.
    pub(crate) fn subtract_from_domain(
        &mut self,
        domain: DomainId,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let narrowed = self.int_domains[domain].subtract(ranges);
        self.replace_domain(domain, narrowed)
    }

    fn replace_domain(
        &mut self,
        domain: DomainId,
        narrowed: RangeList,
    ) -> Result<ModEvent, EmptyDomain> {
        if narrowed.is_empty() {
            return Err(EmptyDomain);
        }
        if narrowed.size() == self.get_size(domain) {
            return Ok(ModEvent::None);
        }

        marrow_assert_moderate!(narrowed.is_canonical());

        let (old_min, old_max) = (self.get_lower_bound(domain), self.get_upper_bound(domain));
        self.int_domains[domain] = narrowed;

        Ok(self.record_int_change(
            domain,
            old_min,
            old_max,
            Delta {
                min: old_min,
                max: old_max,
            },
        ))
    }

    fn record_int_change(
        &mut self,
        domain: DomainId,
        old_min: i32,
        old_max: i32,
        delta: Delta,
    ) -> ModEvent {
        let (min, max) = (self.get_lower_bound(domain), self.get_upper_bound(domain));

        let mut events = EnumSet::only(IntDomainEvent::Removal);
        let mut mod_event = ModEvent::Domain;

        if min > old_min {
            events |= IntDomainEvent::LowerBound;
            mod_event = ModEvent::Bounds;
        }
        if max < old_max {
            events |= IntDomainEvent::UpperBound;
            mod_event = ModEvent::Bounds;
        }
        if min == max {
            events |= IntDomainEvent::Assign;
            mod_event = ModEvent::Val;
        }

        marrow_assert_moderate!(self.int_domains[domain].is_canonical());
        self.events.push_int(domain, events, delta);

        mod_event
    }
}

// Set domains.
impl Assignments {
    pub fn get_glb(&self, domain: SetDomainId) -> &RangeList {
        self.set_domains[domain].glb()
    }

    pub fn get_lub(&self, domain: SetDomainId) -> &RangeList {
        self.set_domains[domain].lub()
    }

    pub fn get_card_min(&self, domain: SetDomainId) -> u64 {
        self.set_domains[domain].card_min()
    }

    pub fn get_card_max(&self, domain: SetDomainId) -> u64 {
        self.set_domains[domain].card_max()
    }

    pub fn is_set_fixed(&self, domain: SetDomainId) -> bool {
        self.set_domains[domain].is_fixed()
    }

    pub(crate) fn include_in_set(
        &mut self,
        domain: SetDomainId,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let events = self.set_domains[domain].include(ranges)?;
        Ok(self.record_set_change(domain, events))
    }

    pub(crate) fn exclude_from_set(
        &mut self,
        domain: SetDomainId,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let events = self.set_domains[domain].exclude(ranges)?;
        Ok(self.record_set_change(domain, events))
    }

    pub(crate) fn intersect_set_lub(
        &mut self,
        domain: SetDomainId,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let events = self.set_domains[domain].intersect_lub(ranges)?;
        Ok(self.record_set_change(domain, events))
    }

    pub(crate) fn tighten_card_min(
        &mut self,
        domain: SetDomainId,
        card_min: u64,
    ) -> Result<ModEvent, EmptyDomain> {
        let events = self.set_domains[domain].tighten_card_min(card_min)?;
        Ok(self.record_set_change(domain, events))
    }

    pub(crate) fn tighten_card_max(
        &mut self,
        domain: SetDomainId,
        card_max: u64,
    ) -> Result<ModEvent, EmptyDomain> {
        let events = self.set_domains[domain].tighten_card_max(card_max)?;
        Ok(self.record_set_change(domain, events))
    }

    fn record_set_change(
        &mut self,
        domain: SetDomainId,
        events: EnumSet<SetDomainEvent>,
    ) -> ModEvent {
        if !events.is_empty() {
            self.events.push_set(domain, events);
        }

        if events.contains(SetDomainEvent::Assign) {
            ModEvent::Val
        } else if events.contains(SetDomainEvent::Glb) || events.contains(SetDomainEvent::Lub) {
            ModEvent::Bounds
        } else if events.is_empty() {
            ModEvent::None
        } else {
            ModEvent::Domain
        }
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::Assignments;
    use super::ModEvent;
    use crate::basic_types::RangeList;
    use crate::basic_types::ValueRange;
    use crate::engine::cp::domain_events::IntDomainEvent;

    fn drained_events(assignments: &mut Assignments) -> Vec<EnumSet<IntDomainEvent>> {
        assignments
            .events_mut()
            .drain_int()
            .map(|(_, events, _)| events)
            .collect()
    }

    #[test]
    fn bound_changes_raise_matching_events() {
        let mut assignments = Assignments::default();
        let x = assignments.new_int_domain(RangeList::interval(0, 10));

        assert_eq!(assignments.tighten_lower_bound(x, 3), Ok(ModEvent::Bounds));
        assert_eq!(
            drained_events(&mut assignments),
            vec![IntDomainEvent::Removal | IntDomainEvent::LowerBound]
        );

        assert_eq!(assignments.tighten_lower_bound(x, 2), Ok(ModEvent::None));
        assert!(drained_events(&mut assignments).is_empty());
    }

    #[test]
    fn removing_an_interior_value_is_a_domain_event() {
        let mut assignments = Assignments::default();
        let x = assignments.new_int_domain(RangeList::interval(0, 10));

        assert_eq!(assignments.remove_value(x, 5), Ok(ModEvent::Domain));
        assert_eq!(assignments.get_size(x), 10);
        assert_eq!(
            drained_events(&mut assignments),
            vec![EnumSet::only(IntDomainEvent::Removal)]
        );
    }

    #[test]
    fn emptying_a_domain_leaves_it_unchanged() {
        let mut assignments = Assignments::default();
        let x = assignments.new_int_domain(RangeList::interval(0, 3));

        assert!(assignments
            .intersect_domain(x, [ValueRange::new(5, 9)])
            .is_err());
        assert_eq!(assignments.get_domain(x), &RangeList::interval(0, 3));
        assert!(!assignments.has_pending_events());
    }

    #[test]
    fn intersection_to_a_single_value_assigns() {
        let mut assignments = Assignments::default();
        let x = assignments.new_int_domain(RangeList::interval(0, 3));

        assert_eq!(
            assignments.intersect_domain(x, [ValueRange::new(3, 9)]),
            Ok(ModEvent::Val)
        );
        assert!(assignments.is_fixed(x));
        assert!(drained_events(&mut assignments)[0].contains(IntDomainEvent::Assign));
    }
}

use enumset::EnumSet;

use super::domain_events::SetDomainEvent;
use super::EmptyDomain;
use crate::basic_types::RangeList;
use crate::basic_types::ValueRange;
use crate::marrow_assert_moderate;

/// The domain of a set variable: every value of `glb` is in the set, no value outside `lub` is,
/// and the cardinality lies in `[card_min, card_max]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SetDomain {
    glb: RangeList,
    lub: RangeList,
    card_min: u64,
    card_max: u64,
}

impl SetDomain {
    /// Create a domain, or `None` if no set satisfies the bounds.
    pub(crate) fn new(glb: RangeList, lub: RangeList, card_min: u64, card_max: u64) -> Option<Self> {
        let mut domain = SetDomain {
            glb: RangeList::empty(),
            lub: RangeList::empty(),
            card_min: 0,
            card_max: u64::MAX,
        };

        domain.update(glb, lub, card_min, card_max).ok()?;
        Some(domain)
    }

    pub(crate) fn glb(&self) -> &RangeList {
        &self.glb
    }

    pub(crate) fn lub(&self) -> &RangeList {
        &self.lub
    }

    pub(crate) fn card_min(&self) -> u64 {
        self.card_min
    }

    pub(crate) fn card_max(&self) -> u64 {
        self.card_max
    }

    pub(crate) fn is_fixed(&self) -> bool {
        self.glb.size() == self.lub.size()
    }

    pub(crate) fn include(
        &mut self,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<EnumSet<SetDomainEvent>, EmptyDomain> {
        let glb = self.glb.union(ranges);
        self.update(glb, self.lub.clone(), self.card_min, self.card_max)
    }

    pub(crate) fn exclude(
        &mut self,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<EnumSet<SetDomainEvent>, EmptyDomain> {
        let lub = self.lub.subtract(ranges);
        self.update(self.glb.clone(), lub, self.card_min, self.card_max)
    }

    pub(crate) fn intersect_lub(
        &mut self,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<EnumSet<SetDomainEvent>, EmptyDomain> {
        let lub = self.lub.intersect(ranges);
        self.update(self.glb.clone(), lub, self.card_min, self.card_max)
    }

    pub(crate) fn tighten_card_min(
        &mut self,
        card_min: u64,
    ) -> Result<EnumSet<SetDomainEvent>, EmptyDomain> {
        if card_min <= self.card_min {
            return Ok(EnumSet::empty());
        }
        self.update(self.glb.clone(), self.lub.clone(), card_min, self.card_max)
    }

    pub(crate) fn tighten_card_max(
        &mut self,
        card_max: u64,
    ) -> Result<EnumSet<SetDomainEvent>, EmptyDomain> {
        if card_max >= self.card_max {
            return Ok(EnumSet::empty());
        }
        self.update(self.glb.clone(), self.lub.clone(), self.card_min, card_max)
    }

    /// Replace the domain by the given bounds after making them mutually consistent. The domain is
    /// left untouched if the bounds admit no set.
    fn update(
        &mut self,
        mut glb: RangeList,
        mut lub: RangeList,
        card_min: u64,
        card_max: u64,
    ) -> Result<EnumSet<SetDomainEvent>, EmptyDomain> {
        if !glb.is_subset_of(lub.iter()) {
            return Err(EmptyDomain);
        }

        let card_min = card_min.max(glb.size());
        let card_max = card_max.min(lub.size());
        if card_min > card_max {
            return Err(EmptyDomain);
        }

        if card_min == lub.size() {
            glb = lub.clone();
        } else if card_max == glb.size() {
            lub = glb.clone();
        }

        let mut events = EnumSet::empty();
        if glb.size() != self.glb.size() {
            marrow_assert_moderate!(glb.size() > self.glb.size() || self.lub.is_empty());
            let _ = events.insert(SetDomainEvent::Glb);
        }
        if lub.size() != self.lub.size() {
            let _ = events.insert(SetDomainEvent::Lub);
        }
        if card_min != self.card_min || card_max != self.card_max {
            let _ = events.insert(SetDomainEvent::Card);
        }
        if !events.is_empty() && glb.size() == lub.size() {
            let _ = events.insert(SetDomainEvent::Assign);
        }

        self.glb = glb;
        self.lub = lub;
        self.card_min = card_min;
        self.card_max = card_max;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::SetDomain;
    use super::SetDomainEvent;
    use crate::basic_types::RangeList;
    use crate::basic_types::ValueRange;

    fn domain(lub_max: i32, card_min: u64, card_max: u64) -> SetDomain {
        SetDomain::new(
            RangeList::empty(),
            RangeList::interval(1, lub_max),
            card_min,
            card_max,
        )
        .expect("consistent domain")
    }

    #[test]
    fn cardinality_is_clamped_to_the_bounds() {
        let domain = domain(3, 0, 10);
        assert_eq!(domain.card_max(), 3);
        assert_eq!(domain.card_min(), 0);
    }

    #[test]
    fn including_outside_the_upper_bound_fails() {
        let mut domain = domain(3, 0, 3);
        assert!(domain.include([ValueRange::new(4, 4)]).is_err());
        assert_eq!(domain.glb().size(), 0);
    }

    #[test]
    fn reaching_maximum_cardinality_fixes_the_set() {
        let mut domain = domain(5, 0, 2);
        let events = domain
            .include([ValueRange::new(2, 3)])
            .expect("within bounds");

        assert!(domain.is_fixed());
        assert!(events.contains(SetDomainEvent::Glb));
        assert!(events.contains(SetDomainEvent::Lub));
        assert!(events.contains(SetDomainEvent::Assign));
        assert_eq!(domain.lub(), &RangeList::interval(2, 3));
    }

    #[test]
    fn excluding_below_minimum_cardinality_fails() {
        let mut domain = domain(3, 3, 3);
        assert!(domain.is_fixed());
        assert!(domain.exclude([ValueRange::new(1, 1)]).is_err());
    }

    #[test]
    fn tightening_cardinality_only_raises_card_events() {
        let mut domain = domain(5, 0, 5);
        let events = domain.tighten_card_max(4).expect("consistent");

        assert_eq!(events.len(), 1);
        assert!(events.contains(SetDomainEvent::Card));
    }
}

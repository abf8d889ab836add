use std::ops::Not;

use enumset::EnumSet;

use super::AffineView;
use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;

/// A Boolean view on a 0/1 integer variable. The view is either the variable itself or its
/// negation `1 - x`, so a propagator written for disjunctions also propagates conjunctions when
/// it is given negated literals.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Literal {
    domain: DomainId,
    positive: bool,
}

impl Literal {
    pub(crate) fn new(domain: DomainId) -> Literal {
        Literal {
            domain,
            positive: true,
        }
    }

    pub fn domain(&self) -> DomainId {
        self.domain
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    pub fn is_true(&self, assignments: &Assignments) -> bool {
        self.lower_bound(assignments) == 1
    }

    pub fn is_false(&self, assignments: &Assignments) -> bool {
        self.upper_bound(assignments) == 0
    }

    pub fn set_true(&self, assignments: &mut Assignments) -> Result<ModEvent, EmptyDomain> {
        self.assign(assignments, 1)
    }

    pub fn set_false(&self, assignments: &mut Assignments) -> Result<ModEvent, EmptyDomain> {
        self.assign(assignments, 0)
    }

    fn map(&self, value: i32) -> i32 {
        if self.positive {
            value
        } else {
            1 - value
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            domain: self.domain,
            positive: !self.positive,
        }
    }
}

impl IntegerVariable for Literal {
    type AffineView = AffineView<Literal>;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        if self.positive {
            assignments.get_lower_bound(self.domain)
        } else {
            1 - assignments.get_upper_bound(self.domain)
        }
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        if self.positive {
            assignments.get_upper_bound(self.domain)
        } else {
            1 - assignments.get_lower_bound(self.domain)
        }
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        assignments.is_value_in_domain(self.domain, self.map(value))
    }

    fn size(&self, assignments: &Assignments) -> u64 {
        assignments.get_size(self.domain)
    }

    fn iterate_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl DoubleEndedIterator<Item = ValueRange> + 'a {
        std::iter::once(ValueRange::new(
            self.lower_bound(assignments),
            self.upper_bound(assignments),
        ))
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.positive {
            assignments.tighten_lower_bound(self.domain, value)
        } else {
            assignments.tighten_upper_bound(self.domain, 1 - value)
        }
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.positive {
            assignments.tighten_upper_bound(self.domain, value)
        } else {
            assignments.tighten_lower_bound(self.domain, 1 - value)
        }
    }

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        assignments.remove_value(self.domain, self.map(value))
    }

    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        assignments.make_assignment(self.domain, self.map(value))
    }

    fn intersect_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let keep = ranges.into_iter().collect::<Vec<_>>();
        let contains = |value: i32| keep.iter().any(|range| range.contains(value));

        match (contains(0), contains(1)) {
            (true, true) => Ok(ModEvent::None),
            (true, false) => self.set_upper_bound(assignments, 0),
            (false, true) => self.set_lower_bound(assignments, 1),
            (false, false) => Err(EmptyDomain),
        }
    }

    fn subtract_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let removed = ranges.into_iter().collect::<Vec<_>>();
        let contains = |value: i32| removed.iter().any(|range| range.contains(value));

        match (contains(0), contains(1)) {
            (false, false) => Ok(ModEvent::None),
            (false, true) => self.set_upper_bound(assignments, 0),
            (true, false) => self.set_lower_bound(assignments, 1),
            (true, true) => Err(EmptyDomain),
        }
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<IntDomainEvent>) {
        let bound = IntDomainEvent::LowerBound | IntDomainEvent::UpperBound;
        if events.intersection(bound).len() == 1 && !self.positive {
            events = events.symmetrical_difference(bound);
        }
        watchers.watch_all(self.domain, events);
    }

    fn unpack_event(&self, event: IntDomainEvent) -> IntDomainEvent {
        match event {
            IntDomainEvent::LowerBound if !self.positive => IntDomainEvent::UpperBound,
            IntDomainEvent::UpperBound if !self.positive => IntDomainEvent::LowerBound,
            event => event,
        }
    }

    fn unpack_delta(&self, delta: Delta) -> Delta {
        let (first, second) = (self.map(delta.min), self.map(delta.max));
        Delta {
            min: first.min(second),
            max: first.max(second),
        }
    }
}

impl TransformableVariable<AffineView<Literal>> for Literal {
    fn scaled(&self, scale: i32) -> AffineView<Literal> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<Literal> {
        AffineView::new(*self, 1, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::Literal;
    use crate::basic_types::RangeList;
    use crate::engine::cp::Assignments;
    use crate::engine::variables::IntegerVariable;

    #[test]
    fn negated_literal_sees_the_opposite_value() {
        let mut assignments = Assignments::default();
        let literal = Literal::new(assignments.new_int_domain(RangeList::interval(0, 1)));
        let negated = !literal;

        assert!(!literal.is_true(&assignments) && !negated.is_false(&assignments));

        let _ = negated.set_true(&mut assignments).expect("unassigned");
        assert!(literal.is_false(&assignments));
        assert_eq!(negated.lower_bound(&assignments), 1);
        assert!(literal.set_true(&mut assignments).is_err());
    }
}

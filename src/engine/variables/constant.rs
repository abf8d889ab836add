use enumset::EnumSet;

use super::IntegerVariable;
use super::SetVariable;
use super::TransformableVariable;
use crate::basic_types::IntSet;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::domain_events::SetDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;

/// A constant behaves as a view with a single value that never changes, which lets propagators
/// written for views accept constant operands.
impl IntegerVariable for i32 {
    type AffineView = i32;

    fn lower_bound(&self, _: &Assignments) -> i32 {
        *self
    }

    fn upper_bound(&self, _: &Assignments) -> i32 {
        *self
    }

    fn contains(&self, _: &Assignments, value: i32) -> bool {
        *self == value
    }

    fn size(&self, _: &Assignments) -> u64 {
        1
    }

    fn iterate_ranges<'a>(
        &'a self,
        _: &'a Assignments,
    ) -> impl DoubleEndedIterator<Item = ValueRange> + 'a {
        std::iter::once(ValueRange::singleton(*self))
    }

    fn set_lower_bound(&self, _: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        if value > *self {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn set_upper_bound(&self, _: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        if value < *self {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn remove(&self, _: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        if value == *self {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn assign(&self, _: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        if value != *self {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn intersect_ranges(
        &self,
        _: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        if ranges.into_iter().any(|range| range.contains(*self)) {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn subtract_ranges(
        &self,
        _: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        if ranges.into_iter().any(|range| range.contains(*self)) {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn watch_all(&self, _: &mut Watchers<'_>, _: EnumSet<IntDomainEvent>) {}

    fn unpack_event(&self, event: IntDomainEvent) -> IntDomainEvent {
        event
    }

    fn unpack_delta(&self, delta: Delta) -> Delta {
        delta
    }
}

impl TransformableVariable<i32> for i32 {
    fn scaled(&self, scale: i32) -> i32 {
        self * scale
    }

    fn offset(&self, offset: i32) -> i32 {
        self + offset
    }
}

/// A constant set is a set view whose lower and upper bound are both the set itself.
impl SetVariable for IntSet {
    fn glb_ranges<'a>(&'a self, _: &'a Assignments) -> impl Iterator<Item = ValueRange> + 'a {
        self.iter()
    }

    fn lub_ranges<'a>(&'a self, _: &'a Assignments) -> impl Iterator<Item = ValueRange> + 'a {
        self.iter()
    }

    fn glb_size(&self, _: &Assignments) -> u64 {
        self.size()
    }

    fn lub_size(&self, _: &Assignments) -> u64 {
        self.size()
    }

    fn card_min(&self, _: &Assignments) -> u64 {
        self.size()
    }

    fn card_max(&self, _: &Assignments) -> u64 {
        self.size()
    }

    fn in_glb(&self, _: &Assignments, value: i32) -> bool {
        self.contains(value)
    }

    fn in_lub(&self, _: &Assignments, value: i32) -> bool {
        self.contains(value)
    }

    fn include(
        &self,
        _: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.as_range_list().is_superset_of(ranges) {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn exclude(
        &self,
        _: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.as_range_list().intersect(ranges).is_empty() {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn intersect_lub(
        &self,
        _: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.as_range_list().is_subset_of(ranges) {
            Ok(ModEvent::None)
        } else {
            Err(EmptyDomain)
        }
    }

    fn set_card_min(&self, _: &mut Assignments, card_min: u64) -> Result<ModEvent, EmptyDomain> {
        if card_min > self.size() {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn set_card_max(&self, _: &mut Assignments, card_max: u64) -> Result<ModEvent, EmptyDomain> {
        if card_max < self.size() {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn watch_all(&self, _: &mut Watchers<'_>, _: EnumSet<SetDomainEvent>) {}
}

#[cfg(test)]
mod tests {
    use crate::basic_types::IntSet;
    use crate::basic_types::ValueRange;
    use crate::engine::cp::Assignments;
    use crate::engine::variables::IntegerVariable;
    use crate::engine::variables::SetVariable;

    #[test]
    fn constants_only_fail_when_their_value_is_excluded() {
        let mut assignments = Assignments::default();
        let five: i32 = 5;

        assert!(five.set_lower_bound(&mut assignments, 5).is_ok());
        assert!(five.set_lower_bound(&mut assignments, 6).is_err());
        assert!(five.remove(&mut assignments, 4).is_ok());
        assert!(five
            .intersect_ranges(&mut assignments, [ValueRange::new(0, 3), ValueRange::new(5, 9)])
            .is_ok());
        assert!(five
            .subtract_ranges(&mut assignments, [ValueRange::new(4, 6)])
            .is_err());
    }

    #[test]
    fn constant_sets_reject_changes() {
        let mut assignments = Assignments::default();
        let set = IntSet::from_values([1, 2, 3, 8]);

        assert!(set
            .include(&mut assignments, [ValueRange::new(2, 3)])
            .is_ok());
        assert!(set
            .include(&mut assignments, [ValueRange::new(3, 4)])
            .is_err());
        assert!(set
            .exclude(&mut assignments, [ValueRange::new(4, 7)])
            .is_ok());
        assert!(set
            .intersect_lub(&mut assignments, [ValueRange::new(0, 7)])
            .is_err());
        assert!(set.is_fixed(&assignments));
    }
}

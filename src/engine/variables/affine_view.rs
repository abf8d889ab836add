use std::cmp::Ordering;

use enumset::EnumSet;

use super::TransformableVariable;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::math::num_ext::NumExt;

/// Models `y = scale * x + offset` by expressing the domain of `y` as a transformation of the
/// domain of `x`. With a scale of `-1` this is the negation view; with a scale of `1` it is the
/// offset view.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "Multiplication by zero is not invertible");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    pub fn inner(&self) -> &Inner {
        &self.inner
    }

    /// Go from a value of the view to a value of the inner variable.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let translated = value - self.offset;
        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(translated, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(translated, self.scale),
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }

    /// The values of the inner variable which map into `range`, if any.
    fn invert_range(&self, range: ValueRange) -> Option<ValueRange> {
        let (min, max) = if self.scale > 0 {
            (
                self.invert(range.min, Rounding::Up),
                self.invert(range.max, Rounding::Down),
            )
        } else {
            (
                self.invert(range.max, Rounding::Up),
                self.invert(range.min, Rounding::Down),
            )
        };

        (min <= max).then_some(ValueRange { min, max })
    }

    fn invert_ranges(&self, ranges: impl IntoIterator<Item = ValueRange>) -> Vec<ValueRange> {
        let mut inverted = ranges
            .into_iter()
            .filter_map(|range| self.invert_range(range))
            .collect::<Vec<_>>();

        if self.scale < 0 {
            inverted.reverse();
        }

        inverted
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(assignments))
        } else {
            self.map(self.inner.lower_bound(assignments))
        }
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(assignments))
        } else {
            self.map(self.inner.upper_bound(assignments))
        }
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.contains(assignments, inverted)
        } else {
            false
        }
    }

    fn size(&self, assignments: &Assignments) -> u64 {
        self.inner.size(assignments)
    }

    fn iterate_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl DoubleEndedIterator<Item = ValueRange> + 'a {
        AffineRanges {
            inner: self.inner.iterate_ranges(assignments),
            scale: self.scale,
            offset: self.offset,
            pending_front: None,
            pending_back: None,
        }
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.scale < 0 {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(assignments, inverted)
        } else {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(assignments, inverted)
        }
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        if self.scale < 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(assignments, inverted)
        } else {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(assignments, inverted)
        }
    }

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.remove(assignments, inverted)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.assign(assignments, inverted)
        } else {
            Err(EmptyDomain)
        }
    }

    fn intersect_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let inverted = self.invert_ranges(ranges);
        self.inner.intersect_ranges(assignments, inverted)
    }

    fn subtract_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let inverted = self.invert_ranges(ranges);
        self.inner.subtract_ranges(assignments, inverted)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<IntDomainEvent>) {
        let bound = IntDomainEvent::LowerBound | IntDomainEvent::UpperBound;
        let intersection = events.intersection(bound);
        if intersection.len() == 1 && self.scale.is_negative() {
            events = events.symmetrical_difference(bound);
        }
        self.inner.watch_all(watchers, events);
    }

    fn unpack_event(&self, event: IntDomainEvent) -> IntDomainEvent {
        if self.scale.is_negative() {
            match self.inner.unpack_event(event) {
                IntDomainEvent::LowerBound => IntDomainEvent::UpperBound,
                IntDomainEvent::UpperBound => IntDomainEvent::LowerBound,
                event => event,
            }
        } else {
            self.inner.unpack_event(event)
        }
    }

    fn unpack_delta(&self, delta: Delta) -> Delta {
        let delta = self.inner.unpack_delta(delta);
        let (first, second) = (self.map(delta.min), self.map(delta.max));

        Delta {
            min: first.min(second),
            max: first.max(second),
        }
    }
}

/// The ranges of an affine view, derived from the ranges of its inner variable.
///
/// A scale of magnitude one maps ranges onto ranges. Any other scale spreads the values apart, so
/// each inner value becomes its own range.
struct AffineRanges<I> {
    inner: I,
    scale: i32,
    offset: i32,
    pending_front: Option<ValueRange>,
    pending_back: Option<ValueRange>,
}

impl<I: DoubleEndedIterator<Item = ValueRange>> AffineRanges<I> {
    fn advance(&mut self, front: bool) -> Option<ValueRange> {
        let AffineRanges {
            inner,
            scale,
            offset,
            pending_front,
            pending_back,
        } = self;
        let map = |value: i32| *scale * value + *offset;
        let inner_front = front == (*scale > 0);

        if scale.abs() == 1 {
            let range = if inner_front {
                inner.next()?
            } else {
                inner.next_back()?
            };
            let (first, second) = (map(range.min), map(range.max));
            return Some(ValueRange {
                min: first.min(second),
                max: first.max(second),
            });
        }

        let (slot, other) = if front {
            (pending_front, pending_back)
        } else {
            (pending_back, pending_front)
        };

        if slot.is_none() {
            *slot = if inner_front {
                inner.next()
            } else {
                inner.next_back()
            };

            if slot.is_none() {
                *slot = other.take();
            }
        }

        let range = (*slot)?;
        let value = if inner_front { range.min } else { range.max };

        *slot = if range.min == range.max {
            None
        } else if inner_front {
            Some(ValueRange {
                min: range.min + 1,
                max: range.max,
            })
        } else {
            Some(ValueRange {
                min: range.min,
                max: range.max - 1,
            })
        };

        Some(ValueRange::singleton(map(value)))
    }
}

impl<I: DoubleEndedIterator<Item = ValueRange>> Iterator for AffineRanges<I> {
    type Item = ValueRange;

    fn next(&mut self) -> Option<ValueRange> {
        self.advance(true)
    }
}

impl<I: DoubleEndedIterator<Item = ValueRange>> DoubleEndedIterator for AffineRanges<I> {
    fn next_back(&mut self) -> Option<ValueRange> {
        self.advance(false)
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(value: DomainId) -> Self {
        AffineView::new(value, 1, 0)
    }
}

enum Rounding {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::RangeList;

    fn assignments_with(domain: RangeList) -> (Assignments, DomainId) {
        let mut assignments = Assignments::default();
        let domain = assignments.new_int_domain(domain);
        (assignments, domain)
    }

    #[test]
    fn scaling_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);
        let scaled_view = view.scaled(6);

        assert_eq!(18, scaled_view.scale);
        assert_eq!(24, scaled_view.offset);
    }

    #[test]
    fn negation_mirrors_the_ranges() {
        let (assignments, x) =
            assignments_with(RangeList::from_ranges([ValueRange::new(1, 2), ValueRange::new(5, 7)]));
        let view = x.scaled(-1);

        let ranges = view.iterate_ranges(&assignments).collect::<Vec<_>>();
        assert_eq!(ranges, vec![ValueRange::new(-7, -5), ValueRange::new(-2, -1)]);

        let backwards = view.iterate_ranges(&assignments).rev().collect::<Vec<_>>();
        assert_eq!(backwards, vec![ValueRange::new(-2, -1), ValueRange::new(-7, -5)]);
    }

    #[test]
    fn scaled_ranges_are_split_into_values() {
        let (assignments, x) = assignments_with(RangeList::interval(0, 2));
        let view = x.scaled(-2).offset(1);

        let ranges = view.iterate_ranges(&assignments).collect::<Vec<_>>();
        assert_eq!(
            ranges,
            vec![
                ValueRange::singleton(-3),
                ValueRange::singleton(-1),
                ValueRange::singleton(1)
            ]
        );

        let mut iterator = view.iterate_ranges(&assignments);
        assert_eq!(iterator.next(), Some(ValueRange::singleton(-3)));
        assert_eq!(iterator.next_back(), Some(ValueRange::singleton(1)));
        assert_eq!(iterator.next(), Some(ValueRange::singleton(-1)));
        assert_eq!(iterator.next_back(), None);
    }

    #[test]
    fn bounds_are_rounded_towards_the_inner_domain() {
        let (mut assignments, x) = assignments_with(RangeList::interval(-10, 10));
        let view = x.scaled(2);

        let _ = view.set_lower_bound(&mut assignments, 3).expect("non-empty");
        assert_eq!(x.lower_bound(&assignments), 2);

        let negated = x.scaled(-2);
        let _ = negated.set_lower_bound(&mut assignments, -5).expect("non-empty");
        assert_eq!(x.upper_bound(&assignments), 2);
    }

    #[test]
    fn intersection_through_a_negated_view() {
        let (mut assignments, x) = assignments_with(RangeList::interval(-5, 5));
        let view = x.scaled(-1).offset(1);

        let _ = view
            .intersect_ranges(&mut assignments, [ValueRange::new(-2, 0), ValueRange::new(3, 4)])
            .expect("non-empty");

        assert_eq!(
            assignments.get_ranges(x),
            &[ValueRange::new(-3, -2), ValueRange::new(1, 3)]
        );
    }

    #[test]
    fn removal_of_unreachable_value_is_a_no_op() {
        let (mut assignments, x) = assignments_with(RangeList::interval(0, 4));
        let view = x.scaled(3);

        assert_eq!(view.remove(&mut assignments, 4), Ok(ModEvent::None));
        assert_eq!(view.remove(&mut assignments, 6), Ok(ModEvent::Domain));
        assert!(!x.contains(&assignments, 2));
    }
}

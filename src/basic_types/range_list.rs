use std::fmt::Display;
use std::fmt::Formatter;

use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

/// A closed interval `[min, max]` of integers. Ranges produced by the range iterators and stored
/// in a [`RangeList`] are never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl ValueRange {
    pub fn new(min: i32, max: i32) -> ValueRange {
        marrow_assert_simple!(min <= max, "the range [{min}, {max}] is empty");
        ValueRange { min, max }
    }

    pub fn singleton(value: i32) -> ValueRange {
        ValueRange {
            min: value,
            max: value,
        }
    }

    /// The number of values in the range.
    pub fn width(&self) -> u64 {
        (self.max as i64 - self.min as i64 + 1) as u64
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn values(self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }
}

impl Display for ValueRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// A set of integers stored as sorted, disjoint and non-adjacent [`ValueRange`]s.
///
/// Every constructor normalises its input, so two lists describing the same set of values are
/// structurally equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RangeList {
    ranges: Vec<ValueRange>,
}

impl RangeList {
    pub fn empty() -> RangeList {
        RangeList::default()
    }

    pub fn interval(min: i32, max: i32) -> RangeList {
        if min > max {
            return RangeList::empty();
        }

        RangeList {
            ranges: vec![ValueRange { min, max }],
        }
    }

    /// Build a list from ranges which are sorted by their lower bound and do not overlap, merging
    /// ranges which touch.
    pub fn from_sorted_ranges(ranges: impl IntoIterator<Item = ValueRange>) -> RangeList {
        let mut merged: Vec<ValueRange> = Vec::new();

        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.min as i64 <= last.max as i64 + 1 => {
                    marrow_assert_moderate!(
                        range.min >= last.min,
                        "ranges must be sorted by their lower bound"
                    );
                    last.max = last.max.max(range.max);
                }
                _ => merged.push(range),
            }
        }

        RangeList { ranges: merged }
    }

    /// Build a list from arbitrary ranges, in any order and possibly overlapping.
    pub fn from_ranges(ranges: impl IntoIterator<Item = ValueRange>) -> RangeList {
        let mut ranges = ranges.into_iter().collect::<Vec<_>>();
        ranges.sort_by_key(|range| range.min);
        RangeList::from_sorted_ranges(ranges)
    }

    pub fn from_values(values: impl IntoIterator<Item = i32>) -> RangeList {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        values.dedup();

        RangeList::from_sorted_ranges(values.into_iter().map(ValueRange::singleton))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn min(&self) -> Option<i32> {
        self.ranges.first().map(|range| range.min)
    }

    pub fn max(&self) -> Option<i32> {
        self.ranges.last().map(|range| range.max)
    }

    /// The number of values in the list.
    pub fn size(&self) -> u64 {
        self.ranges.iter().map(ValueRange::width).sum()
    }

    pub fn num_ranges(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[ValueRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, ValueRange>> {
        self.ranges.iter().copied()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = i32> + '_ {
        self.ranges.iter().flat_map(|range| range.min..=range.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.ranges
            .binary_search_by(|range| {
                if range.max < value {
                    std::cmp::Ordering::Less
                } else if range.min > value {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The `n`-th smallest value in the list, starting at zero.
    pub fn nth_value(&self, mut n: u64) -> Option<i32> {
        for range in &self.ranges {
            if n < range.width() {
                return Some((range.min as i64 + n as i64) as i32);
            }
            n -= range.width();
        }

        None
    }

    /// Remove every value below `bound`.
    pub fn retain_at_least(&mut self, bound: i32) {
        let first_kept = self.ranges.partition_point(|range| range.max < bound);
        let _ = self.ranges.drain(..first_kept);

        if let Some(first) = self.ranges.first_mut() {
            first.min = first.min.max(bound);
        }
    }

    /// Remove every value above `bound`.
    pub fn retain_at_most(&mut self, bound: i32) {
        let kept = self.ranges.partition_point(|range| range.min <= bound);
        self.ranges.truncate(kept);

        if let Some(last) = self.ranges.last_mut() {
            last.max = last.max.min(bound);
        }
    }

    /// Remove a single value. Returns whether the value was present.
    pub fn remove(&mut self, value: i32) -> bool {
        let index = self.ranges.partition_point(|range| range.max < value);
        let Some(range) = self.ranges.get_mut(index) else {
            return false;
        };

        if range.min > value {
            return false;
        }

        match (range.min == value, range.max == value) {
            (true, true) => {
                let _ = self.ranges.remove(index);
            }
            (true, false) => range.min += 1,
            (false, true) => range.max -= 1,
            (false, false) => {
                let upper = ValueRange {
                    min: value + 1,
                    max: range.max,
                };
                range.max = value - 1;
                self.ranges.insert(index + 1, upper);
            }
        }

        true
    }

    pub fn intersect(&self, other: impl IntoIterator<Item = ValueRange>) -> RangeList {
        RangeList::from_sorted_ranges(super::Inter::new(self.iter(), other.into_iter()))
    }

    pub fn union(&self, other: impl IntoIterator<Item = ValueRange>) -> RangeList {
        RangeList::from_sorted_ranges(super::Union::new(self.iter(), other.into_iter()))
    }

    pub fn subtract(&self, other: impl IntoIterator<Item = ValueRange>) -> RangeList {
        RangeList::from_sorted_ranges(super::Diff::new(self.iter(), other.into_iter()))
    }

    pub fn is_subset_of(&self, other: impl IntoIterator<Item = ValueRange>) -> bool {
        super::Diff::new(self.iter(), other.into_iter())
            .next()
            .is_none()
    }

    pub fn is_superset_of(&self, other: impl IntoIterator<Item = ValueRange>) -> bool {
        super::Diff::new(other.into_iter(), self.iter())
            .next()
            .is_none()
    }

    /// Checks the representation invariant; used by the assertion macros.
    pub(crate) fn is_canonical(&self) -> bool {
        self.ranges.iter().all(|range| range.min <= range.max)
            && self
                .ranges
                .windows(2)
                .all(|pair| pair[0].max as i64 + 1 < pair[1].min as i64)
    }
}

impl FromIterator<i32> for RangeList {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        RangeList::from_values(iter)
    }
}

impl Display for RangeList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, range) in self.ranges.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{range}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::RangeList;
    use super::ValueRange;

    fn sample() -> RangeList {
        RangeList::from_ranges([
            ValueRange::new(3, 5),
            ValueRange::new(-4, -3),
            ValueRange::new(1, 1),
            ValueRange::new(-1, -1),
        ])
    }

    #[test]
    fn construction_sorts_and_merges() {
        let list = RangeList::from_ranges([
            ValueRange::new(5, 7),
            ValueRange::new(1, 2),
            ValueRange::new(3, 3),
            ValueRange::new(6, 9),
        ]);

        assert_eq!(list.ranges(), &[ValueRange::new(1, 3), ValueRange::new(5, 9)]);
        assert!(list.is_canonical());
        assert_eq!(list.size(), 8);
    }

    #[test]
    fn intersection_with_interval() {
        let list = sample().intersect([ValueRange::new(-3, 3)]);

        assert_eq!(
            list.ranges(),
            &[
                ValueRange::new(-3, -3),
                ValueRange::new(-1, -1),
                ValueRange::new(1, 1),
                ValueRange::new(3, 3)
            ]
        );
        assert!(list.is_canonical());
    }

    #[test]
    fn remove_splits_a_range() {
        let mut list = RangeList::interval(0, 10);
        assert!(list.remove(4));
        assert!(!list.remove(4));
        assert!(!list.remove(11));

        assert_eq!(list.ranges(), &[ValueRange::new(0, 3), ValueRange::new(5, 10)]);
        assert_eq!(list.size(), 10);
    }

    #[test]
    fn retaining_bounds_drops_whole_ranges() {
        let mut list = sample();
        list.retain_at_least(0);
        assert_eq!(list.ranges(), &[ValueRange::new(1, 1), ValueRange::new(3, 5)]);

        list.retain_at_most(3);
        assert_eq!(list.ranges(), &[ValueRange::new(1, 1), ValueRange::new(3, 3)]);

        list.retain_at_most(0);
        assert!(list.is_empty());
    }

    #[test]
    fn membership_and_positions() {
        let list = sample();

        assert!(list.contains(-4));
        assert!(!list.contains(-2));
        assert!(list.contains(4));
        assert!(!list.contains(6));

        assert_eq!(list.nth_value(0), Some(-4));
        assert_eq!(list.nth_value(2), Some(-1));
        assert_eq!(list.nth_value(6), Some(5));
        assert_eq!(list.nth_value(7), None);
    }

    #[test]
    fn subtraction_and_subset() {
        let list = sample().subtract([ValueRange::new(-3, 1), ValueRange::new(4, 4)]);
        assert_eq!(
            list.ranges(),
            &[
                ValueRange::new(-4, -4),
                ValueRange::new(3, 3),
                ValueRange::new(5, 5)
            ]
        );

        assert!(list.is_subset_of(sample().iter()));
        assert!(!sample().is_subset_of(list.iter()));
    }

    #[test]
    fn display_uses_compact_ranges() {
        assert_eq!(sample().to_string(), "{-4..-3, -1, 1, 3..5}");
    }

    fn random_values(rng: &mut SmallRng) -> BTreeSet<i32> {
        (-12..=12).filter(|_| rng.gen_bool(0.5)).collect()
    }

    fn assert_matches(list: &RangeList, model: &BTreeSet<i32>) {
        assert!(list.is_canonical(), "{list} is not canonical");
        assert_eq!(list.size(), model.len() as u64, "{list} has the wrong size");
        assert_eq!(
            list.values().collect::<Vec<_>>(),
            model.iter().copied().collect::<Vec<_>>()
        );
        assert_eq!(list.min(), model.first().copied());
        assert_eq!(list.max(), model.last().copied());
    }

    #[test]
    fn operations_agree_with_a_set_of_values() {
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..500 {
            let left = random_values(&mut rng);
            let right = random_values(&mut rng);
            let list = RangeList::from_values(left.iter().copied());
            let other = RangeList::from_values(right.iter().copied());
            assert_matches(&list, &left);

            assert_matches(
                &list.intersect(other.iter()),
                &left.intersection(&right).copied().collect(),
            );
            assert_matches(&list.union(other.iter()), &left.union(&right).copied().collect());
            assert_matches(
                &list.subtract(other.iter()),
                &left.difference(&right).copied().collect(),
            );
            assert_eq!(list.is_subset_of(other.iter()), left.is_subset(&right));

            let bound = rng.gen_range(-14..=14);
            let mut at_least = list.clone();
            at_least.retain_at_least(bound);
            assert_matches(&at_least, &left.range(bound..).copied().collect());

            let mut at_most = list.clone();
            at_most.retain_at_most(bound);
            assert_matches(&at_most, &left.range(..=bound).copied().collect());

            let value = rng.gen_range(-13..=13);
            let mut removed = list.clone();
            let mut model = left.clone();
            assert_eq!(removed.remove(value), model.remove(&value));
            assert_matches(&removed, &model);
        }
    }
}

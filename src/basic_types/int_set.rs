use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use super::RangeList;
use super::ValueRange;

/// An immutable set of integers which is shared between every space and propagator holding it.
///
/// Copying a space only copies the handle; the ranges themselves are released when the last
/// holder is disposed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntSet {
    ranges: Arc<RangeList>,
}

impl IntSet {
    pub fn empty() -> IntSet {
        IntSet::from(RangeList::empty())
    }

    pub fn interval(min: i32, max: i32) -> IntSet {
        IntSet::from(RangeList::interval(min, max))
    }

    pub fn from_values(values: impl IntoIterator<Item = i32>) -> IntSet {
        IntSet::from(RangeList::from_values(values))
    }

    pub fn from_ranges(ranges: impl IntoIterator<Item = ValueRange>) -> IntSet {
        IntSet::from(RangeList::from_ranges(ranges))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn size(&self) -> u64 {
        self.ranges.size()
    }

    pub fn min(&self) -> Option<i32> {
        self.ranges.min()
    }

    pub fn max(&self) -> Option<i32> {
        self.ranges.max()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.ranges.contains(value)
    }

    pub fn num_ranges(&self) -> usize {
        self.ranges.num_ranges()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, ValueRange>> {
        self.ranges.iter()
    }

    pub fn as_range_list(&self) -> &RangeList {
        &self.ranges
    }

    /// The number of handles to the same set, including this one.
    pub fn num_holders(&self) -> usize {
        Arc::strong_count(&self.ranges)
    }

    /// Bytes owned by the shared ranges.
    pub(crate) fn heap_bytes(&self) -> usize {
        self.ranges.num_ranges() * std::mem::size_of::<ValueRange>()
    }
}

impl From<RangeList> for IntSet {
    fn from(ranges: RangeList) -> Self {
        IntSet {
            ranges: Arc::new(ranges),
        }
    }
}

impl FromIterator<i32> for IntSet {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        IntSet::from_values(iter)
    }
}

impl Display for IntSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::IntSet;

    #[test]
    fn clones_share_storage() {
        let set = IntSet::from_values([1, 2, 3, 7]);
        assert_eq!(set.num_holders(), 1);

        let copy = set.clone();
        assert_eq!(set.num_holders(), 2);
        assert_eq!(copy.num_ranges(), 2);

        drop(copy);
        assert_eq!(set.num_holders(), 1);
    }
}

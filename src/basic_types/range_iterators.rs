//! Combinators over range sequences.
//!
//! Every combinator consumes iterators that yield [`ValueRange`]s sorted by their lower bound and
//! pairwise disjoint, and produces a sequence with the same property. They are lazy, so a
//! propagator can narrow a domain by an expression such as `Diff(Inter(x, y), z)` without
//! materialising the intermediate sets.

use std::iter::Peekable;

use super::ValueRange;

macro_rules! opaque_debug {
    ($name:ident) => {
        impl<I: Iterator, J: Iterator> std::fmt::Debug for $name<I, J> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

opaque_debug!(Inter);
opaque_debug!(Union);
opaque_debug!(Diff);

/// The intersection of two range sequences.
pub struct Inter<I: Iterator, J: Iterator> {
    left: Peekable<I>,
    right: Peekable<J>,
}

impl<I, J> Inter<I, J>
where
    I: Iterator<Item = ValueRange>,
    J: Iterator<Item = ValueRange>,
{
    pub fn new(left: I, right: J) -> Self {
        Inter {
            left: left.peekable(),
            right: right.peekable(),
        }
    }
}

impl<I, J> Iterator for Inter<I, J>
where
    I: Iterator<Item = ValueRange>,
    J: Iterator<Item = ValueRange>,
{
    type Item = ValueRange;

    fn next(&mut self) -> Option<ValueRange> {
        loop {
            let left = *self.left.peek()?;
            let right = *self.right.peek()?;

            if left.max < right.min {
                let _ = self.left.next();
                continue;
            }
            if right.max < left.min {
                let _ = self.right.next();
                continue;
            }

            let overlap = ValueRange {
                min: left.min.max(right.min),
                max: left.max.min(right.max),
            };

            if left.max < right.max {
                let _ = self.left.next();
            } else {
                let _ = self.right.next();
            }

            return Some(overlap);
        }
    }
}

/// The union of two range sequences. Touching ranges are merged.
pub struct Union<I: Iterator, J: Iterator> {
    left: Peekable<I>,
    right: Peekable<J>,
}

impl<I, J> Union<I, J>
where
    I: Iterator<Item = ValueRange>,
    J: Iterator<Item = ValueRange>,
{
    pub fn new(left: I, right: J) -> Self {
        Union {
            left: left.peekable(),
            right: right.peekable(),
        }
    }

    fn next_smallest(&mut self) -> Option<ValueRange> {
        match (self.left.peek(), self.right.peek()) {
            (Some(left), Some(right)) if left.min <= right.min => self.left.next(),
            (Some(_), Some(_)) => self.right.next(),
            (Some(_), None) => self.left.next(),
            (None, _) => self.right.next(),
        }
    }

    fn peek_smallest_min(&mut self) -> Option<i32> {
        match (self.left.peek(), self.right.peek()) {
            (Some(left), Some(right)) => Some(left.min.min(right.min)),
            (Some(range), None) | (None, Some(range)) => Some(range.min),
            (None, None) => None,
        }
    }
}

impl<I, J> Iterator for Union<I, J>
where
    I: Iterator<Item = ValueRange>,
    J: Iterator<Item = ValueRange>,
{
    type Item = ValueRange;

    fn next(&mut self) -> Option<ValueRange> {
        let mut current = self.next_smallest()?;

        while let Some(min) = self.peek_smallest_min() {
            if min as i64 > current.max as i64 + 1 {
                break;
            }

            if let Some(range) = self.next_smallest() {
                current.max = current.max.max(range.max);
            }
        }

        Some(current)
    }
}

/// The values of the first sequence which are not in the second.
pub struct Diff<I: Iterator, J: Iterator> {
    left: I,
    right: Peekable<J>,
    pending: Option<ValueRange>,
}

impl<I, J> Diff<I, J>
where
    I: Iterator<Item = ValueRange>,
    J: Iterator<Item = ValueRange>,
{
    pub fn new(left: I, right: J) -> Self {
        Diff {
            left,
            right: right.peekable(),
            pending: None,
        }
    }
}

impl<I, J> Iterator for Diff<I, J>
where
    I: Iterator<Item = ValueRange>,
    J: Iterator<Item = ValueRange>,
{
    type Item = ValueRange;

    fn next(&mut self) -> Option<ValueRange> {
        loop {
            let current = match self.pending.take() {
                Some(range) => range,
                None => self.left.next()?,
            };

            while self
                .right
                .peek()
                .is_some_and(|removed| removed.max < current.min)
            {
                let _ = self.right.next();
            }

            let removed = match self.right.peek() {
                Some(removed) if removed.min <= current.max => *removed,
                _ => return Some(current),
            };

            if removed.min > current.min {
                if removed.max < current.max {
                    self.pending = Some(ValueRange {
                        min: removed.max + 1,
                        max: current.max,
                    });
                }

                return Some(ValueRange {
                    min: current.min,
                    max: removed.min - 1,
                });
            }

            if removed.max < current.max {
                self.pending = Some(ValueRange {
                    min: removed.max + 1,
                    max: current.max,
                });
            }
        }
    }
}

/// The pointwise negation of a range sequence: `[a, b]` becomes `[-b, -a]`.
///
/// Negation reverses the order of the ranges, so the source must be double-ended.
#[derive(Debug)]
pub struct Negate<I> {
    source: I,
}

impl<I: DoubleEndedIterator<Item = ValueRange>> Negate<I> {
    pub fn new(source: I) -> Self {
        Negate { source }
    }
}

impl<I: DoubleEndedIterator<Item = ValueRange>> Iterator for Negate<I> {
    type Item = ValueRange;

    fn next(&mut self) -> Option<ValueRange> {
        self.source.next_back().map(|range| ValueRange {
            min: -range.max,
            max: -range.min,
        })
    }
}

impl<I: DoubleEndedIterator<Item = ValueRange>> DoubleEndedIterator for Negate<I> {
    fn next_back(&mut self) -> Option<ValueRange> {
        self.source.next().map(|range| ValueRange {
            min: -range.max,
            max: -range.min,
        })
    }
}

/// Adds a constant to every range of a sequence.
#[derive(Debug)]
pub struct Offset<I> {
    source: I,
    offset: i32,
}

impl<I: Iterator<Item = ValueRange>> Offset<I> {
    pub fn new(source: I, offset: i32) -> Self {
        Offset { source, offset }
    }
}

impl<I: Iterator<Item = ValueRange>> Iterator for Offset<I> {
    type Item = ValueRange;

    fn next(&mut self) -> Option<ValueRange> {
        self.source.next().map(|range| ValueRange {
            min: range.min + self.offset,
            max: range.max + self.offset,
        })
    }
}

impl<I: DoubleEndedIterator<Item = ValueRange>> DoubleEndedIterator for Offset<I> {
    fn next_back(&mut self) -> Option<ValueRange> {
        self.source.next_back().map(|range| ValueRange {
            min: range.min + self.offset,
            max: range.max + self.offset,
        })
    }
}

/// How two sets relate to each other, as reported by [`compare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetComparison {
    /// Every value of the first set is in the second.
    Subset,
    /// The sets have no value in common.
    Disjoint,
    /// Neither of the above.
    None,
}

/// Compare two range sequences. An empty first sequence is reported as [`SetComparison::Subset`].
pub fn compare(
    left: impl IntoIterator<Item = ValueRange>,
    right: impl IntoIterator<Item = ValueRange>,
) -> SetComparison {
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    let mut is_subset = true;
    let mut is_disjoint = true;

    while let (Some(l), Some(r)) = (left.peek().copied(), right.peek().copied()) {
        if l.max < r.min {
            is_subset = false;
            let _ = left.next();
        } else if r.max < l.min {
            let _ = right.next();
        } else {
            is_disjoint = false;
            if l.min < r.min || l.max > r.max {
                is_subset = false;
            }

            if l.max <= r.max {
                let _ = left.next();
            } else {
                let _ = right.next();
            }
        }

        if !is_subset && !is_disjoint {
            return SetComparison::None;
        }
    }

    if left.peek().is_some() {
        is_subset = false;
    }

    if is_subset {
        SetComparison::Subset
    } else if is_disjoint {
        SetComparison::Disjoint
    } else {
        SetComparison::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(list: &[(i32, i32)]) -> Vec<ValueRange> {
        list.iter()
            .map(|&(min, max)| ValueRange::new(min, max))
            .collect()
    }

    #[test]
    fn negation_reverses_and_mirrors() {
        let negated = Negate::new(ranges(&[(1, 2), (5, 7)]).into_iter()).collect::<Vec<_>>();

        assert_eq!(negated, ranges(&[(-7, -5), (-2, -1)]));
    }

    #[test]
    fn intersection_of_interleaved_sequences() {
        let left = ranges(&[(0, 4), (8, 12), (20, 20)]);
        let right = ranges(&[(2, 9), (11, 25)]);

        let result = Inter::new(left.into_iter(), right.into_iter()).collect::<Vec<_>>();

        assert_eq!(result, ranges(&[(2, 4), (8, 9), (11, 12), (20, 20)]));
    }

    #[test]
    fn union_merges_adjacent_ranges() {
        let left = ranges(&[(0, 1), (6, 6)]);
        let right = ranges(&[(2, 3), (5, 5), (10, 11)]);

        let result = Union::new(left.into_iter(), right.into_iter()).collect::<Vec<_>>();

        assert_eq!(result, ranges(&[(0, 3), (5, 6), (10, 11)]));
    }

    #[test]
    fn difference_punches_holes() {
        let left = ranges(&[(0, 10), (15, 16)]);
        let right = ranges(&[(-5, 0), (3, 4), (6, 6), (10, 15)]);

        let result = Diff::new(left.into_iter(), right.into_iter()).collect::<Vec<_>>();

        assert_eq!(result, ranges(&[(1, 2), (5, 5), (7, 9), (16, 16)]));
    }

    #[test]
    fn difference_with_nothing_left() {
        let left = ranges(&[(3, 5)]);
        let right = ranges(&[(0, 10)]);

        assert_eq!(Diff::new(left.into_iter(), right.into_iter()).next(), None);
    }

    #[test]
    fn offset_shifts_every_range() {
        let shifted = Offset::new(ranges(&[(1, 2), (5, 7)]).into_iter(), -3).collect::<Vec<_>>();

        assert_eq!(shifted, ranges(&[(-2, -1), (2, 4)]));
    }

    #[test]
    fn comparison_outcomes() {
        let domain = ranges(&[(1, 3), (7, 8)]);

        assert_eq!(compare(domain.clone(), ranges(&[(0, 10)])), SetComparison::Subset);
        assert_eq!(
            compare(domain.clone(), ranges(&[(4, 6), (9, 9)])),
            SetComparison::Disjoint
        );
        assert_eq!(compare(domain.clone(), ranges(&[(3, 7)])), SetComparison::None);
        assert_eq!(compare(domain, ranges(&[(1, 3)])), SetComparison::None);
    }
}

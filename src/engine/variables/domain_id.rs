use std::fmt::Display;
use std::fmt::Formatter;

use enumset::EnumSet;

use super::IntegerVariable;
use super::TransformableVariable;
use crate::basic_types::ValueRange;
use crate::containers::StorageKey;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;
use crate::engine::variables::AffineView;

/// A handle to an integer variable of a space. The same handle refers to the corresponding
/// variable in every copy of that space.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DomainId {
    pub id: u32,
}

impl DomainId {
    pub fn new(id: u32) -> Self {
        DomainId { id }
    }
}

impl IntegerVariable for DomainId {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        assignments.get_lower_bound(*self)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        assignments.get_upper_bound(*self)
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        assignments.is_value_in_domain(*self, value)
    }

    fn size(&self, assignments: &Assignments) -> u64 {
        assignments.get_size(*self)
    }

    fn iterate_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl DoubleEndedIterator<Item = ValueRange> + 'a {
        assignments.get_ranges(*self).iter().copied()
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.tighten_lower_bound(*self, value)
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.tighten_upper_bound(*self, value)
    }

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        assignments.remove_value(*self, value)
    }

    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain> {
        assignments.make_assignment(*self, value)
    }

    fn intersect_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.intersect_domain(*self, ranges)
    }

    fn subtract_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.subtract_from_domain(*self, ranges)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>) {
        watchers.watch_all(*self, events);
    }

    fn unpack_event(&self, event: IntDomainEvent) -> IntDomainEvent {
        event
    }

    fn unpack_delta(&self, delta: Delta) -> Delta {
        delta
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

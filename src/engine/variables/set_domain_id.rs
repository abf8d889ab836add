use std::fmt::Display;
use std::fmt::Formatter;

use enumset::EnumSet;

use super::SetVariable;
use crate::basic_types::RangeList;
use crate::basic_types::ValueRange;
use crate::containers::StorageKey;
use crate::engine::cp::domain_events::SetDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;

/// A handle to a set variable of a space.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetDomainId {
    pub id: u32,
}

impl SetVariable for SetDomainId {
    fn glb_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl Iterator<Item = ValueRange> + 'a {
        assignments.get_glb(*self).iter()
    }

    fn lub_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl Iterator<Item = ValueRange> + 'a {
        assignments.get_lub(*self).iter()
    }

    fn glb_size(&self, assignments: &Assignments) -> u64 {
        assignments.get_glb(*self).size()
    }

    fn lub_size(&self, assignments: &Assignments) -> u64 {
        assignments.get_lub(*self).size()
    }

    fn card_min(&self, assignments: &Assignments) -> u64 {
        assignments.get_card_min(*self)
    }

    fn card_max(&self, assignments: &Assignments) -> u64 {
        assignments.get_card_max(*self)
    }

    fn in_glb(&self, assignments: &Assignments, value: i32) -> bool {
        assignments.get_glb(*self).contains(value)
    }

    fn in_lub(&self, assignments: &Assignments, value: i32) -> bool {
        assignments.get_lub(*self).contains(value)
    }

    fn include(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.include_in_set(*self, ranges)
    }

    fn exclude(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.exclude_from_set(*self, ranges)
    }

    fn intersect_lub(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.intersect_set_lub(*self, ranges)
    }

    fn set_card_min(
        &self,
        assignments: &mut Assignments,
        card_min: u64,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.tighten_card_min(*self, card_min)
    }

    fn set_card_max(
        &self,
        assignments: &mut Assignments,
        card_max: u64,
    ) -> Result<ModEvent, EmptyDomain> {
        assignments.tighten_card_max(*self, card_max)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<SetDomainEvent>) {
        watchers.watch_all_set(*self, events);
    }
}

impl SetDomainId {
    /// The value of a fixed set variable.
    pub fn value(&self, assignments: &Assignments) -> RangeList {
        assignments.get_glb(*self).clone()
    }
}

impl StorageKey for SetDomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        SetDomainId { id: index as u32 }
    }
}

impl Display for SetDomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.id)
    }
}

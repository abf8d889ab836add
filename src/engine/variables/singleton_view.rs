use enumset::EnumSet;

use super::IntegerVariable;
use super::SetVariable;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::domain_events::SetDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;

/// Presents an integer view `x` as the set `{x}`, so set propagators can relate sets to integers.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SingletonView<Var> {
    inner: Var,
}

impl<Var: IntegerVariable> SingletonView<Var> {
    pub fn new(inner: Var) -> Self {
        SingletonView { inner }
    }
}

impl<Var: IntegerVariable> SetVariable for SingletonView<Var> {
    fn glb_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl Iterator<Item = ValueRange> + 'a {
        self.inner
            .is_fixed(assignments)
            .then(|| ValueRange::singleton(self.inner.lower_bound(assignments)))
            .into_iter()
    }

    fn lub_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl Iterator<Item = ValueRange> + 'a {
        self.inner.iterate_ranges(assignments)
    }

    fn glb_size(&self, assignments: &Assignments) -> u64 {
        u64::from(self.inner.is_fixed(assignments))
    }

    fn lub_size(&self, assignments: &Assignments) -> u64 {
        self.inner.size(assignments)
    }

    fn card_min(&self, _: &Assignments) -> u64 {
        1
    }

    fn card_max(&self, _: &Assignments) -> u64 {
        1
    }

    fn in_glb(&self, assignments: &Assignments, value: i32) -> bool {
        self.inner.is_fixed(assignments) && self.inner.lower_bound(assignments) == value
    }

    fn in_lub(&self, assignments: &Assignments, value: i32) -> bool {
        self.inner.contains(assignments, value)
    }

    fn include(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        let mut ranges = ranges.into_iter();
        let Some(first) = ranges.next() else {
            return Ok(ModEvent::None);
        };

        if first.min != first.max || ranges.next().is_some() {
            return Err(EmptyDomain);
        }

        self.inner.assign(assignments, first.min)
    }

    fn exclude(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        self.inner.subtract_ranges(assignments, ranges)
    }

    fn intersect_lub(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        self.inner.intersect_ranges(assignments, ranges)
    }

    fn set_card_min(&self, _: &mut Assignments, card_min: u64) -> Result<ModEvent, EmptyDomain> {
        if card_min > 1 {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn set_card_max(&self, _: &mut Assignments, card_max: u64) -> Result<ModEvent, EmptyDomain> {
        if card_max < 1 {
            Err(EmptyDomain)
        } else {
            Ok(ModEvent::None)
        }
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<SetDomainEvent>) {
        let mut int_events = EnumSet::empty();
        if events.contains(SetDomainEvent::Glb) || events.contains(SetDomainEvent::Assign) {
            let _ = int_events.insert(IntDomainEvent::Assign);
        }
        if events.contains(SetDomainEvent::Lub) {
            let _ = int_events.insert(IntDomainEvent::Removal);
        }

        self.inner.watch_all(watchers, int_events);
    }
}

use std::fmt::Debug;

use enumset::EnumSet;

use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::SetDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;

/// A view on a set domain, described by a lower bound (values certainly in the set), an upper
/// bound (values possibly in the set) and cardinality bounds.
pub trait SetVariable: Clone + Debug + Send + Sync + 'static {
    fn glb_ranges<'a>(&'a self, assignments: &'a Assignments)
        -> impl Iterator<Item = ValueRange> + 'a;

    fn lub_ranges<'a>(&'a self, assignments: &'a Assignments)
        -> impl Iterator<Item = ValueRange> + 'a;

    fn glb_size(&self, assignments: &Assignments) -> u64;

    fn lub_size(&self, assignments: &Assignments) -> u64;

    fn card_min(&self, assignments: &Assignments) -> u64;

    fn card_max(&self, assignments: &Assignments) -> u64;

    fn is_fixed(&self, assignments: &Assignments) -> bool {
        self.glb_size(assignments) == self.lub_size(assignments)
    }

    /// Whether `value` is certainly in the set.
    fn in_glb(&self, assignments: &Assignments, value: i32) -> bool;

    /// Whether `value` may still be in the set.
    fn in_lub(&self, assignments: &Assignments, value: i32) -> bool;

    /// Add the values in `ranges` to the lower bound.
    fn include(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Remove the values in `ranges` from the upper bound.
    fn exclude(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Restrict the upper bound to the values in `ranges`.
    fn intersect_lub(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain>;

    fn set_card_min(
        &self,
        assignments: &mut Assignments,
        card_min: u64,
    ) -> Result<ModEvent, EmptyDomain>;

    fn set_card_max(
        &self,
        assignments: &mut Assignments,
        card_max: u64,
    ) -> Result<ModEvent, EmptyDomain>;

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<SetDomainEvent>);
}

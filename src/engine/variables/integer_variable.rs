use std::fmt::Debug;
use std::hash::Hash;

use enumset::EnumSet;

use super::TransformableVariable;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::Delta;
use crate::engine::cp::domain_events::IntDomainEvent;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Watchers;

/// A view on an integer domain.
///
/// Propagators are written once against this trait and can then be instantiated with plain
/// variables, affine views, literals or constants. Every narrowing operation reports how the
/// underlying domain changed, or fails with [`EmptyDomain`] without touching it.
pub trait IntegerVariable:
    Clone + PartialEq + Eq + Hash + Debug + Send + Sync + 'static + TransformableVariable<Self::AffineView>
{
    type AffineView: IntegerVariable;

    fn lower_bound(&self, assignments: &Assignments) -> i32;

    fn upper_bound(&self, assignments: &Assignments) -> i32;

    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// The number of values in the domain.
    fn size(&self, assignments: &Assignments) -> u64;

    fn is_fixed(&self, assignments: &Assignments) -> bool {
        self.lower_bound(assignments) == self.upper_bound(assignments)
    }

    /// The domain as sorted, disjoint, non-adjacent ranges.
    fn iterate_ranges<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl DoubleEndedIterator<Item = ValueRange> + 'a;

    /// The values of the domain in increasing order.
    fn iterate_domain<'a>(
        &'a self,
        assignments: &'a Assignments,
    ) -> impl Iterator<Item = i32> + 'a {
        self.iterate_ranges(assignments).flat_map(ValueRange::values)
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain>;

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain>;

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain>;

    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<ModEvent, EmptyDomain>;

    /// Keep only the values in `ranges`, which must be sorted and disjoint.
    fn intersect_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Remove the values in `ranges`, which must be sorted and disjoint.
    fn subtract_ranges(
        &self,
        assignments: &mut Assignments,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain>;

    /// Subscribe to the given events of the underlying domain, translated to the view.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);

    /// Translate an event on the underlying domain into an event on this view.
    fn unpack_event(&self, event: IntDomainEvent) -> IntDomainEvent;

    /// Translate the delta of the underlying domain into values of this view.
    fn unpack_delta(&self, delta: Delta) -> Delta;
}

use super::Propagator;
use super::PropagatorId;
use crate::basic_types::ValueRange;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::cp::Region;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVariable;

/// [`PropagationContext`] gives read-only access to the domains of a space. It is handed to
/// advisors and branchers, which may inspect but never narrow domains.
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// [`PropagationContextMut`] is passed to [`Propagator::propagate`]. It is the only way a
/// propagator communicates with the space while it runs: it reads and narrows domains, borrows
/// scratch memory from the [`Region`], and requests that the propagator be replaced by a simpler
/// one through [`PropagationContextMut::rewrite`].
pub struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
    region: &'a Region,
    rewrites: &'a mut Vec<Box<dyn Propagator>>,
    propagator: PropagatorId,
}

impl std::fmt::Debug for PropagationContextMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationContextMut")
            .field("propagator", &self.propagator)
            .field("num_rewrites", &self.rewrites.len())
            .finish_non_exhaustive()
    }
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        assignments: &'a mut Assignments,
        region: &'a Region,
        rewrites: &'a mut Vec<Box<dyn Propagator>>,
        propagator: PropagatorId,
    ) -> Self {
        PropagationContextMut {
            assignments,
            region,
            rewrites,
            propagator,
        }
    }

    /// The scratch arena of the space. Everything allocated in it is released when the
    /// propagator returns.
    pub fn region(&self) -> &'a Region {
        self.region
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }

    /// Replace the running propagator by `propagator`. The caller must return
    /// [`PropagatorStatus::Subsumed`](crate::basic_types::PropagatorStatus::Subsumed); the
    /// engine then disposes the running propagator and posts the replacement.
    pub fn rewrite(&mut self, propagator: impl Propagator + 'static) {
        self.rewrites.push(Box::new(propagator));
    }
}

/// A trait which defines common methods for retrieving the [`Assignments`] from the structure
/// which implements this trait.
pub trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

mod private {
    use super::*;

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextMut<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }
}

/// Domain queries shared by every context.
pub trait ReadDomains: HasAssignments {
    /// Returns `true` if the domain of the given variable is singleton.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        var.is_fixed(self.assignments())
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn size<Var: IntegerVariable>(&self, var: &Var) -> u64 {
        var.size(self.assignments())
    }

    fn iterate_ranges<'a, Var: IntegerVariable>(
        &'a self,
        var: &'a Var,
    ) -> impl DoubleEndedIterator<Item = ValueRange> + 'a {
        var.iterate_ranges(self.assignments())
    }

    fn iterate_domain<'a, Var: IntegerVariable>(
        &'a self,
        var: &'a Var,
    ) -> impl Iterator<Item = i32> + 'a {
        var.iterate_domain(self.assignments())
    }

    fn glb_ranges<'a, Var: SetVariable>(
        &'a self,
        var: &'a Var,
    ) -> impl Iterator<Item = ValueRange> + 'a {
        var.glb_ranges(self.assignments())
    }

    fn lub_ranges<'a, Var: SetVariable>(
        &'a self,
        var: &'a Var,
    ) -> impl Iterator<Item = ValueRange> + 'a {
        var.lub_ranges(self.assignments())
    }

    fn in_glb<Var: SetVariable>(&self, var: &Var, value: i32) -> bool {
        var.in_glb(self.assignments(), value)
    }

    fn in_lub<Var: SetVariable>(&self, var: &Var, value: i32) -> bool {
        var.in_lub(self.assignments(), value)
    }

    fn glb_size<Var: SetVariable>(&self, var: &Var) -> u64 {
        var.glb_size(self.assignments())
    }

    fn lub_size<Var: SetVariable>(&self, var: &Var) -> u64 {
        var.lub_size(self.assignments())
    }

    fn card_min<Var: SetVariable>(&self, var: &Var) -> u64 {
        var.card_min(self.assignments())
    }

    fn card_max<Var: SetVariable>(&self, var: &Var) -> u64 {
        var.card_max(self.assignments())
    }

    fn is_set_fixed<Var: SetVariable>(&self, var: &Var) -> bool {
        var.is_fixed(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

// Integer narrowing.
impl PropagationContextMut<'_> {
    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        var.set_lower_bound(self.assignments, bound)
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        var.set_upper_bound(self.assignments, bound)
    }

    pub fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        var.remove(self.assignments, value)
    }

    pub fn assign<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<ModEvent, EmptyDomain> {
        var.assign(self.assignments, value)
    }

    /// Keep only the values of `var` which occur in `ranges`. The ranges must be sorted and
    /// disjoint, such as the output of the range iterators.
    pub fn intersect<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        var.intersect_ranges(self.assignments, ranges)
    }

    /// Remove the values in `ranges` from `var`. The ranges must be sorted and disjoint.
    pub fn subtract<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        var.subtract_ranges(self.assignments, ranges)
    }
}

// Set narrowing.
impl PropagationContextMut<'_> {
    pub fn include<Var: SetVariable>(
        &mut self,
        var: &Var,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        var.include(self.assignments, ranges)
    }

    pub fn exclude<Var: SetVariable>(
        &mut self,
        var: &Var,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        var.exclude(self.assignments, ranges)
    }

    pub fn intersect_lub<Var: SetVariable>(
        &mut self,
        var: &Var,
        ranges: impl IntoIterator<Item = ValueRange>,
    ) -> Result<ModEvent, EmptyDomain> {
        var.intersect_lub(self.assignments, ranges)
    }

    pub fn set_card_min<Var: SetVariable>(
        &mut self,
        var: &Var,
        card_min: u64,
    ) -> Result<ModEvent, EmptyDomain> {
        var.set_card_min(self.assignments, card_min)
    }

    pub fn set_card_max<Var: SetVariable>(
        &mut self,
        var: &Var,
        card_max: u64,
    ) -> Result<ModEvent, EmptyDomain> {
        var.set_card_max(self.assignments, card_max)
    }
}

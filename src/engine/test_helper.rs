#![cfg(any(test, doc))]
//! This module exposes helpers that aid testing of propagators. The [`TestSpace`] allows setting
//! up specific scenarios under which to test the various operations of a propagator, without
//! going through the scheduler of a [`Space`](crate::engine::Space).
use super::DebugHelper;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::basic_types::RangeList;
use crate::basic_types::ValueRange;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::PropagatorStore;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::Region;
use crate::engine::cp::SetDomain;
use crate::engine::cp::WatchListCP;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::variables::SetDomainId;
use crate::engine::variables::SetVariable;

/// A container for variables and propagators, which can be used to test propagators one
/// invocation at a time.
#[derive(Default, Debug)]
pub(crate) struct TestSpace {
    assignments: Assignments,
    watch_list: WatchListCP,
    propagators: PropagatorStore,
    region: Region,
}

#[allow(unused, reason = "not every helper is used by every test")]
impl TestSpace {
    pub(crate) fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        assert!(lb <= ub, "cannot create a variable with an empty domain");

        let domain = self.assignments.new_int_domain(RangeList::interval(lb, ub));
        self.watch_list.grow_int(domain);
        domain
    }

    pub(crate) fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        assert!(
            !values.is_empty(),
            "cannot create a variable with an empty domain"
        );

        let domain = self.assignments.new_int_domain(RangeList::from_values(values));
        self.watch_list.grow_int(domain);
        domain
    }

    pub(crate) fn new_literal(&mut self) -> Literal {
        Literal::new(self.new_variable(0, 1))
    }

    pub(crate) fn new_set_variable(&mut self, glb: &[i32], lub: &[i32]) -> SetDomainId {
        let glb = RangeList::from_values(glb.iter().copied());
        let lub = RangeList::from_values(lub.iter().copied());

        let domain = SetDomain::new(glb, lub, 0, u64::MAX)
            .expect("the bounds of a test set variable must be consistent");
        let set = self.assignments.new_set_domain(domain);
        self.watch_list.grow_set(set);
        set
    }

    /// Initialise the propagator and run it once.
    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<PropagatorId, Inconsistency> {
        let id = self.propagators.next_id();
        let mut propagator: Box<dyn Propagator> = Box::new(propagator);

        propagator.initialise(&mut PropagatorInitialisationContext::new(
            &mut self.watch_list,
            id,
            &self.assignments,
        ))?;

        let _ = self.propagators.alloc(propagator);

        let _ = self.propagate(id)?;

        Ok(id)
    }

    /// Run a single propagator once. Pending events are discarded, since nothing else is
    /// scheduled by this helper.
    pub(crate) fn propagate(&mut self, propagator: PropagatorId) -> PropagationStatusCP {
        let mut rewrites = Vec::new();
        let context = PropagationContextMut::new(
            &mut self.assignments,
            &self.region,
            &mut rewrites,
            propagator,
        );

        let status = self
            .propagators
            .get_mut(propagator)
            .expect("the propagator is not subsumed")
            .propagate(context);

        self.region.reset();
        self.assignments.events_mut().clear();

        status
    }

    /// Run the propagator until it no longer changes a domain.
    pub(crate) fn propagate_until_fixed_point(
        &mut self,
        propagator: PropagatorId,
    ) -> PropagationStatusCP {
        loop {
            let before = self.assignments.clone();
            let status = self.propagate(propagator)?;

            let unchanged = self
                .assignments
                .int_domains()
                .all(|domain| before.get_domain(domain) == self.assignments.get_domain(domain))
                && self.assignments.set_domains().all(|set| {
                    before.get_glb(set) == self.assignments.get_glb(set)
                        && before.get_lub(set) == self.assignments.get_lub(set)
                });

            if status == PropagatorStatus::Subsumed || unchanged {
                assert!(
                    status == PropagatorStatus::Subsumed
                        || DebugHelper::debug_fixed_point_propagation(
                            &self.assignments,
                            &self.propagators
                        ),
                    "the propagator did not reach a fixpoint"
                );
                return Ok(status);
            }
        }
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        var.contains(&self.assignments, value)
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.lower_bound(&self.assignments)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.upper_bound(&self.assignments)
    }

    pub(crate) fn set_lower_bound<Var: IntegerVariable>(&mut self, var: Var, bound: i32) {
        let result = var.set_lower_bound(&mut self.assignments, bound);
        assert!(
            result.is_ok(),
            "The provided value to `set_lower_bound` caused an empty domain, generally the propagator should not be notified of this change!"
        );
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(&mut self, var: Var, bound: i32) {
        let result = var.set_upper_bound(&mut self.assignments, bound);
        assert!(
            result.is_ok(),
            "The provided value to `set_upper_bound` caused an empty domain, generally the propagator should not be notified of this change!"
        );
    }

    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: Var,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        var.remove(&mut self.assignments, value).map(|_| ())
    }

    pub(crate) fn set_literal(&mut self, literal: Literal, value: bool) {
        let result = if value {
            literal.set_true(&mut self.assignments)
        } else {
            literal.set_false(&mut self.assignments)
        };
        assert!(result.is_ok(), "the literal is already assigned the opposite value");
    }

    pub(crate) fn is_literal_true(&self, literal: Literal) -> bool {
        literal.is_true(&self.assignments)
    }

    pub(crate) fn is_literal_false(&self, literal: Literal) -> bool {
        literal.is_false(&self.assignments)
    }

    pub(crate) fn include<Var: SetVariable>(&mut self, set: Var, value: i32) {
        let result = set.include(
            &mut self.assignments,
            [ValueRange::singleton(value)],
        );
        assert!(result.is_ok(), "{value} cannot be included in the set");
    }

    pub(crate) fn exclude<Var: SetVariable>(&mut self, set: Var, value: i32) {
        let result = set.exclude(
            &mut self.assignments,
            [ValueRange::singleton(value)],
        );
        assert!(result.is_ok(), "{value} cannot be excluded from the set");
    }

    pub(crate) fn glb(&self, set: SetDomainId) -> &RangeList {
        self.assignments.get_glb(set)
    }

    pub(crate) fn lub(&self, set: SetDomainId) -> &RangeList {
        self.assignments.get_lub(set)
    }

    pub(crate) fn assert_domain<Var: IntegerVariable>(&self, var: Var, domain: Vec<i32>) {
        let expected = RangeList::from_values(domain);
        let actual = RangeList::from_ranges(var.iterate_ranges(&self.assignments));

        assert_eq!(
            expected, actual,
            "The expected domain {expected} did not match the actual domain {actual}"
        );
    }

    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual_lb = var.lower_bound(&self.assignments);
        let actual_ub = var.upper_bound(&self.assignments);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }
}

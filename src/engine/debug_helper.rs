use std::fmt::Debug;
use std::fmt::Formatter;

use log::warn;

use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::PropagatorStore;
use crate::engine::cp::Assignments;
use crate::engine::cp::Region;

#[derive(Copy, Clone)]
pub(crate) struct DebugDyn<'a> {
    trait_name: &'a str,
}

impl<'a> DebugDyn<'a> {
    pub(crate) fn from(trait_name: &'a str) -> Self {
        DebugDyn { trait_name }
    }
}

impl Debug for DebugDyn<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<dyn {}>", self.trait_name)
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct DebugHelper {}

impl DebugHelper {
    /// Only to be called after the space reached a fixpoint without failing. Every live
    /// propagator is run once more, on a copy of the domains; if one of them narrows a domain or
    /// fails, the scheduler missed a propagation.
    pub(crate) fn debug_fixed_point_propagation(
        assignments: &Assignments,
        propagators: &PropagatorStore,
    ) -> bool {
        for (propagator_id, propagator) in propagators.iter_live() {
            let mut assignments_clone = assignments.clone();
            let mut propagator = dyn_clone::clone_box(propagator);
            let region = Region::default();
            let mut rewrites = Vec::new();

            let context = PropagationContextMut::new(
                &mut assignments_clone,
                &region,
                &mut rewrites,
                propagator_id,
            );

            if let Err(inconsistency) = propagator.propagate(context) {
                warn!(
                    "Propagator '{}' with id '{propagator_id}' seems to have missed a failure in its regular propagation: {inconsistency:?}",
                    propagator.name()
                );
                return false;
            }

            let missed = assignments
                .int_domains()
                .filter(|&domain| {
                    assignments.get_domain(domain) != assignments_clone.get_domain(domain)
                })
                .collect::<Vec<_>>();
            let missed_sets = assignments
                .set_domains()
                .filter(|&domain| {
                    assignments.get_glb(domain) != assignments_clone.get_glb(domain)
                        || assignments.get_lub(domain) != assignments_clone.get_lub(domain)
                        || assignments.get_card_min(domain) != assignments_clone.get_card_min(domain)
                        || assignments.get_card_max(domain) != assignments_clone.get_card_max(domain)
                })
                .collect::<Vec<_>>();

            if !missed.is_empty() || !missed_sets.is_empty() {
                for domain in missed {
                    warn!(
                        "Propagator '{}' with id '{propagator_id}' missed a narrowing of {domain}: {} became {}",
                        propagator.name(),
                        assignments.get_domain(domain),
                        assignments_clone.get_domain(domain),
                    );
                }
                for domain in missed_sets {
                    warn!(
                        "Propagator '{}' with id '{propagator_id}' missed a narrowing of {domain}",
                        propagator.name(),
                    );
                }
                return false;
            }
        }

        true
    }
}

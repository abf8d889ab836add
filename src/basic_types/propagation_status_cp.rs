use crate::engine::cp::EmptyDomain;

/// The result of invoking a propagator. Propagation either reaches one of the [`PropagatorStatus`]
/// outcomes or detects that the space cannot contain a solution.
pub type PropagationStatusCP = Result<PropagatorStatus, Inconsistency>;

/// What a propagator reports after a successful invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagatorStatus {
    /// The propagator is at a fixpoint; it is not scheduled again for changes it made itself.
    Fix,
    /// The propagator may not be at a fixpoint; it is scheduled again if its own changes match
    /// its subscriptions.
    NoFix,
    /// The propagator is entailed by the current domains and is removed from the space.
    Subsumed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A narrowing operation emptied a domain.
    EmptyDomain,
    /// The propagator found the current domains to be inconsistent without emptying a domain.
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

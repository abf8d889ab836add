use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagatorId;

/// A view registered by a propagator: the propagator together with the local id it gave the view.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub(crate) struct PropagatorVarId {
    pub(crate) propagator: PropagatorId,
    pub(crate) variable: LocalId,
}

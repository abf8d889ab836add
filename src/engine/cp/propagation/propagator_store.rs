use super::Propagator;
use super::PropagatorId;
use crate::containers::KeyedVec;
use crate::engine::debug_helper::DebugDyn;

/// The propagators of a space. Slots of disposed propagators stay empty so that identifiers are
/// never reused.
#[derive(Clone, Default)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Option<Box<dyn Propagator>>>,
    num_live: usize,
}

impl std::fmt::Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let propagators = self
            .propagators
            .iter()
            .map(|propagator| match propagator {
                Some(propagator) => DebugDyn::from(propagator.name()),
                None => DebugDyn::from("<disposed>"),
            })
            .collect::<Vec<_>>();

        f.debug_list().entries(propagators).finish()
    }
}

impl PropagatorStore {
    pub(crate) fn next_id(&self) -> PropagatorId {
        self.propagators.next_key()
    }

    pub(crate) fn alloc(&mut self, propagator: Box<dyn Propagator>) -> PropagatorId {
        self.num_live += 1;
        self.propagators.push(Some(propagator))
    }

    pub(crate) fn is_alive(&self, propagator_id: PropagatorId) -> bool {
        matches!(self.propagators.get(propagator_id), Some(Some(_)))
    }

    pub(crate) fn get_mut(&mut self, propagator_id: PropagatorId) -> Option<&mut Box<dyn Propagator>> {
        self.propagators.get_mut(propagator_id)?.as_mut()
    }

    /// Take the propagator out of its slot. It is put back with [`PropagatorStore::restore`] or
    /// dropped for good.
    pub(crate) fn take(&mut self, propagator_id: PropagatorId) -> Option<Box<dyn Propagator>> {
        let propagator = self.propagators.get_mut(propagator_id)?.take();
        if propagator.is_some() {
            self.num_live -= 1;
        }
        propagator
    }

    pub(crate) fn restore(&mut self, propagator_id: PropagatorId, propagator: Box<dyn Propagator>) {
        let slot = &mut self.propagators[propagator_id];
        if slot.is_none() {
            self.num_live += 1;
        }
        *slot = Some(propagator);
    }

    pub(crate) fn num_live(&self) -> usize {
        self.num_live
    }

    pub(crate) fn iter_live(&self) -> impl Iterator<Item = (PropagatorId, &dyn Propagator)> + '_ {
        self.propagators
            .iter_with_keys()
            .filter_map(|(id, propagator)| Some((id, propagator.as_deref()?)))
    }

    pub(crate) fn iter_live_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Propagator>> + '_ {
        self.propagators.iter_mut().filter_map(Option::as_mut)
    }
}

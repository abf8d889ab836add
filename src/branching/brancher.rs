use std::fmt::Debug;

use dyn_clone::DynClone;

use crate::containers::StorageKey;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
#[cfg(doc)]
use crate::engine::Space;

/// A trait for defining a branching strategy.
///
/// A brancher describes the alternatives at a choice point as a [`Choice`], and later applies one
/// of them with [`Brancher::commit`]. The alternatives of a choice must be mutually exclusive and
/// together cover every solution of the space. A choice only records positions and values, never
/// references into a space, so it can be committed on any copy of the space it was computed in.
/// The search engines rely on this to recompute spaces from an ancestor.
///
/// Branchers are copied together with their space.
pub trait Brancher: DynClone + Debug + Send {
    fn name(&self) -> &str;

    /// Whether the brancher has anything left to branch on in the given space.
    fn status(&mut self, context: PropagationContext) -> bool;

    /// Describe the alternatives at the current choice point. Only called after
    /// [`Brancher::status`] returned `true`.
    fn choice(&mut self, context: PropagationContext) -> Choice;

    /// Apply alternative `alternative` of `choice`.
    fn commit(
        &self,
        assignments: &mut Assignments,
        choice: &Choice,
        alternative: u32,
    ) -> Result<ModEvent, EmptyDomain>;
}

dyn_clone::clone_trait_object!(Brancher);

/// Identifies a brancher of a space. Identifiers are handed out in the order the branchers are
/// added, and stay valid in every copy of the space.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrancherId(u32);

impl StorageKey for BrancherId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        BrancherId(index as u32)
    }
}

/// The alternatives at a choice point: which variable of the brancher was selected (`position`)
/// and the value the alternatives are about. The [`Space`] stamps the choice with the brancher
/// that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub(crate) brancher: BrancherId,
    alternatives: u32,
    position: usize,
    value: i32,
}

impl Choice {
    pub fn new(alternatives: u32, position: usize, value: i32) -> Choice {
        Choice {
            brancher: BrancherId::default(),
            alternatives,
            position,
            value,
        }
    }

    pub fn brancher(&self) -> BrancherId {
        self.brancher
    }

    pub fn alternatives(&self) -> u32 {
        self.alternatives
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

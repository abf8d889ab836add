use crate::branching::Choice;
use crate::search::SearchStatistics;
use crate::Space;
use crate::SpaceStatus;

/// A choice point on the current path: the choice, the alternative being explored, and possibly
/// a copy of the space in which the choice was made.
#[derive(Debug)]
struct Edge {
    space: Option<Space>,
    choice: Choice,
    alternative: u32,
}

/// The path from the root of the search tree to the node being explored.
///
/// Only some edges keep a copy of their space. Any other space on the path is recomputed by
/// taking the copy of the deepest edge above it and committing the recorded alternatives.
#[derive(Debug)]
pub(crate) struct Path {
    edges: Vec<Edge>,
    num_copies: usize,
    copy_memory: usize,
}

impl Path {
    pub(crate) fn new() -> Path {
        Path {
            edges: Vec::new(),
            num_copies: 0,
            copy_memory: 0,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.edges.len()
    }

    /// Whether some edge keeps a copy from which deeper spaces can be recomputed.
    pub(crate) fn has_copy(&self) -> bool {
        self.num_copies > 0
    }

    /// The estimated memory of the copies on the path, in bytes.
    pub(crate) fn memory(&self) -> usize {
        self.copy_memory
    }

    /// Record a choice point. Its first alternative is explored next.
    pub(crate) fn push(&mut self, space: Option<Space>, choice: Choice) {
        if let Some(space) = &space {
            self.num_copies += 1;
            self.copy_memory += space.memory();
        }

        self.edges.push(Edge {
            space,
            choice,
            alternative: 0,
        });
    }

    /// Move to the next unexplored alternative, dropping exhausted choice points. Returns
    /// `false` when the whole tree has been explored.
    pub(crate) fn next(&mut self) -> bool {
        while let Some(edge) = self.edges.last_mut() {
            if edge.alternative + 1 < edge.choice.alternatives() {
                edge.alternative += 1;
                return true;
            }

            if let Some(edge) = self.edges.pop() {
                self.release(edge.space.as_ref().map(Space::memory));
            }
        }

        false
    }

    /// Rebuild the space of the current alternative of the deepest edge.
    ///
    /// Returns the space together with the number of commits since the last copy on the path.
    /// When more than `adaptive_distance` choices have to be committed, a copy is stored
    /// halfway.
    pub(crate) fn recompute(
        &mut self,
        adaptive_distance: usize,
        statistics: &mut SearchStatistics,
    ) -> (Space, usize) {
        let top = self.edges.len() - 1;

        if self.edges[top].space.is_some() {
            let last_alternative =
                self.edges[top].alternative + 1 == self.edges[top].choice.alternatives();

            let mut space = if last_alternative {
                let space = self.edges[top].space.take();
                self.release(space.as_ref().map(Space::memory));
                space.expect("the edge keeps a copy")
            } else {
                statistics.clones += 1;
                self.edges[top]
                    .space
                    .as_ref()
                    .expect("the edge keeps a copy")
                    .clone()
            };

            space.commit(&self.edges[top].choice, self.edges[top].alternative);
            return (space, 0);
        }

        let live = self
            .edges
            .iter()
            .rposition(|edge| edge.space.is_some())
            .expect("a copy is kept above every recomputed space");
        let mut space = self.edges[live]
            .space
            .as_ref()
            .expect("the edge keeps a copy")
            .clone();
        statistics.clones += 1;

        let distance = top - live;
        let halfway = (adaptive_distance > 0 && distance >= adaptive_distance)
            .then_some(live + distance / 2)
            .filter(|&halfway| halfway > live);

        let mut last_copy = live;
        for index in live..top {
            let edge = &self.edges[index];
            space.commit(&edge.choice, edge.alternative);
            statistics.recomputations += 1;

            if Some(index + 1) == halfway && space.status() != SpaceStatus::Failed {
                statistics.propagations += space.take_num_propagations();
                statistics.clones += 1;

                let copy = space.clone();
                self.num_copies += 1;
                self.copy_memory += copy.memory();
                self.edges[index + 1].space = Some(copy);
                last_copy = index + 1;
            }
        }

        let edge = &self.edges[top];
        space.commit(&edge.choice, edge.alternative);
        statistics.recomputations += 1;

        (space, top - last_copy)
    }

    fn release(&mut self, memory: Option<usize>) {
        if let Some(memory) = memory {
            self.num_copies -= 1;
            self.copy_memory = self.copy_memory.saturating_sub(memory);
        }
    }
}

use log::debug;

use super::Path;
use super::SearchOptions;
use super::SearchStatistics;
use crate::engine::termination::Indefinite;
use crate::engine::termination::TerminationCondition;
use crate::Space;
use crate::SpaceStatus;

/// Depth-first exploration of a search tree with recomputation, shared by the sequential
/// engines.
#[derive(Debug)]
pub(crate) struct Explorer {
    /// The space to explore next; `None` when the engine has to backtrack.
    current: Option<Space>,
    path: Path,
    /// The number of choices committed on `current` since the last copy on the path.
    distance: usize,
    commit_distance: usize,
    adaptive_distance: usize,
    termination: Box<dyn TerminationCondition>,
    statistics: SearchStatistics,
    stopped: bool,
}

impl Explorer {
    pub(crate) fn new(root: Space, options: SearchOptions) -> Explorer {
        Explorer {
            current: Some(root),
            path: Path::new(),
            distance: 0,
            commit_distance: options.commit_distance.max(1),
            adaptive_distance: options.adaptive_distance,
            termination: options
                .termination
                .unwrap_or_else(|| Box::new(Indefinite)),
            statistics: SearchStatistics::default(),
            stopped: false,
        }
    }

    pub(crate) fn stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Explore until the next solved space. When `best` is given, every explored space is first
    /// constrained to improve on it.
    ///
    /// Returns `None` when the tree is exhausted or the termination condition triggered; the
    /// latter can be told apart with [`Explorer::stopped`], and exploration resumes on the next
    /// call.
    pub(crate) fn next_solution(&mut self, best: Option<&Space>) -> Option<Space> {
        self.stopped = false;

        loop {
            if self.termination.should_stop() {
                debug!("Search stopped after {} nodes", self.statistics.nodes);
                self.stopped = true;
                return None;
            }

            let mut space = match self.current.take() {
                Some(space) => space,
                None => {
                    if !self.path.next() {
                        debug!("Search tree exhausted after {} nodes", self.statistics.nodes);
                        return None;
                    }

                    let (space, distance) = self
                        .path
                        .recompute(self.adaptive_distance, &mut self.statistics);
                    self.distance = distance;
                    space
                }
            };

            if let Some(best) = best {
                space.constrain(best);
            }

            let status = space.status();
            self.statistics.nodes += 1;
            self.statistics.propagations += space.take_num_propagations();
            self.termination.node_has_been_explored();

            match status {
                SpaceStatus::Failed => {
                    self.statistics.failures += 1;
                    self.termination.failure_has_been_found();
                    let _ = space.discard();
                }
                SpaceStatus::Solved => {
                    debug!("Found a solution at depth {}", self.path.depth());
                    return Some(space);
                }
                SpaceStatus::Branch => self.branch(space),
            }
        }
    }

    fn branch(&mut self, mut space: Space) {
        let choice = space
            .choice()
            .expect("a space with status branch has a choice");

        let copy = if !self.path.has_copy() || self.distance + 1 >= self.commit_distance {
            self.statistics.clones += 1;
            self.distance = 0;
            Some(space.clone())
        } else {
            self.distance += 1;
            None
        };

        self.path.push(copy, choice);
        self.statistics.depth = self.statistics.depth.max(self.path.depth());

        let memory = self.path.memory() + space.memory();
        self.statistics.peak_memory = self.statistics.peak_memory.max(memory);
        self.termination.memory_in_use(memory);

        space.commit(&choice, 0);
        self.current = Some(space);
    }
}

use super::Explorer;
use super::SearchOptions;
use super::SearchStatistics;
use crate::Space;

/// Branch-and-bound search for the best solution of a space.
///
/// Every solution is strictly better than the previous one: the objective set with
/// [`Space::minimise`] or [`Space::maximise`] is constrained in every explored space. The last
/// solution is optimal once the engine is exhausted and did not stop.
#[derive(Debug)]
pub struct Bab {
    explorer: Explorer,
    best: Option<Space>,
}

impl Bab {
    pub fn new(root: Space, options: SearchOptions) -> Bab {
        Bab {
            explorer: Explorer::new(root, options),
            best: None,
        }
    }

    pub fn stopped(&self) -> bool {
        self.explorer.stopped()
    }

    pub fn statistics(&self) -> &SearchStatistics {
        self.explorer.statistics()
    }

    /// The best solution found so far.
    pub fn best(&self) -> Option<&Space> {
        self.best.as_ref()
    }
}

impl Iterator for Bab {
    type Item = Space;

    fn next(&mut self) -> Option<Space> {
        let solution = self.explorer.next_solution(self.best.as_ref())?;
        self.best = Some(solution.clone());

        Some(solution)
    }
}

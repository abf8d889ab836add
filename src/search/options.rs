use crate::engine::termination::TerminationCondition;

/// Options shared by the search engines.
#[derive(Debug)]
pub struct SearchOptions {
    /// The commit distance: a live copy of the space is kept every `commit_distance` choice
    /// points along the current path. `1` copies at every choice point, `usize::MAX` keeps only
    /// the root copy and recomputes everything else.
    pub commit_distance: usize,
    /// The adaptive distance: recomputing over at least this many choices stores an extra copy
    /// halfway, so the next recomputation in the same subtree is shorter. `0` disables it.
    pub adaptive_distance: usize,
    /// The number of worker threads used by [`ParallelDfs`](super::ParallelDfs).
    pub threads: usize,
    /// The condition which stops the search early; [`None`] searches until exhausted.
    pub termination: Option<Box<dyn TerminationCondition>>,
    /// Seed for branchers and selectors which make random decisions.
    pub seed: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            commit_distance: 8,
            adaptive_distance: 2,
            threads: 1,
            termination: None,
            seed: 42,
        }
    }
}

impl SearchOptions {
    pub fn with_termination(mut self, termination: impl TerminationCondition + 'static) -> Self {
        self.termination = Some(Box::new(termination));
        self
    }

    /// A copy of the options without the termination condition, which cannot be shared.
    pub(crate) fn without_termination(&self) -> SearchOptions {
        SearchOptions {
            commit_distance: self.commit_distance,
            adaptive_distance: self.adaptive_distance,
            threads: self.threads,
            termination: None,
            seed: self.seed,
        }
    }
}

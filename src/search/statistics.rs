use crate::statistics::log_statistic;

/// Counters collected while exploring a search tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// The number of spaces whose status was computed.
    pub nodes: u64,
    /// The number of failed spaces.
    pub failures: u64,
    /// The number of propagator invocations.
    pub propagations: u64,
    /// The deepest path explored.
    pub depth: usize,
    /// The largest estimated memory held by the live copies of a path, in bytes.
    pub peak_memory: usize,
    /// The number of choices committed again while recomputing a space.
    pub recomputations: u64,
    /// The number of copies made of spaces.
    pub clones: u64,
}

impl SearchStatistics {
    /// Fold the statistics of another engine into these, as done for the workers of a parallel
    /// search.
    pub fn accumulate(&mut self, other: &SearchStatistics) {
        self.nodes += other.nodes;
        self.failures += other.failures;
        self.propagations += other.propagations;
        self.depth = self.depth.max(other.depth);
        self.peak_memory = self.peak_memory.max(other.peak_memory);
        self.recomputations += other.recomputations;
        self.clones += other.clones;
    }

    /// Print the statistics through [`log_statistic`].
    pub fn log(&self) {
        log_statistic("nodes", self.nodes);
        log_statistic("failures", self.failures);
        log_statistic("propagations", self.propagations);
        log_statistic("depth", self.depth);
        log_statistic("peakMemory", self.peak_memory);
        log_statistic("recomputations", self.recomputations);
        log_statistic("clones", self.clones);
    }
}

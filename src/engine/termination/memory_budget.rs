use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers when the spaces kept alive by the search use more
/// than the given number of bytes.
#[derive(Clone, Copy, Debug)]
pub struct MemoryBudget {
    in_use: usize,
    budget: usize,
}

impl MemoryBudget {
    pub fn new(budget: usize) -> MemoryBudget {
        MemoryBudget { in_use: 0, budget }
    }
}

impl TerminationCondition for MemoryBudget {
    fn should_stop(&mut self) -> bool {
        self.in_use > self.budget
    }

    fn memory_in_use(&mut self, bytes: usize) {
        self.in_use = bytes;
    }
}

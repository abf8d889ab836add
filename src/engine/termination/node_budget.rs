use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the given number of nodes has been explored.
#[derive(Clone, Copy, Debug)]
pub struct NodeBudget {
    explored: u64,
    budget: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> NodeBudget {
        NodeBudget {
            explored: 0,
            budget,
        }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self) -> bool {
        self.explored >= self.budget
    }

    fn node_has_been_explored(&mut self) {
        self.explored += 1;
    }
}

/// A [`TerminationCondition`] which triggers once the given number of failed spaces has been
/// encountered.
#[derive(Clone, Copy, Debug)]
pub struct FailBudget {
    failures: u64,
    budget: u64,
}

impl FailBudget {
    pub fn new(budget: u64) -> FailBudget {
        FailBudget {
            failures: 0,
            budget,
        }
    }
}

impl TerminationCondition for FailBudget {
    fn should_stop(&mut self) -> bool {
        self.failures >= self.budget
    }

    fn failure_has_been_found(&mut self) {
        self.failures += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::FailBudget;
    use super::NodeBudget;
    use crate::engine::termination::TerminationCondition;

    #[test]
    fn node_budget_counts_explored_nodes() {
        let mut budget = NodeBudget::new(2);
        assert!(!budget.should_stop());

        budget.node_has_been_explored();
        budget.failure_has_been_found();
        assert!(!budget.should_stop());

        budget.node_has_been_explored();
        assert!(budget.should_stop());
    }

    #[test]
    fn fail_budget_ignores_nodes() {
        let mut budget = FailBudget::new(1);
        budget.node_has_been_explored();
        assert!(!budget.should_stop());

        budget.failure_has_been_found();
        assert!(budget.should_stop());
    }
}

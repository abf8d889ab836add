use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers when one of its two conditions triggers.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    t1: T1,
    t2: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    pub fn new(t1: T1, t2: T2) -> Self {
        Combinator { t1, t2 }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self) -> bool {
        self.t1.should_stop() || self.t2.should_stop()
    }

    fn node_has_been_explored(&mut self) {
        self.t1.node_has_been_explored();
        self.t2.node_has_been_explored();
    }

    fn failure_has_been_found(&mut self) {
        self.t1.failure_has_been_found();
        self.t2.failure_has_been_found();
    }

    fn memory_in_use(&mut self, bytes: usize) {
        self.t1.memory_in_use(bytes);
        self.t2.memory_in_use(bytes);
    }
}

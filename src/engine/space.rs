use std::sync::Arc;

use enumset::EnumSet;
use log::debug;
use log::trace;

use crate::basic_types::check_int_value;
use crate::basic_types::check_set_value;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagatorStatus;
use crate::basic_types::RangeList;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::BrancherId;
use crate::branching::Choice;
use crate::constraints::ConstraintPoster;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::PropagatorStore;
use crate::engine::cp::watch_list_cp::IntWatch;
use crate::engine::cp::watch_list_cp::SubscriptionKind;
use crate::engine::cp::Assignments;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::Region;
use crate::engine::cp::SetDomain;
use crate::engine::cp::WatchListCP;
use crate::engine::debug_helper::DebugHelper;
use crate::engine::variables::AffineView;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::variables::SetDomainId;
use crate::engine::variables::TransformableVariable;
use crate::engine::VariableNames;
use crate::marrow_assert_extreme;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

/// The outcome of running the propagators of a space to a fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// A domain became empty or a propagator detected an inconsistency.
    Failed,
    /// No propagator can narrow a domain any further.
    Fixpoint,
    /// The fixpoint was reached and every propagator is entailed.
    Subsumed,
}

/// The state of a space after propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceStatus {
    /// The space contains no solution.
    Failed,
    /// No brancher has anything left to decide.
    Solved,
    /// A brancher can split the space; see [`Space::choice`].
    Branch,
}

/// A self-contained constraint store: the variables with their domains, the propagators
/// subscribed to them, and the branchers describing how to split the store.
///
/// A space is changed in place by posting propagators, propagating and committing choices.
/// Search explores alternatives on copies made with [`Clone`]; a copy shares the data its
/// propagators and branchers keep behind reference counts, and duplicates everything that may
/// change independently. A failed space stays failed.
pub struct Space {
    assignments: Assignments,
    watch_list: WatchListCP,
    propagators: PropagatorStore,
    queue: PropagatorQueue,
    branchers: KeyedVec<BrancherId, Box<dyn Brancher>>,
    /// Branchers before this one have nothing left to decide in this space.
    active_brancher: usize,
    region: Region,
    rewrites: Vec<Box<dyn Propagator>>,
    failed: bool,
    /// The view which branch-and-bound minimises.
    objective: Option<AffineView<DomainId>>,
    variable_names: Arc<VariableNames>,
    num_propagations: u64,
}

impl std::fmt::Debug for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Space")
            .field("assignments", &self.assignments)
            .field("watch_list", &self.watch_list)
            .field("propagators", &self.propagators)
            .field("queue", &self.queue)
            .field("branchers", &self.branchers)
            .field("active_brancher", &self.active_brancher)
            .field("region", &self.region)
            .field("num_rewrites", &self.rewrites.len())
            .field("failed", &self.failed)
            .field("objective", &self.objective)
            .field("variable_names", &self.variable_names)
            .field("num_propagations", &self.num_propagations)
            .finish()
    }
}

impl Default for Space {
    fn default() -> Self {
        Space {
            assignments: Assignments::default(),
            watch_list: WatchListCP::default(),
            propagators: PropagatorStore::default(),
            queue: PropagatorQueue::default(),
            branchers: KeyedVec::default(),
            active_brancher: 0,
            region: Region::default(),
            rewrites: Vec::new(),
            failed: false,
            objective: None,
            variable_names: Arc::new(VariableNames::default()),
            num_propagations: 0,
        }
    }
}

impl Clone for Space {
    fn clone(&self) -> Self {
        marrow_assert_moderate!(
            self.rewrites.is_empty(),
            "a space cannot be copied while a propagator runs"
        );

        let mut watch_list = self.watch_list.clone();
        watch_list.prune(|propagator| self.propagators.is_alive(propagator));

        Space {
            assignments: self.assignments.clone(),
            watch_list,
            propagators: self.propagators.clone(),
            queue: self.queue.clone(),
            branchers: self.branchers.clone(),
            active_brancher: self.active_brancher,
            region: Region::default(),
            rewrites: Vec::new(),
            failed: self.failed,
            objective: self.objective,
            variable_names: Arc::clone(&self.variable_names),
            num_propagations: 0,
        }
    }
}

// Variables.
impl Space {
    pub fn new() -> Space {
        Space::default()
    }

    /// Create an integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_int_var(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, ConstraintOperationError> {
        let lower_bound = check_int_value(lower_bound as i64)?;
        let upper_bound = check_int_value(upper_bound as i64)?;

        self.new_int_var_from_domain(RangeList::interval(lower_bound, upper_bound))
    }

    /// Create an integer variable whose domain consists of the given values.
    pub fn new_int_var_from_values(
        &mut self,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<DomainId, ConstraintOperationError> {
        let domain = RangeList::from_values(values);
        if let (Some(min), Some(max)) = (domain.min(), domain.max()) {
            let _ = check_int_value(min as i64)?;
            let _ = check_int_value(max as i64)?;
        }

        self.new_int_var_from_domain(domain)
    }

    /// Create an integer variable and name it; the name can be used to look the variable up
    /// again with [`Space::get_domain_by_name`].
    pub fn new_named_int_var(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> Result<DomainId, ConstraintOperationError> {
        let domain = self.new_int_var(lower_bound, upper_bound)?;
        Arc::make_mut(&mut self.variable_names).add_integer(domain, name.into());

        Ok(domain)
    }

    /// Create a Boolean variable, an integer variable with domain `{0, 1}` seen as a literal.
    pub fn new_bool_var(&mut self) -> Literal {
        let domain = self.assignments.new_int_domain(RangeList::interval(0, 1));
        self.watch_list.grow_int(domain);

        Literal::new(domain)
    }

    /// Create a set variable which contains every value of `glb`, no value outside `lub`, and
    /// whose cardinality lies in `[card_min, card_max]`.
    pub fn new_set_var(
        &mut self,
        glb: RangeList,
        lub: RangeList,
        card_min: u64,
        card_max: u64,
    ) -> Result<SetDomainId, ConstraintOperationError> {
        if let (Some(min), Some(max)) = (lub.min(), lub.max()) {
            let _ = check_set_value(min as i64)?;
            let _ = check_set_value(max as i64)?;
        }

        let domain = SetDomain::new(glb, lub, card_min, card_max)
            .ok_or(ConstraintOperationError::EmptyDomainCreation)?;

        let set = self.assignments.new_set_domain(domain);
        self.watch_list.grow_set(set);

        Ok(set)
    }

    pub fn new_named_set_var(
        &mut self,
        glb: RangeList,
        lub: RangeList,
        card_min: u64,
        card_max: u64,
        name: impl Into<String>,
    ) -> Result<SetDomainId, ConstraintOperationError> {
        let set = self.new_set_var(glb, lub, card_min, card_max)?;
        Arc::make_mut(&mut self.variable_names).add_set(set, name.into());

        Ok(set)
    }

    fn new_int_var_from_domain(
        &mut self,
        domain: RangeList,
    ) -> Result<DomainId, ConstraintOperationError> {
        if domain.is_empty() {
            return Err(ConstraintOperationError::EmptyDomainCreation);
        }

        let domain = self.assignments.new_int_domain(domain);
        self.watch_list.grow_int(domain);

        Ok(domain)
    }

    pub fn get_domain_by_name(&self, name: &str) -> Option<DomainId> {
        self.variable_names.get_domain_by_name(name)
    }

    pub fn get_int_name(&self, domain: DomainId) -> Option<&str> {
        self.variable_names.get_int_name(domain)
    }

    pub fn get_set_name(&self, domain: SetDomainId) -> Option<&str> {
        self.variable_names.get_set_name(domain)
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.lower_bound(&self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        variable.upper_bound(&self.assignments)
    }
}

// Posting and propagation.
impl Space {
    /// Add a propagator and propagate to a fixpoint.
    ///
    /// Fails with [`ConstraintOperationError::InfeasibleState`] if the space was already failed,
    /// and with [`ConstraintOperationError::InfeasiblePropagator`] if the propagator, or the
    /// propagation it triggered, failed the space.
    pub fn post(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<(), ConstraintOperationError> {
        if self.failed {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        // Advisors of installed propagators must see pending events before the new propagator
        // reads the domains.
        if self.assignments.has_pending_events()
            && self.propagate() == PropagationOutcome::Failed
        {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        if self.install(Box::new(propagator)).is_err() {
            self.fail();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        match self.propagate() {
            PropagationOutcome::Failed => Err(ConstraintOperationError::InfeasiblePropagator),
            PropagationOutcome::Fixpoint | PropagationOutcome::Subsumed => Ok(()),
        }
    }

    /// Creates a [`ConstraintPoster`] which is used to add the constraint to the space.
    ///
    /// Note that the [`ConstraintPoster`] should be used, otherwise a warning is logged.
    pub fn add_constraint<ConstraintType>(
        &mut self,
        constraint: ConstraintType,
    ) -> ConstraintPoster<'_, ConstraintType> {
        ConstraintPoster::new(self, constraint)
    }

    /// Give a propagator an identifier, let it subscribe to its views and schedule it.
    fn install(&mut self, mut propagator: Box<dyn Propagator>) -> Result<PropagatorId, Inconsistency> {
        let propagator_id = self.propagators.next_id();

        let mut context = PropagatorInitialisationContext::new(
            &mut self.watch_list,
            propagator_id,
            &self.assignments,
        );
        propagator.initialise(&mut context)?;

        let cost = propagator.cost();
        trace!("Posted propagator {} as {propagator_id}", propagator.name());

        let _ = self.propagators.alloc(propagator);
        self.queue.enqueue_propagator(propagator_id, cost);

        Ok(propagator_id)
    }

    /// Run the scheduled propagators, cheapest cost class first, until none is scheduled or the
    /// space fails.
    pub fn propagate(&mut self) -> PropagationOutcome {
        if self.failed {
            return PropagationOutcome::Failed;
        }

        self.notify_subscribers(None);

        while let Some(propagator_id) = self.queue.pop() {
            let Some(mut propagator) = self.propagators.take(propagator_id) else {
                continue;
            };

            self.num_propagations += 1;

            let context = PropagationContextMut::new(
                &mut self.assignments,
                &self.region,
                &mut self.rewrites,
                propagator_id,
            );
            let status = propagator.propagate(context);
            trace!("{} ({propagator_id}) returned {status:?}", propagator.name());

            self.region.reset();

            match status {
                Ok(PropagatorStatus::Subsumed) => {
                    let reclaimed = propagator.dispose();
                    trace!("Disposed {propagator_id}, reclaimed {reclaimed} bytes");
                    drop(propagator);

                    self.notify_subscribers(None);

                    let rewrites = std::mem::take(&mut self.rewrites);
                    for rewrite in rewrites {
                        if self.install(rewrite).is_err() {
                            self.fail();
                            return PropagationOutcome::Failed;
                        }
                    }
                }
                Ok(status) => {
                    marrow_assert_simple!(
                        self.rewrites.is_empty(),
                        "a propagator which asks to be rewritten must report that it is subsumed"
                    );

                    self.propagators.restore(propagator_id, propagator);
                    self.notify_subscribers(Some((propagator_id, status)));
                }
                Err(inconsistency) => {
                    debug!("{} failed the space: {inconsistency:?}", propagator.name());
                    self.propagators.restore(propagator_id, propagator);
                    self.rewrites.clear();
                    self.fail();
                    return PropagationOutcome::Failed;
                }
            }
        }

        marrow_assert_extreme!(DebugHelper::debug_fixed_point_propagation(
            &self.assignments,
            &self.propagators
        ));

        if self.propagators.num_live() == 0 {
            PropagationOutcome::Subsumed
        } else {
            PropagationOutcome::Fixpoint
        }
    }

    /// Hand the pending events to the subscribed propagators and advisors.
    ///
    /// `running` is the propagator which caused the events together with what it reported; a
    /// propagator at its own fixpoint is not scheduled for its own changes, but its advisors are
    /// still informed of them.
    fn notify_subscribers(&mut self, running: Option<(PropagatorId, PropagatorStatus)>) {
        if !self.assignments.has_pending_events() {
            return;
        }

        let mut events = std::mem::take(self.assignments.events_mut());

        for (domain, domain_events, delta) in events.drain_int() {
            for &IntWatch {
                subscription,
                events: watched,
            } in self.watch_list.get_int_watchers(domain)
            {
                let relevant: EnumSet<_> = watched & domain_events;
                if relevant.is_empty() {
                    continue;
                }

                let propagator_id = subscription.propagator_var.propagator;
                let Some(propagator) = self.propagators.get_mut(propagator_id) else {
                    continue;
                };

                let decision = match subscription.kind {
                    SubscriptionKind::Propagator => EnqueueDecision::Enqueue,
                    SubscriptionKind::Advisor => propagator.advise(
                        PropagationContext::new(&self.assignments),
                        subscription.propagator_var.variable,
                        domain_events,
                        delta,
                    ),
                };

                let is_own_fixpoint = running == Some((propagator_id, PropagatorStatus::Fix));
                if decision == EnqueueDecision::Enqueue && !is_own_fixpoint {
                    self.queue
                        .enqueue_propagator(propagator_id, propagator.cost());
                }
            }
        }

        for (domain, domain_events) in events.drain_set() {
            for watch in self.watch_list.get_set_watchers(domain) {
                if (watch.events & domain_events).is_empty() {
                    continue;
                }

                let propagator_id = watch.subscription.propagator_var.propagator;
                let Some(propagator) = self.propagators.get_mut(propagator_id) else {
                    continue;
                };

                let decision = match watch.subscription.kind {
                    SubscriptionKind::Propagator => EnqueueDecision::Enqueue,
                    SubscriptionKind::Advisor => propagator.advise_set(
                        PropagationContext::new(&self.assignments),
                        watch.subscription.propagator_var.variable,
                        domain_events,
                    ),
                };

                let is_own_fixpoint = running == Some((propagator_id, PropagatorStatus::Fix));
                if decision == EnqueueDecision::Enqueue && !is_own_fixpoint {
                    self.queue
                        .enqueue_propagator(propagator_id, propagator.cost());
                }
            }
        }

        events.clear();
        *self.assignments.events_mut() = events;
    }

    /// Mark the space as failed. A failed space stays failed.
    pub fn fail(&mut self) {
        if !self.failed {
            debug!("Space failed");
        }

        self.failed = true;
        self.queue.clear();
        self.assignments.events_mut().clear();
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.num_live()
    }

    /// The number of propagator invocations since the last call, or since the space was copied.
    pub(crate) fn take_num_propagations(&mut self) -> u64 {
        std::mem::take(&mut self.num_propagations)
    }
}

// Branching.
impl Space {
    pub fn add_brancher(&mut self, brancher: impl Brancher + 'static) -> BrancherId {
        self.branchers.push(Box::new(brancher))
    }

    /// Propagate to a fixpoint and classify the space.
    pub fn status(&mut self) -> SpaceStatus {
        if self.propagate() == PropagationOutcome::Failed {
            return SpaceStatus::Failed;
        }

        while self.active_brancher < self.branchers.len() {
            let brancher = BrancherId::create_from_index(self.active_brancher);
            if self.branchers[brancher].status(PropagationContext::new(&self.assignments)) {
                return SpaceStatus::Branch;
            }

            self.active_brancher += 1;
        }

        SpaceStatus::Solved
    }

    /// The choice of the active brancher. Only meaningful after [`Space::status`] returned
    /// [`SpaceStatus::Branch`].
    pub fn choice(&mut self) -> Option<Choice> {
        let brancher = BrancherId::create_from_index(self.active_brancher);
        let active = self.branchers.get_mut(brancher)?;

        let mut choice = active.choice(PropagationContext::new(&self.assignments));
        choice.brancher = brancher;

        marrow_assert_simple!(
            choice.alternatives() >= 1,
            "a choice must have at least one alternative"
        );

        Some(choice)
    }

    /// Apply alternative `alternative` of `choice`. The choice may come from any space this
    /// space was copied from, or copied into. A commit which empties a domain fails the space;
    /// other changes are propagated by the next call to [`Space::status`].
    pub fn commit(&mut self, choice: &Choice, alternative: u32) {
        marrow_assert_simple!(alternative < choice.alternatives());

        if self.failed {
            return;
        }

        let result = self.branchers[choice.brancher()].commit(
            &mut self.assignments,
            choice,
            alternative,
        );

        if result.is_err() {
            self.fail();
        }
    }
}

// Solutions and optimisation.
impl Space {
    /// A snapshot of the current domains.
    pub fn solution(&self) -> Solution {
        Solution::new(&self.assignments)
    }

    /// Let branch-and-bound search for solutions with a smaller value of `objective`.
    pub fn minimise(&mut self, objective: DomainId) {
        self.objective = Some(objective.scaled(1));
    }

    /// Let branch-and-bound search for solutions with a larger value of `objective`.
    pub fn maximise(&mut self, objective: DomainId) {
        self.objective = Some(objective.scaled(-1));
    }

    /// The value of the objective in this space, if it is fixed. Reported as the minimised
    /// view, so a maximised objective is negated.
    pub fn objective_value(&self) -> Option<i32> {
        let objective = self.objective.as_ref()?;
        objective
            .is_fixed(&self.assignments)
            .then(|| objective.lower_bound(&self.assignments))
    }

    /// Require that solutions of this space are strictly better than `best`.
    pub fn constrain(&mut self, best: &Space) {
        let Some(objective) = self.objective else {
            return;
        };

        let bound = objective.lower_bound(&best.assignments);
        if objective
            .set_upper_bound(&mut self.assignments, bound - 1)
            .is_err()
        {
            self.fail();
        }
    }
}

// Memory.
impl Space {
    /// An estimate of the memory held by the space, in bytes.
    pub fn memory(&self) -> usize {
        let propagators: usize = self
            .propagators
            .iter_live()
            .map(|(_, propagator)| std::mem::size_of_val(propagator))
            .sum();

        std::mem::size_of::<Space>()
            + self.assignments.heap_bytes()
            + self.watch_list.num_subscriptions() * std::mem::size_of::<IntWatch>()
            + propagators
            + self.branchers.len() * std::mem::size_of::<Box<dyn Brancher>>()
            + self.region.allocated_bytes()
    }

    /// Dispose every propagator and drop the space. Returns the number of bytes the
    /// propagators reported as reclaimed.
    pub fn discard(mut self) -> usize {
        self.propagators
            .iter_live_mut()
            .map(|propagator| propagator.dispose())
            .sum()
    }
}

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossbeam_channel::RecvTimeoutError;
use crossbeam_channel::Sender;
use log::debug;
use log::warn;

use super::Dfs;
use super::SearchOptions;
use super::SearchStatistics;
use crate::engine::termination::Indefinite;
use crate::engine::termination::TerminationCondition;
use crate::Space;
use crate::SpaceStatus;

/// The number of subtrees handed out per worker; more subtrees balance the load better at the
/// price of a larger split at the root.
const SUBTREES_PER_WORKER: usize = 4;

/// How long the coordinator waits for a worker before it polls its termination condition.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The termination condition of the search, shared by the coordinator and the workers.
#[derive(Debug)]
struct SharedLimits {
    termination: Box<dyn TerminationCondition>,
    /// The memory last reported by each worker.
    memory: Vec<usize>,
}

impl SharedLimits {
    fn lock(limits: &Mutex<SharedLimits>) -> std::sync::MutexGuard<'_, SharedLimits> {
        // A worker which panicked leaves consistent counters behind.
        limits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The termination condition of a worker. It reports every node, failure and memory estimate
/// of the worker to the shared limits, and triggers once they do or the stop flag is raised.
#[derive(Debug)]
struct WorkerLimits {
    worker: usize,
    limits: Arc<Mutex<SharedLimits>>,
    stop: Arc<AtomicBool>,
}

impl TerminationCondition for WorkerLimits {
    fn should_stop(&mut self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }

        let triggered = SharedLimits::lock(&self.limits).termination.should_stop();
        if triggered {
            self.stop.store(true, Ordering::Relaxed);
        }
        triggered
    }

    fn node_has_been_explored(&mut self) {
        SharedLimits::lock(&self.limits)
            .termination
            .node_has_been_explored();
    }

    fn failure_has_been_found(&mut self) {
        SharedLimits::lock(&self.limits)
            .termination
            .failure_has_been_found();
    }

    fn memory_in_use(&mut self, bytes: usize) {
        let mut limits = SharedLimits::lock(&self.limits);
        limits.memory[self.worker] = bytes;

        let total = limits.memory.iter().sum();
        limits.termination.memory_in_use(total);
    }
}

#[derive(Debug)]
enum WorkerMessage {
    Solution(Space),
    Finished {
        statistics: SearchStatistics,
        stopped: bool,
    },
}

/// Depth-first search for all solutions of a space, using several worker threads.
///
/// The coordinator expands the top of the search tree until it has a few disjoint subtrees per
/// worker. The workers take subtrees from a shared queue and explore each with a sequential
/// [`Dfs`], sending their solutions back. Spaces only cross threads as whole subtrees or
/// solutions. The termination condition of the options hears about the nodes, failures and
/// memory of the split and of every worker, and is polled at each of their nodes; once it
/// triggers, all workers stop at their next node.
#[derive(Debug)]
pub struct ParallelDfs {
    /// Solutions found while splitting the tree.
    pending: Vec<Space>,
    results: Receiver<WorkerMessage>,
    workers: Vec<JoinHandle<()>>,
    num_running: usize,
    stop: Arc<AtomicBool>,
    limits: Arc<Mutex<SharedLimits>>,
    statistics: SearchStatistics,
    stopped: bool,
}

impl ParallelDfs {
    pub fn new(root: Space, mut options: SearchOptions) -> ParallelDfs {
        let num_workers = options.threads.max(1);
        let mut termination = options
            .termination
            .take()
            .unwrap_or_else(|| Box::new(Indefinite));

        let mut statistics = SearchStatistics::default();
        let Split {
            subtrees,
            solutions: pending,
            stopped,
        } = split(
            root,
            num_workers * SUBTREES_PER_WORKER,
            &mut termination,
            &mut statistics,
        );
        if stopped {
            debug!("Search stopped while splitting the tree");
        }
        debug!(
            "Distributing {} subtrees over {num_workers} workers",
            subtrees.len()
        );

        let (work_sender, work) = crossbeam_channel::unbounded();
        for subtree in subtrees {
            // The receiver is alive, so sending cannot fail.
            let _ = work_sender.send(subtree);
        }
        drop(work_sender);

        let (result_sender, results) = crossbeam_channel::unbounded();
        let stop = Arc::new(AtomicBool::new(stopped));
        let limits = Arc::new(Mutex::new(SharedLimits {
            termination,
            memory: vec![0; num_workers],
        }));

        let workers = (0..num_workers)
            .map(|worker| {
                let work = work.clone();
                let results = result_sender.clone();
                let limits = WorkerLimits {
                    worker,
                    limits: Arc::clone(&limits),
                    stop: Arc::clone(&stop),
                };
                let options = options.without_termination();

                std::thread::spawn(move || run_worker(work, results, limits, options))
            })
            .collect::<Vec<_>>();

        ParallelDfs {
            pending,
            results,
            num_running: workers.len(),
            workers,
            stop,
            limits,
            statistics,
            stopped,
        }
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// The statistics of the split and of every worker which finished.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    fn request_stop(&mut self) {
        if !self.stopped {
            debug!("Stopping the parallel search");
        }
        self.stopped = true;
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Iterator for ParallelDfs {
    type Item = Space;

    fn next(&mut self) -> Option<Space> {
        if let Some(solution) = self.pending.pop() {
            return Some(solution);
        }

        loop {
            if self.stopped || self.num_running == 0 {
                return None;
            }

            if self.stop.load(Ordering::Relaxed)
                || SharedLimits::lock(&self.limits).termination.should_stop()
            {
                self.request_stop();
                return None;
            }

            match self.results.recv_timeout(POLL_INTERVAL) {
                Ok(WorkerMessage::Solution(solution)) => return Some(solution),
                Ok(WorkerMessage::Finished {
                    statistics,
                    stopped,
                }) => {
                    self.num_running -= 1;
                    self.statistics.accumulate(&statistics);
                    self.stopped |= stopped;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("The workers of the parallel search disconnected");
                    self.num_running = 0;
                }
            }
        }
    }
}

impl Drop for ParallelDfs {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("A worker of the parallel search panicked");
            }
        }
    }
}

/// The outcome of expanding the top of the tree.
#[derive(Debug)]
struct Split {
    subtrees: VecDeque<Space>,
    solutions: Vec<Space>,
    stopped: bool,
}

/// Expand the tree breadth-first until there are at least `target` open subtrees, the tree is
/// exhausted, or the termination condition triggers.
fn split(
    root: Space,
    target: usize,
    termination: &mut Box<dyn TerminationCondition>,
    statistics: &mut SearchStatistics,
) -> Split {
    let mut open = VecDeque::from([root]);
    let mut solutions = Vec::new();
    let mut stopped = false;

    while open.len() < target {
        if termination.should_stop() {
            stopped = true;
            break;
        }

        let Some(mut space) = open.pop_front() else {
            break;
        };

        statistics.nodes += 1;
        let status = space.status();
        statistics.propagations += space.take_num_propagations();
        termination.node_has_been_explored();

        match status {
            SpaceStatus::Failed => {
                statistics.failures += 1;
                termination.failure_has_been_found();
            }
            SpaceStatus::Solved => solutions.push(space),
            SpaceStatus::Branch => {
                let choice = space
                    .choice()
                    .expect("a space with status branch has a choice");

                for alternative in 0..choice.alternatives() - 1 {
                    let mut child = space.clone();
                    statistics.clones += 1;
                    child.commit(&choice, alternative);
                    open.push_back(child);
                }

                space.commit(&choice, choice.alternatives() - 1);
                open.push_back(space);
            }
        }

        let memory = open.iter().map(Space::memory).sum::<usize>();
        statistics.peak_memory = statistics.peak_memory.max(memory);
        termination.memory_in_use(memory);
    }

    // Reverse, so solutions are handed out in the order they were found.
    solutions.reverse();
    Split {
        subtrees: open,
        solutions,
        stopped,
    }
}

fn run_worker(
    work: Receiver<Space>,
    results: Sender<WorkerMessage>,
    limits: WorkerLimits,
    options: SearchOptions,
) {
    let worker = limits.worker;
    debug!("Worker {worker} started");

    let mut statistics = SearchStatistics::default();
    let mut stopped = false;

    while let Ok(subtree) = work.recv() {
        if limits.stop.load(Ordering::Relaxed) {
            stopped = true;
            break;
        }

        let options = options.without_termination().with_termination(WorkerLimits {
            worker,
            limits: Arc::clone(&limits.limits),
            stop: Arc::clone(&limits.stop),
        });
        let mut search = Dfs::new(subtree, options);

        for solution in search.by_ref() {
            if results.send(WorkerMessage::Solution(solution)).is_err() {
                return;
            }
        }

        statistics.accumulate(search.statistics());
        if search.stopped() {
            stopped = true;
            break;
        }

        // The spaces of the finished subtree are gone.
        SharedLimits::lock(&limits.limits).memory[worker] = 0;
    }

    debug!("Worker {worker} finished after {} nodes", statistics.nodes);
    let _ = results.send(WorkerMessage::Finished {
        statistics,
        stopped,
    });
}

use log::debug;

use super::Dfs;
use super::ParallelDfs;
use super::SearchOptions;
use super::SearchStatistics;
use crate::basic_types::Solution;
use crate::statistics::log_statistic_postfix;
use crate::Space;

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// A solution was found and the search was not continued.
    Solution,
    /// The whole tree was explored.
    Exhausted,
    /// The termination condition triggered before the tree was explored.
    Stopped,
}

/// The result of [`solve_all`] and [`solve_first`].
#[derive(Debug)]
pub struct SearchSummary {
    pub status: SearchStatus,
    pub solutions: Vec<Solution>,
    pub statistics: SearchStatistics,
}

/// Find every solution of `root`, with [`ParallelDfs`] if more than one thread is requested and
/// [`Dfs`] otherwise.
pub fn solve_all(root: Space, options: SearchOptions) -> SearchSummary {
    solve(root, options, usize::MAX)
}

/// Find the first solution of `root`.
pub fn solve_first(root: Space, options: SearchOptions) -> SearchSummary {
    solve(root, options, 1)
}

fn solve(root: Space, options: SearchOptions, limit: usize) -> SearchSummary {
    let (solutions, stopped, statistics) = if options.threads > 1 {
        let mut search = ParallelDfs::new(root, options);
        let solutions = collect(&mut search, limit);
        (solutions, search.stopped(), *search.statistics())
    } else {
        let mut search = Dfs::new(root, options);
        let solutions = collect(&mut search, limit);
        (solutions, search.stopped(), *search.statistics())
    };

    let status = if stopped {
        SearchStatus::Stopped
    } else if solutions.len() >= limit {
        SearchStatus::Solution
    } else {
        SearchStatus::Exhausted
    };
    debug!("Search ended with {status:?} and {} solutions", solutions.len());

    statistics.log();
    log_statistic_postfix();

    SearchSummary {
        status,
        solutions,
        statistics,
    }
}

fn collect(search: &mut impl Iterator<Item = Space>, limit: usize) -> Vec<Solution> {
    search
        .take(limit)
        .map(|space| space.solution())
        .collect()
}

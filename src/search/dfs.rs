use super::Explorer;
use super::SearchOptions;
use super::SearchStatistics;
use crate::Space;

/// Depth-first search for all solutions of a space.
///
/// The engine is an iterator over the solved spaces. Each solution is an independent space, so
/// it can be inspected or searched further.
/// ```rust
/// # use marrow::branching::InDomainMin;
/// # use marrow::branching::InputOrder;
/// # use marrow::branching::ViewValBrancher;
/// # use marrow::constraints;
/// # use marrow::search::Dfs;
/// # use marrow::search::SearchOptions;
/// # use marrow::Space;
/// let mut space = Space::new();
/// let x = space.new_int_var(0, 2).unwrap();
/// let y = space.new_int_var(0, 2).unwrap();
/// space
///     .add_constraint(constraints::less_than(x, y))
///     .post()
///     .unwrap();
/// let _ = space.add_brancher(ViewValBrancher::new([x, y], InputOrder, InDomainMin));
///
/// let mut search = Dfs::new(space, SearchOptions::default());
/// let solutions = search
///     .by_ref()
///     .map(|solution| (solution.lower_bound(&x), solution.lower_bound(&y)))
///     .collect::<Vec<_>>();
///
/// assert_eq!(solutions, vec![(0, 1), (0, 2), (1, 2)]);
/// assert!(!search.stopped());
/// ```
#[derive(Debug)]
pub struct Dfs {
    explorer: Explorer,
}

impl Dfs {
    pub fn new(root: Space, options: SearchOptions) -> Dfs {
        Dfs {
            explorer: Explorer::new(root, options),
        }
    }

    /// Whether the last call to [`Iterator::next`] returned `None` because the termination
    /// condition triggered, rather than because the tree was exhausted.
    pub fn stopped(&self) -> bool {
        self.explorer.stopped()
    }

    pub fn statistics(&self) -> &SearchStatistics {
        self.explorer.statistics()
    }
}

impl Iterator for Dfs {
    type Item = Space;

    fn next(&mut self) -> Option<Space> {
        self.explorer.next_solution(None)
    }
}

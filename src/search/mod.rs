//! The search engines, which explore the tree of spaces described by the branchers.
//!
//! - [`Dfs`] enumerates all solutions depth-first.
//! - [`Bab`] finds successively better solutions with branch-and-bound.
//! - [`ParallelDfs`] distributes subtrees over worker threads.
//!
//! The sequential engines keep a copy of the space only at some choice points of the current
//! path, and recompute the other spaces from the nearest copy when backtracking; the trade-off
//! between memory and recomputation is controlled through [`SearchOptions`].
mod bab;
mod dfs;
mod explorer;
mod options;
mod parallel;
mod path;
mod solve;
mod statistics;

pub use bab::Bab;
pub use dfs::Dfs;
pub(crate) use explorer::Explorer;
pub use options::SearchOptions;
pub use parallel::ParallelDfs;
pub(crate) use path::Path;
pub use solve::solve_all;
pub use solve::solve_first;
pub use solve::SearchStatus;
pub use solve::SearchSummary;
pub use statistics::SearchStatistics;

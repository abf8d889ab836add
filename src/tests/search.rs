#![cfg(test)]

use crate::branching::val_zero_one;
use crate::branching::FirstFail;
use crate::branching::InDomainMax;
use crate::branching::InDomainMin;
use crate::branching::InputOrder;
use crate::branching::ViewValBrancher;
use crate::constraints;
use crate::search::solve_all;
use crate::search::solve_first;
use crate::search::Bab;
use crate::search::Dfs;
use crate::search::ParallelDfs;
use crate::search::SearchOptions;
use crate::search::SearchStatus;
use crate::termination::MemoryBudget;
use crate::termination::NodeBudget;
use crate::variables::DomainId;
use crate::variables::Literal;
use crate::variables::TransformableVariable;
use crate::IntRelation;
use crate::Solution;
use crate::Space;

fn n_queens(n: i32) -> (Space, Vec<DomainId>) {
    let mut space = Space::new();
    let queens = (0..n)
        .map(|_| space.new_int_var(0, n - 1).expect("valid bounds"))
        .collect::<Vec<_>>();

    let diag1 = queens
        .iter()
        .enumerate()
        .map(|(i, queen)| queen.offset(i as i32))
        .collect::<Vec<_>>();
    let diag2 = queens
        .iter()
        .enumerate()
        .map(|(i, queen)| queen.offset(-(i as i32)))
        .collect::<Vec<_>>();

    space
        .add_constraint(constraints::all_different(queens.clone()))
        .post()
        .expect("no conflict at the root");
    space
        .add_constraint(constraints::all_different(diag1))
        .post()
        .expect("no conflict at the root");
    space
        .add_constraint(constraints::all_different(diag2))
        .post()
        .expect("no conflict at the root");

    let _ = space.add_brancher(ViewValBrancher::new(queens.clone(), FirstFail, InDomainMin));

    (space, queens)
}

fn columns(solution: &Solution, queens: &[DomainId]) -> Vec<i32> {
    queens
        .iter()
        .map(|queen| solution.get_integer_value(queen))
        .collect()
}

fn options(commit_distance: usize, adaptive_distance: usize) -> SearchOptions {
    SearchOptions {
        commit_distance,
        adaptive_distance,
        ..Default::default()
    }
}

#[test]
fn six_queens_for_every_commit_distance() {
    for commit_distance in [1, 2, 5, usize::MAX] {
        let (space, queens) = n_queens(6);

        let solutions = Dfs::new(space, options(commit_distance, 2))
            .map(|space| columns(&space.solution(), &queens))
            .collect::<Vec<_>>();

        assert_eq!(
            solutions.len(),
            4,
            "wrong number of solutions with commit distance {commit_distance}"
        );
    }
}

#[test]
fn six_queens_in_parallel() {
    let (space, queens) = n_queens(6);
    let mut expected = Dfs::new(space, SearchOptions::default())
        .map(|space| columns(&space.solution(), &queens))
        .collect::<Vec<_>>();
    expected.sort();

    for threads in [2, 4] {
        let (space, queens) = n_queens(6);
        let options = SearchOptions {
            threads,
            ..Default::default()
        };

        let mut search = ParallelDfs::new(space, options);
        let mut solutions = search
            .by_ref()
            .map(|space| columns(&space.solution(), &queens))
            .collect::<Vec<_>>();
        solutions.sort();

        assert_eq!(solutions, expected, "different solutions with {threads} threads");
        assert!(!search.stopped());
    }
}

fn bounded_sum(num_literals: usize, bound: i32) -> (Space, Vec<Literal>) {
    let mut space = Space::new();
    let literals = (0..num_literals)
        .map(|_| space.new_bool_var())
        .collect::<Vec<_>>();

    space
        .add_constraint(constraints::linear_less_than_or_equals(
            literals.clone(),
            bound,
        ))
        .post()
        .expect("the sum can stay below the bound");
    let _ = space.add_brancher(val_zero_one(literals.clone()));

    (space, literals)
}

#[test]
fn recomputation_does_not_change_the_solutions() {
    let values = |options: SearchOptions| {
        let (space, literals) = bounded_sum(20, 2);
        let mut search = Dfs::new(space, options);

        let solutions = search
            .by_ref()
            .map(|space| {
                let solution = space.solution();
                literals
                    .iter()
                    .map(|&literal| solution.get_literal_value(literal))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        (solutions, *search.statistics())
    };

    let (copying, copying_statistics) = values(options(1, 0));
    assert_eq!(copying.len(), 1 + 20 + 190);
    assert_eq!(copying_statistics.recomputations, 0);
    assert_eq!(copying_statistics.depth, 20);

    for (commit_distance, adaptive_distance) in [
        (3, 0),
        (5, 2),
        (5, 5),
        (usize::MAX, 0),
        (usize::MAX, 2),
    ] {
        let (recomputed, statistics) = values(options(commit_distance, adaptive_distance));

        assert_eq!(recomputed, copying);
        assert!(statistics.recomputations > 0);
        assert_eq!(statistics.nodes, copying_statistics.nodes);
    }
}

#[test]
fn branch_and_bound_improves_strictly() {
    let mut space = Space::new();
    let x = space.new_int_var(0, 5).expect("valid bounds");
    let y = space.new_int_var(0, 5).expect("valid bounds");
    let objective = space.new_int_var(0, 30).expect("valid bounds");

    space
        .add_constraint(constraints::linear(
            vec![2, 3, -1],
            vec![x, y, objective],
            IntRelation::Equal,
            0,
        ))
        .post()
        .expect("the objective is defined");
    space
        .add_constraint(constraints::linear(
            vec![1, 1],
            vec![x, y],
            IntRelation::GreaterOrEqual,
            4,
        ))
        .post()
        .expect("x + y >= 4 is feasible");

    space.minimise(objective);
    let _ = space.add_brancher(ViewValBrancher::new([x, y], InputOrder, InDomainMax));

    let mut search = Bab::new(space, SearchOptions::default());
    let objectives = search
        .by_ref()
        .map(|space| space.objective_value().expect("solutions fix the objective"))
        .collect::<Vec<_>>();

    assert!(objectives.len() > 1);
    assert!(objectives.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(objectives.last(), Some(&8));
    assert!(!search.stopped());
    assert_eq!(
        search
            .best()
            .and_then(|best| best.objective_value()),
        Some(8)
    );
}

#[test]
fn node_budget_stops_the_search() {
    let (space, _) = n_queens(6);
    let options = SearchOptions::default().with_termination(NodeBudget::new(1));

    let mut search = Dfs::new(space, options);

    assert!(search.next().is_none());
    assert!(search.stopped());
    assert_eq!(search.statistics().nodes, 1);
}

#[test]
fn limits_stop_the_parallel_search() {
    for threads in [2, 4] {
        let (space, _) = n_queens(6);
        let options = SearchOptions {
            threads,
            ..Default::default()
        }
        .with_termination(NodeBudget::new(1));

        let mut search = ParallelDfs::new(space, options);
        assert!(search.next().is_none());
        assert!(search.stopped());
        assert_eq!(search.statistics().nodes, 1);

        let (space, _) = n_queens(6);
        let options = SearchOptions {
            threads,
            ..Default::default()
        }
        .with_termination(MemoryBudget::new(1));

        let mut search = ParallelDfs::new(space, options);
        assert_eq!(search.by_ref().count(), 0);
        assert!(search.stopped());
    }
}

#[test]
fn summaries_report_how_the_search_ended() {
    let (space, queens) = n_queens(6);
    let first = solve_first(space, SearchOptions::default());
    assert_eq!(first.status, SearchStatus::Solution);
    assert_eq!(first.solutions.len(), 1);
    assert_eq!(columns(&first.solutions[0], &queens).len(), 6);

    let (space, _) = n_queens(3);
    let all = solve_all(space, SearchOptions::default());
    assert_eq!(all.status, SearchStatus::Exhausted);
    assert!(all.solutions.is_empty());

    let (space, _) = bounded_sum(20, 2);
    let stopped = solve_all(
        space,
        SearchOptions::default().with_termination(NodeBudget::new(10)),
    );
    assert_eq!(stopped.status, SearchStatus::Stopped);
    assert!(stopped.solutions.len() < 211);
}

//! A command-line driver shared by the demo problems.
//!
//! A demo implements [`Problem`] and calls [`entry_point!`](crate::entry_point); the runner
//! parses the common search options, builds the space and prints every solution the selected
//! engine reports.
use std::fmt::Debug;
use std::io::Write;
use std::time::Duration;

use clap::ValueEnum;
use log::info;
use log::LevelFilter;

use crate::basic_types::Solution;
use crate::search::Bab;
use crate::search::Dfs;
use crate::search::ParallelDfs;
use crate::search::SearchOptions;
use crate::search::SearchStatistics;
use crate::statistics::configure;
use crate::termination::Combinator;
use crate::termination::NodeBudget;
use crate::termination::OsSignal;
use crate::termination::TerminationCondition;
use crate::termination::TimeBudget;
use crate::Space;

#[derive(Debug, clap::Parser)]
pub struct Cli<Instance: clap::Args> {
    /// The parameters of the problem instance.
    #[command(flatten)]
    pub instance: Instance,

    /// The search engine to use.
    #[arg(short = 'e', long = "engine", value_enum, default_value_t)]
    pub engine: Engine,

    /// Keep a copy of the space every this many choice points.
    #[arg(short = 'c', long = "commit-distance", default_value_t = 8)]
    pub commit_distance: usize,

    /// Store an intermediate copy when recomputing over at least this many choices.
    #[arg(short = 'a', long = "adaptive-distance", default_value_t = 2)]
    pub adaptive_distance: usize,

    /// The number of worker threads of the parallel engine.
    #[arg(short = 't', long = "threads", default_value_t = 4)]
    pub threads: usize,

    /// The number of seconds the search is allowed to run.
    #[arg(long = "time-limit")]
    pub time_limit: Option<u64>,

    /// The number of nodes the search is allowed to explore.
    #[arg(long = "node-limit")]
    pub node_limit: Option<u64>,

    /// Stop after this many solutions; 0 reports all of them.
    #[arg(short = 'n', long = "solutions", default_value_t = 1)]
    pub solutions: usize,

    /// The seed of randomised branching.
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Log more; repeat for trace output.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Depth-first search.
    #[default]
    Dfs,
    /// Branch-and-bound; only reports solutions which improve on the previous one.
    Bab,
    /// Depth-first search over several threads.
    Parallel,
}

/// Definition of a problem instance which can be solved through the runner.
pub trait Problem: Sized {
    /// The command-line parameters describing an instance.
    type Instance: clap::Args + Debug;

    /// Create the problem together with its root space, including its constraints, branchers
    /// and, for optimisation problems, the objective. Randomised branchers should be seeded
    /// with [`SearchOptions::seed`].
    fn create(instance: Self::Instance, options: &SearchOptions)
        -> anyhow::Result<(Self, Space)>;

    fn print_solution(&self, solution: &Solution);
}

#[macro_export]
macro_rules! entry_point {
    (problem = $problem:ident) => {
        fn main() -> anyhow::Result<()> {
            $crate::runner::run::<$problem>()
        }
    };
}

pub fn run<ProblemType: Problem>() -> anyhow::Result<()> {
    use clap::Parser;

    let args = Cli::<ProblemType::Instance>::parse();

    configure_logging(args.verbose);
    configure(true, "%%", None);

    info!("Solving {:?} with {:?}", args.instance, args.engine);

    let options = SearchOptions {
        commit_distance: args.commit_distance,
        adaptive_distance: args.adaptive_distance,
        threads: args.threads,
        termination: Some(termination(args.time_limit, args.node_limit)),
        seed: args.seed,
    };

    let (problem, space) = ProblemType::create(args.instance, &options)?;
    let limit = if args.solutions == 0 {
        usize::MAX
    } else {
        args.solutions
    };

    // Branch-and-bound reports improving solutions until the optimum is proven.
    let limit = match args.engine {
        Engine::Bab => usize::MAX,
        Engine::Dfs | Engine::Parallel => limit,
    };

    let (num_solutions, stopped, statistics) = match args.engine {
        Engine::Dfs => {
            let mut search = Dfs::new(space, options);
            let num_solutions = report(&problem, &mut search, limit);
            (num_solutions, search.stopped(), *search.statistics())
        }
        Engine::Bab => {
            let mut search = Bab::new(space, options);
            let num_solutions = report(&problem, &mut search, limit);
            (num_solutions, search.stopped(), *search.statistics())
        }
        Engine::Parallel => {
            let mut search = ParallelDfs::new(space, options);
            let num_solutions = report(&problem, &mut search, limit);
            (num_solutions, search.stopped(), *search.statistics())
        }
    };

    print_outcome(num_solutions, num_solutions >= limit, stopped, statistics);

    Ok(())
}

fn configure_logging(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
}

fn termination(time_limit: Option<u64>, node_limit: Option<u64>) -> Box<dyn TerminationCondition> {
    let mut termination: Box<dyn TerminationCondition> = Box::new(OsSignal::install());

    if let Some(seconds) = time_limit {
        termination = Box::new(Combinator::new(
            termination,
            TimeBudget::starting_now(Duration::from_secs(seconds)),
        ));
    }

    if let Some(nodes) = node_limit {
        termination = Box::new(Combinator::new(termination, NodeBudget::new(nodes)));
    }

    termination
}

fn report<ProblemType: Problem>(
    problem: &ProblemType,
    search: &mut impl Iterator<Item = Space>,
    limit: usize,
) -> usize {
    let mut num_solutions = 0;

    for space in search.take(limit) {
        problem.print_solution(&space.solution());
        println!("----------");

        num_solutions += 1;
    }

    num_solutions
}

fn print_outcome(
    num_solutions: usize,
    reached_limit: bool,
    stopped: bool,
    statistics: SearchStatistics,
) {
    if !stopped && !reached_limit {
        if num_solutions == 0 {
            println!("=====UNSATISFIABLE=====");
        } else {
            // The tree was exhausted, so the last solution is optimal or the list complete.
            println!("==========");
        }
    } else if stopped && num_solutions == 0 {
        println!("=====UNKNOWN=====");
    }

    statistics.log();
}

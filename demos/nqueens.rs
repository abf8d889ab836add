use marrow::branching::FirstFail;
use marrow::branching::InDomainMin;
use marrow::branching::InDomainRandom;
use marrow::branching::ViewValBrancher;
use marrow::constraints;
use marrow::entry_point;
use marrow::runner::Problem;
use marrow::search::SearchOptions;
use marrow::variables::DomainId;
use marrow::variables::TransformableVariable;
use marrow::Solution;
use marrow::Space;

#[derive(Debug, clap::Args)]
struct Instance {
    /// The size of the board. Should be an integer greater than 1.
    #[arg(value_parser = clap::value_parser!(i32).range(2..))]
    n: i32,

    /// Place the queens in random columns instead of the leftmost free one.
    #[arg(long)]
    random: bool,
}

/// Place `n` queens on an `n x n` board such that no two queens attack each other. Queen `i` is
/// placed in row `i`, the variable gives its column.
struct Queens {
    n: i32,
    queens: Vec<DomainId>,
}

impl Problem for Queens {
    type Instance = Instance;

    fn create(
        Instance { n, random }: Instance,
        options: &SearchOptions,
    ) -> anyhow::Result<(Self, Space)> {
        let mut space = Space::new();

        let queens = (0..n)
            .map(|row| space.new_named_int_var(0, n - 1, format!("q{row}")))
            .collect::<Result<Vec<_>, _>>()?;

        // The [q_i + i | 0 <= i < n] views
        let diag1 = queens
            .iter()
            .enumerate()
            .map(|(i, queen)| queen.offset(i as i32))
            .collect::<Vec<_>>();

        // The [q_i - i | 0 <= i < n] views
        let diag2 = queens
            .iter()
            .enumerate()
            .map(|(i, queen)| queen.offset(-(i as i32)))
            .collect::<Vec<_>>();

        space
            .add_constraint(constraints::all_different(queens.clone()))
            .post()?;
        space
            .add_constraint(constraints::all_different(diag1))
            .post()?;
        space
            .add_constraint(constraints::all_different(diag2))
            .post()?;

        if random {
            let _ = space.add_brancher(ViewValBrancher::new(
                queens.clone(),
                FirstFail,
                InDomainRandom::new(options.seed),
            ));
        } else {
            let _ = space.add_brancher(ViewValBrancher::new(
                queens.clone(),
                FirstFail,
                InDomainMin,
            ));
        }

        Ok((Queens { n, queens }, space))
    }

    fn print_solution(&self, solution: &Solution) {
        let row_separator = format!("{}+", "+---".repeat(self.n as usize));

        for queen in &self.queens {
            println!("{row_separator}");

            let queen_col = solution.get_integer_value(queen);

            for col in 0..self.n {
                let string = if queen_col == col { "| * " } else { "|   " };

                print!("{string}");
            }

            println!("|");
        }

        println!("{row_separator}");
    }
}

entry_point!(problem = Queens);

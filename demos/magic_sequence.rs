use marrow::branching::InDomainMin;
use marrow::branching::InputOrder;
use marrow::branching::ViewValBrancher;
use marrow::constraints;
use marrow::entry_point;
use marrow::runner::Problem;
use marrow::search::SearchOptions;
use marrow::variables::DomainId;
use marrow::IntRelation;
use marrow::Solution;
use marrow::Space;

#[derive(Debug, clap::Args)]
struct Instance {
    /// The length of the sequence.
    #[arg(value_parser = clap::value_parser!(i32).range(1..))]
    n: i32,
}

/// A sequence `x_0, ..., x_{n-1}` in which every `x_i` is the number of occurrences of `i` in
/// the sequence.
struct MagicSequence {
    sequence: Vec<DomainId>,
}

impl Problem for MagicSequence {
    type Instance = Instance;

    fn create(Instance { n }: Instance, _: &SearchOptions) -> anyhow::Result<(Self, Space)> {
        let mut space = Space::new();

        let sequence = (0..n)
            .map(|i| space.new_named_int_var(0, n - 1, format!("x{i}")))
            .collect::<Result<Vec<_>, _>>()?;

        for (value, &occurrences) in sequence.iter().enumerate() {
            space
                .add_constraint(constraints::count(
                    sequence.clone(),
                    value as i64,
                    IntRelation::Equal,
                    occurrences,
                ))
                .post()?;
        }

        // Redundant: the occurrences sum to the length, and the weighted sum counts the length
        // once more.
        space
            .add_constraint(constraints::linear_equals(sequence.clone(), n))
            .post()?;
        space
            .add_constraint(constraints::linear(
                (0..n).collect::<Vec<_>>(),
                sequence.clone(),
                IntRelation::Equal,
                n as i64,
            ))
            .post()?;

        let _ = space.add_brancher(ViewValBrancher::new(
            sequence.clone(),
            InputOrder,
            InDomainMin,
        ));

        Ok((MagicSequence { sequence }, space))
    }

    fn print_solution(&self, solution: &Solution) {
        let values = self
            .sequence
            .iter()
            .map(|x| solution.get_integer_value(x).to_string())
            .collect::<Vec<_>>();

        println!("sequence = [{}];", values.join(", "));
    }
}

entry_point!(problem = MagicSequence);

use std::fmt::Debug;

use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::variables::IntegerVariable;

/// A trait containing the interface for [`ValueSelector`]s, which decide the value the two
/// alternatives of a choice are about.
pub trait ValueSelector<Var>: Clone + Debug + Send + 'static {
    /// Determines the value of `decision_variable` to branch on. The domain of the variable has at
    /// least two values.
    fn select_value(&mut self, context: &PropagationContext, decision_variable: &Var) -> i32;

    /// How the selected value splits the domain.
    fn relation(&self) -> BranchRelation;
}

/// The two alternatives of a choice on value `v`, in the order they are explored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchRelation {
    /// `x = v`, then `x ≠ v`.
    Equal,
    /// `x ≤ v`, then `x > v`.
    LessOrEqual,
    /// `x > v`, then `x ≤ v`.
    Greater,
}

impl BranchRelation {
    pub(crate) fn commit<Var: IntegerVariable>(
        self,
        variable: &Var,
        assignments: &mut Assignments,
        value: i32,
        alternative: u32,
    ) -> Result<ModEvent, EmptyDomain> {
        match (self, alternative) {
            (BranchRelation::Equal, 0) => variable.assign(assignments, value),
            (BranchRelation::Equal, _) => variable.remove(assignments, value),
            (BranchRelation::LessOrEqual, 0) | (BranchRelation::Greater, 1) => {
                variable.set_upper_bound(assignments, value)
            }
            (BranchRelation::LessOrEqual, _) | (BranchRelation::Greater, _) => {
                variable.set_lower_bound(assignments, value + 1)
            }
        }
    }

    /// A readable form of alternative `alternative`, used in logging.
    pub(crate) fn describe(self, alternative: u32) -> &'static str {
        match (self, alternative) {
            (BranchRelation::Equal, 0) => "=",
            (BranchRelation::Equal, _) => "!=",
            (BranchRelation::LessOrEqual, 0) | (BranchRelation::Greater, 1) => "<=",
            (BranchRelation::LessOrEqual, _) | (BranchRelation::Greater, _) => ">",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BranchRelation;
    use crate::basic_types::RangeList;
    use crate::engine::cp::Assignments;

    #[test]
    fn alternatives_narrow_as_described() {
        for relation in [
            BranchRelation::Equal,
            BranchRelation::LessOrEqual,
            BranchRelation::Greater,
        ] {
            for alternative in 0..2 {
                let mut assignments = Assignments::default();
                let x = assignments.new_int_domain(RangeList::interval(0, 9));

                let _ = relation
                    .commit(&x, &mut assignments, 4, alternative)
                    .expect("both alternatives leave values");

                let expected = match relation.describe(alternative) {
                    "=" => RangeList::interval(4, 4),
                    "!=" => RangeList::from_values([0, 1, 2, 3, 5, 6, 7, 8, 9]),
                    "<=" => RangeList::interval(0, 4),
                    _ => RangeList::interval(5, 9),
                };
                assert_eq!(assignments.get_domain(x), &expected, "{relation:?} {alternative}");
            }
        }
    }
}

use crate::basic_types::RangeList;
use crate::engine::cp::Assignments;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::variables::SetDomainId;
use crate::marrow_assert_simple;

/// A read-only snapshot of the domains of a solved space.
///
/// Values are read through views, so the value of an affine view or a negated literal is
/// available without creating a variable for it.
#[derive(Debug, Clone)]
pub struct Solution {
    assignments: Assignments,
}

impl Solution {
    pub(crate) fn new(assignments: &Assignments) -> Solution {
        let mut assignments = assignments.clone();
        assignments.events_mut().clear();

        Solution { assignments }
    }

    pub fn num_domains(&self) -> usize {
        self.assignments.num_int_domains()
    }

    pub fn num_set_domains(&self) -> usize {
        self.assignments.num_set_domains()
    }

    /// The value of `variable`, which must be fixed.
    pub fn get_integer_value<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        marrow_assert_simple!(
            variable.is_fixed(&self.assignments),
            "{variable:?} is not fixed in the solution"
        );

        variable.lower_bound(&self.assignments)
    }

    pub fn get_literal_value(&self, literal: Literal) -> bool {
        self.get_integer_value(&literal) == 1
    }

    /// The remaining values of `domain`. Useful for variables no brancher decided.
    pub fn get_integer_domain(&self, domain: DomainId) -> &RangeList {
        self.assignments.get_domain(domain)
    }

    /// The value of a set variable, which must be fixed.
    pub fn get_set_value(&self, domain: SetDomainId) -> &RangeList {
        marrow_assert_simple!(
            self.assignments.is_set_fixed(domain),
            "{domain} is not fixed in the solution"
        );

        self.assignments.get_glb(domain)
    }

    /// The values of all integer variables, in the order they were created.
    pub fn integer_values(&self) -> impl Iterator<Item = (DomainId, i32)> + '_ {
        self.assignments
            .int_domains()
            .filter(|&domain| self.assignments.is_fixed(domain))
            .map(|domain| (domain, self.assignments.get_lower_bound(domain)))
    }
}

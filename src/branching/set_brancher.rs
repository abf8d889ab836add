use std::sync::Arc;

use log::warn;

use crate::basic_types::ValueRange;
use crate::branching::Brancher;
use crate::branching::Choice;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::ModEvent;
use crate::engine::variables::SetVariable;

/// What a [`SetBrancher`] tries first for the smallest undecided element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetValueSelection {
    /// Include the element, then exclude it.
    IncludeMin,
    /// Exclude the element, then include it.
    ExcludeMin,
}

/// Branches on the first set variable which is not fixed, deciding its smallest element which is
/// in the upper bound but not in the lower bound.
#[derive(Debug, Clone)]
pub struct SetBrancher<Var> {
    variables: Arc<[Var]>,
    start: usize,
    selection: SetValueSelection,
}

impl<Var: SetVariable> SetBrancher<Var> {
    pub fn new(variables: impl IntoIterator<Item = Var>, selection: SetValueSelection) -> Self {
        let variables: Arc<[Var]> = variables.into_iter().collect();
        if variables.is_empty() {
            warn!("A set brancher was created without any variables to branch on");
        }

        SetBrancher {
            variables,
            start: 0,
            selection,
        }
    }
}

impl<Var: SetVariable> Brancher for SetBrancher<Var> {
    fn name(&self) -> &str {
        "SetBrancher"
    }

    fn status(&mut self, context: PropagationContext) -> bool {
        while self.start < self.variables.len() {
            if !context.is_set_fixed(&self.variables[self.start]) {
                return true;
            }
            self.start += 1;
        }

        false
    }

    fn choice(&mut self, context: PropagationContext) -> Choice {
        let variable = &self.variables[self.start];

        let value = context
            .lub_ranges(variable)
            .flat_map(ValueRange::values)
            .find(|&value| !context.in_glb(variable, value))
            .expect("a set which is not fixed has an undecided element");

        Choice::new(2, self.start, value)
    }

    fn commit(
        &self,
        assignments: &mut Assignments,
        choice: &Choice,
        alternative: u32,
    ) -> Result<ModEvent, EmptyDomain> {
        let variable = &self.variables[choice.position()];
        let element = [ValueRange::singleton(choice.value())];

        let include = match self.selection {
            SetValueSelection::IncludeMin => alternative == 0,
            SetValueSelection::ExcludeMin => alternative != 0,
        };

        if include {
            variable.include(assignments, element)
        } else {
            variable.exclude(assignments, element)
        }
    }
}

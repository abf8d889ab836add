use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorStatus;
use crate::basic_types::RangeList;
use crate::basic_types::SharedArray;
use crate::basic_types::ValueRange;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorCost;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// Domain consistent propagator for `array[index] = value`, where `array` is a constant array
/// shared by every copy of the propagator.
///
/// Note that this propagator is 0-indexed.
#[derive(Clone, Debug)]
pub(crate) struct ElementConst<Index, Value> {
    array: SharedArray<i32>,
    index: Index,
    value: Value,
}

impl<Index, Value> ElementConst<Index, Value> {
    pub(crate) fn new(array: SharedArray<i32>, index: Index, value: Value) -> Self {
        ElementConst {
            array,
            index,
            value,
        }
    }
}

impl<Index, Value> Propagator for ElementConst<Index, Value>
where
    Index: IntegerVariable,
    Value: IntegerVariable,
{
    fn name(&self) -> &str {
        "ElementConst"
    }

    fn cost(&self) -> PropagatorCost {
        PropagatorCost::Linear
    }

    fn initialise(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> Result<(), Inconsistency> {
        let _ = context.register(self.index.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        let _ = context.register(self.value.clone(), DomainEvents::ANY_INT, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let last_index = self.array.len() as i32 - 1;
        let _ = context.set_lower_bound(&self.index, 0)?;
        let _ = context.set_upper_bound(&self.index, last_index)?;

        let region = context.region();
        let mut unsupported = region.vec();
        let mut supported_values = region.vec();

        for index in context.iterate_domain(&self.index) {
            let element = self.array[index as usize];
            if context.contains(&self.value, element) {
                supported_values.push(element);
            } else {
                unsupported.push(ValueRange::singleton(index));
            }
        }

        let _ = context.subtract(&self.index, unsupported.iter().copied())?;

        supported_values.sort_unstable();
        let supported = RangeList::from_values(supported_values.iter().copied());
        let _ = context.intersect(&self.value, supported.iter())?;

        if context.is_fixed(&self.index) {
            Ok(PropagatorStatus::Subsumed)
        } else {
            Ok(PropagatorStatus::Fix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_helper::TestSpace;

    #[test]
    fn index_and_value_support_each_other() {
        let mut space = TestSpace::default();
        let index = space.new_variable(-3, 10);
        let value = space.new_variable(4, 8);

        let array = SharedArray::from(vec![1, 5, 9, 4, 5, 2]);
        let _ = space
            .new_propagator(ElementConst::new(array, index, value))
            .expect("no empty domains");

        space.assert_domain(index, vec![1, 3, 4]);
        space.assert_domain(value, vec![4, 5]);
    }

    #[test]
    fn copies_share_the_array() {
        let array = SharedArray::from(vec![1, 2, 3]);
        let propagator = ElementConst::new(array.clone(), 0, 1);
        let copy = propagator.clone();

        assert!(!array.is_sole_holder());
        drop((propagator, copy));
        assert!(array.is_sole_holder());
    }
}

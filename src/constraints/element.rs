use super::Constraint;
use crate::basic_types::SharedArray;
use crate::propagators::element::ElementConst;
use crate::variables::IntegerVariable;

/// Creates the [element](https://sofdem.github.io/gccat/gccat/Celement.html) [`Constraint`]
/// which states that `array[index] = rhs`, with `index` counted from 0.
///
/// The array is shared by every copy of the space.
pub fn element(
    index: impl IntegerVariable + 'static,
    array: impl Into<SharedArray<i32>>,
    rhs: impl IntegerVariable + 'static,
) -> impl Constraint {
    ElementConst::new(array.into(), index, rhs)
}

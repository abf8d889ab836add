//! Value types shared by the whole crate: range lists and their iterators, shared constants,
//! propagation outcomes and errors.
mod constraint_operation_error;
mod hash_structures;
mod int_relation;
mod int_set;
mod limits;
mod propagation_status_cp;
mod range_iterators;
mod range_list;
mod shared_array;
mod solution;

pub use constraint_operation_error::ConstraintOperationError;
pub use hash_structures::*;
pub use int_relation::IntRelation;
pub use int_set::IntSet;
pub(crate) use limits::check_int_value;
pub(crate) use limits::check_set_value;
pub use limits::INT_LIMIT;
pub use limits::SET_LIMIT;
pub use propagation_status_cp::Inconsistency;
pub use propagation_status_cp::PropagationStatusCP;
pub use propagation_status_cp::PropagatorStatus;
pub use range_iterators::compare;
pub use range_iterators::Diff;
pub use range_iterators::Inter;
pub use range_iterators::Negate;
pub use range_iterators::Offset;
pub use range_iterators::SetComparison;
pub use range_iterators::Union;
pub use range_list::RangeList;
pub use range_list::ValueRange;
pub use shared_array::SharedArray;
pub use solution::Solution;

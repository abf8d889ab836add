mod binary_relations;
mod linear_less_or_equal;

pub(crate) use binary_relations::*;
pub(crate) use linear_less_or_equal::*;

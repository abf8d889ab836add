//! Propagators over Boolean views. Most of them only take positive literals; conjunctions,
//! implications and disequalities are posted through negated literals.
mod bool_eq;
mod clause;

pub(crate) use bool_eq::*;
pub(crate) use clause::*;

//! The propagator catalogue. Every propagator is written against the contract in
//! [`crate::propagation`] and posted through the functions in
//! [`crate::constraints`].

pub(crate) mod all_different;
pub(crate) mod arithmetic;
pub(crate) mod boolean;
pub(crate) mod count;
pub(crate) mod element;
pub(crate) mod int_set_dom;
pub(crate) mod set;

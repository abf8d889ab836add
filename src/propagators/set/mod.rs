//! Propagators over set views. Integer views take part through
//! [`SingletonView`](crate::variables::SingletonView) and constant sets through
//! [`IntSet`](crate::basic_types::IntSet).
mod cardinality;
mod membership;
mod set_re_eq;
mod subset;

pub(crate) use cardinality::*;
pub(crate) use membership::*;
pub(crate) use set_re_eq::*;
pub(crate) use subset::*;

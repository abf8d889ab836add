//! Tests which exercise several parts of the crate together.
mod constraints;
mod propagators;
mod search;
mod space;

//! Index-keyed storage used by the engine.
mod keyed_vec;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;

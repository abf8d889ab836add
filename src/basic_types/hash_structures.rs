//! Hash containers used throughout the crate. The keys are small integers, for which FNV hashing
//! is faster than the default SipHash.
use std::collections;
use std::hash::BuildHasherDefault;

use fnv::FnvHasher;

pub type HashMap<K, V, Hasher = BuildHasherDefault<FnvHasher>> = collections::HashMap<K, V, Hasher>;
pub type HashSet<K, Hasher = BuildHasherDefault<FnvHasher>> = collections::HashSet<K, Hasher>;

//! Provides the [`ValueSelector`] trait which is required
//! for value selectors to implement; the main method in this trait relies on
//! [`ValueSelector::select_value`].
//!
//! Furthermore, it defines several implementations of the [`ValueSelector`] trait such as
//! [`InDomainMin`] and [`InDomainSplitMin`]. Any [`ValueSelector`] should only select values
//! which are in the domain of the provided variable, and the [`BranchRelation`] it reports must
//! leave both alternatives non-empty.

mod in_domain_max;
mod in_domain_median;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;
mod value_selector;

pub use in_domain_max::InDomainMax;
pub use in_domain_median::InDomainMedian;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;
pub use in_domain_split::InDomainSplitMax;
pub use in_domain_split::InDomainSplitMin;
pub use value_selector::BranchRelation;
pub use value_selector::ValueSelector;

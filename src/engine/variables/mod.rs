//! Variables and the views through which propagators access them.
mod affine_view;
mod constant;
mod domain_id;
mod integer_variable;
mod literal;
mod set_domain_id;
mod set_variable;
mod singleton_view;
mod transformable_variable;

pub use affine_view::AffineView;
pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use literal::Literal;
pub use set_domain_id::SetDomainId;
pub use set_variable::SetVariable;
pub use singleton_view::SingletonView;
pub use transformable_variable::TransformableVariable;

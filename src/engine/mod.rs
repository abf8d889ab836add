pub(crate) mod cp;
pub mod termination;
pub mod variables;

mod debug_helper;
mod space;
pub(crate) mod test_helper;
mod variable_names;

pub(crate) use debug_helper::DebugHelper;
pub use space::PropagationOutcome;
pub use space::Space;
pub use space::SpaceStatus;
pub(crate) use variable_names::VariableNames;

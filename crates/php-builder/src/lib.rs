pub mod builder;
pub mod diagnostics;

pub use builder::TraitBuilder;
pub use diagnostics::StructuralError;

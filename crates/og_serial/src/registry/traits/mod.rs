// -----------------------------------------------------------------------------
// Modules

mod blank;
mod default;
mod strategy;

// -----------------------------------------------------------------------------
// Exports

pub use blank::TypeTraitBlank;
pub use default::TypeTraitDefault;
pub use strategy::{TypeTraitAdapter, TypeTraitCompanion, TypeTraitSelfSerial, TypeTraitWith};

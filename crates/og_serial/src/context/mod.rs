//! The serial context: registered types, strategy resolution and the
//! instance plans.
//!
//! ## Resolution chain
//!
//! The first rule that applies to a type decides its [`Strategy`]:
//!
//! 1. installed [`SerialModule`]s, explicit registrations first,
//! 2. [`SelfSerial`] types,
//! 3. unit enums, by ordinal,
//! 4. `Vec<T>`, with a dedicated codec for fixed-width primitives,
//! 5. a strategy declared with `#[serial(with = ...)]`,
//! 6. an [`Adapter`] declared with `#[serial(adapter = ...)]`,
//! 7. a [`Companion`] strategy,
//! 8. data classes, rebuilt through their constructor,
//! 9. the field walk.
//!
//! Declared strategies (rules 1, 5, 6 and 7) are checked against the type
//! when they are resolved.
//!
//! [`Strategy`]: crate::Strategy
//! [`SelfSerial`]: crate::strategy::SelfSerial
//! [`Adapter`]: crate::strategy::Adapter
//! [`Companion`]: crate::strategy::Companion

// -----------------------------------------------------------------------------
// Modules

mod bundle;
mod config;
mod instance;
mod module;
mod resolver;
mod serial_context;

// -----------------------------------------------------------------------------
// Exports

pub use bundle::Bundle;
pub use config::{SerialConfig, SharingMode};
pub use instance::{Constructor, InstancePlan};
pub use module::{DefaultModule, ExplicitModule, SerialModule};
pub use resolver::{ClassResolver, RegistryResolver};
pub use serial_context::{SerialContext, SerialContextBuilder};

//! Type registration.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability attached to a registered type.
//! - [`FromType`]: creates a type trait from a type.
//! - [`TypeMeta`]: a [`TypeInfo`] plus a type trait table.
//! - [`GetTypeMeta`]: creates the `TypeMeta` of a type.
//! - [`TypeRegistry`]: the store of `TypeMeta`s, looked up by id, path or name.
//! - Type traits:
//!     - [`TypeTraitDefault`]: zero-argument constructor.
//!     - [`TypeTraitBlank`]: raw allocation fallback.
//!     - [`TypeTraitSelfSerial`], [`TypeTraitWith`], [`TypeTraitAdapter`],
//!       [`TypeTraitCompanion`]: declared strategies, in resolution order.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`]. Static registration uses the
//! `inventory` crate; on platforms it does not support, nothing is
//! collected.
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{TypeTraitAdapter, TypeTraitCompanion, TypeTraitSelfSerial, TypeTraitWith};
pub use traits::{TypeTraitBlank, TypeTraitDefault};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;

//! Static type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type paths, used as class names on the wire.
//! - [`Typed`]: static access to a [`TypeInfo`].
//! - [`TypeInfo`]: the shape of a type plus the accessors the built-in
//!   strategies need:
//!     - [`StructInfo`] with [`FieldInfo`]s and an optional [`DataConstructor`],
//!     - [`EnumInfo`] with ordinal conversion,
//!     - [`SequenceInfo`] and [`MapInfo`] with item codecs,
//!     - [`PrimitiveInfo`] and [`OpaqueInfo`].

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod sequence_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::EnumInfo;
pub use sequence_info::{ItemsReadFn, ItemsWriteFn, MapInfo, SequenceInfo};
pub use struct_info::{DataArgs, DataConstructor, FieldInfo, FieldReadFn, FieldWriteFn, StructInfo};
pub use type_info::{OpaqueInfo, PrimitiveInfo, TypeInfo, TypeKind};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::Typed;

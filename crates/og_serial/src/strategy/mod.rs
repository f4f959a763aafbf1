//! Encoding strategies.
//!
//! A [`Strategy`] is either in-place (reads into an allocated value, so the
//! value can be referenced before it is complete) or value-based (builds the
//! finished value in one step).
//!
//! ## Built-in strategies
//!
//! - [`PrimitiveArraySerializer`]: `Vec` of fixed-width primitives, no per-item tag.
//! - [`SequenceSerializer`]: arrays, lists and sets of any item.
//! - [`MapSerializer`]: maps.
//! - [`EnumSerializer`]: unit enums by ordinal.
//! - [`DataSerializer`]: data classes rebuilt from all their field values.
//! - [`FieldWalkSerializer`]: the default, a walk over the declared fields.
//! - [`AdapterSerializer`]: properties of an [`Adapter`], in name order.
//! - [`SelfSerialSerializer`]: types implementing [`SelfSerial`].
//! - [`CompoundSerializer`]: types made of [`Compound`] components.

// -----------------------------------------------------------------------------
// Modules

mod adapter;
mod compound;
mod data;
mod enum_ordinal;
mod fields;
mod map;
mod primitive_array;
mod self_serial;
mod sequence;
mod serializer;

// -----------------------------------------------------------------------------
// Exports

pub use adapter::{Adapter, AdapterSerializer, Property, SystemTimeAdapter};
pub use compound::{Compound, CompoundSerializer, compound};
pub use data::DataSerializer;
pub use enum_ordinal::EnumSerializer;
pub use fields::FieldWalkSerializer;
pub use map::MapSerializer;
pub use primitive_array::PrimitiveArraySerializer;
pub use self_serial::{Companion, SelfSerial, SelfSerialSerializer};
pub use sequence::SequenceSerializer;
pub use serializer::{DynInplaceSerializer, DynSerializer, DynValueSerializer};
pub use serializer::{InplaceSerializer, Serializer, ValueSerializer};

use serializer::{TypedInplace, TypedValue};

/// Upper bound on capacity reserved from a count read off the stream.
pub(crate) const PREALLOC_LIMIT: usize = 1 << 16;

// -----------------------------------------------------------------------------
// Strategy

use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::info::Type;
use crate::{Object, Output, SerialError};

/// The resolved encoding of one type.
///
/// Cheap to clone; the serializer itself is shared.
#[derive(Clone)]
pub enum Strategy {
    Inplace(Arc<dyn DynInplaceSerializer>),
    Value(Arc<dyn DynValueSerializer>),
}

impl Strategy {
    #[inline]
    pub fn inplace<S: InplaceSerializer>(serializer: S) -> Self {
        Self::Inplace(Arc::new(TypedInplace(serializer)))
    }

    #[inline]
    pub fn value<S: ValueSerializer>(serializer: S) -> Self {
        Self::Value(Arc::new(TypedValue(serializer)))
    }

    #[inline]
    pub fn dyn_inplace(serializer: impl DynInplaceSerializer) -> Self {
        Self::Inplace(Arc::new(serializer))
    }

    #[inline]
    pub fn dyn_value(serializer: impl DynValueSerializer) -> Self {
        Self::Value(Arc::new(serializer))
    }

    #[inline]
    pub fn is_inplace(&self) -> bool {
        matches!(self, Self::Inplace(_))
    }

    /// See [`DynSerializer::target`].
    pub fn target(&self) -> Option<TypeId> {
        match self {
            Self::Inplace(serializer) => serializer.target(),
            Self::Value(serializer) => serializer.target(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Inplace(serializer) => serializer.serializer_name(),
            Self::Value(serializer) => serializer.serializer_name(),
        }
    }

    /// Writes the payload of `value`.
    pub fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        match self {
            Self::Inplace(serializer) => serializer.serialize(value, output),
            Self::Value(serializer) => serializer.serialize(value, output),
        }
    }

    /// Fails unless the strategy is usable for `ty`.
    pub(crate) fn check(self, ty: &Type) -> Result<Self, SerialError> {
        match self.target() {
            Some(target) if target != ty.id() => Err(SerialError::IncompatibleSerializer {
                type_path: ty.path(),
                serializer: self.name(),
            }),
            _ => Ok(self),
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inplace(_) => f.debug_tuple("Inplace").field(&self.name()).finish(),
            Self::Value(_) => f.debug_tuple("Value").field(&self.name()).finish(),
        }
    }
}

use core::fmt;

use crate::info::{Type, TypePath};
use crate::strategy::Strategy;
use crate::{Input, Object, Output, SerialError};

/// Writes the length and contents of a container.
pub type ItemsWriteFn = fn(&dyn Object, &mut Output<'_>) -> Result<(), SerialError>;

/// Replaces the contents of a container with the items read.
pub type ItemsReadFn = fn(&mut dyn Object, &mut Input<'_>) -> Result<(), SerialError>;

// -----------------------------------------------------------------------------
// SequenceInfo

/// Info of an array, list or set.
pub struct SequenceInfo {
    ty: Type,
    item: Type,
    write_items: ItemsWriteFn,
    read_items: ItemsReadFn,
    primitive_array: Option<fn() -> Strategy>,
}

impl SequenceInfo {
    pub fn new<T: TypePath, I: TypePath>(write_items: ItemsWriteFn, read_items: ItemsReadFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            item: Type::of::<I>(),
            write_items,
            read_items,
            primitive_array: None,
        }
    }

    /// Sets the dedicated codec used when the items are fixed-width primitives.
    pub fn with_primitive_array(mut self, strategy: Option<fn() -> Strategy>) -> Self {
        self.primitive_array = strategy;
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn item_ty(&self) -> &Type {
        &self.item
    }

    #[inline]
    pub fn primitive_array(&self) -> Option<fn() -> Strategy> {
        self.primitive_array
    }

    #[inline]
    pub fn write_items(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        (self.write_items)(value, output)
    }

    #[inline]
    pub fn read_items(&self, target: &mut dyn Object, input: &mut Input<'_>) -> Result<(), SerialError> {
        (self.read_items)(target, input)
    }
}

impl fmt::Debug for SequenceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceInfo")
            .field("ty", &self.ty)
            .field("item", &self.item)
            .field("primitive_array", &self.primitive_array.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Info of a map.
pub struct MapInfo {
    ty: Type,
    key: Type,
    value: Type,
    write_entries: ItemsWriteFn,
    read_entries: ItemsReadFn,
}

impl MapInfo {
    pub fn new<T: TypePath, K: TypePath, V: TypePath>(
        write_entries: ItemsWriteFn,
        read_entries: ItemsReadFn,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            key: Type::of::<K>(),
            value: Type::of::<V>(),
            write_entries,
            read_entries,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn key_ty(&self) -> &Type {
        &self.key
    }

    #[inline]
    pub const fn value_ty(&self) -> &Type {
        &self.value
    }

    #[inline]
    pub fn write_entries(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        (self.write_entries)(value, output)
    }

    #[inline]
    pub fn read_entries(&self, target: &mut dyn Object, input: &mut Input<'_>) -> Result<(), SerialError> {
        (self.read_entries)(target, input)
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo")
            .field("ty", &self.ty)
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

use alloc::boxed::Box;
use core::fmt;

use crate::Object;
use crate::info::{Type, TypePath};

/// Info of a unit-only enum.
///
/// The stream stores the ordinal, the position of the variant in
/// declaration order. Reordering variants changes the meaning of
/// previously written streams; nothing records the order itself.
pub struct EnumInfo {
    ty: Type,
    variants: &'static [&'static str],
    ordinal: fn(&dyn Object) -> Option<usize>,
    from_ordinal: fn(usize) -> Option<Box<dyn Object>>,
}

impl EnumInfo {
    pub fn new<T: TypePath>(
        variants: &'static [&'static str],
        ordinal: fn(&dyn Object) -> Option<usize>,
        from_ordinal: fn(usize) -> Option<Box<dyn Object>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants,
            ordinal,
            from_ordinal,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Variant names in declaration order.
    #[inline]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| *variant == name)
    }

    /// The ordinal of `value`, `None` if it is not of this enum.
    #[inline]
    pub fn ordinal(&self, value: &dyn Object) -> Option<usize> {
        (self.ordinal)(value)
    }

    /// The variant at `ordinal`.
    #[inline]
    pub fn from_ordinal(&self, ordinal: usize) -> Option<Box<dyn Object>> {
        (self.from_ordinal)(ordinal)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("variants", &self.variants)
            .finish()
    }
}

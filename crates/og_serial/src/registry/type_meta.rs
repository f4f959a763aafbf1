use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use og_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Registered metadata of one type: its [`TypeInfo`] and a table of
/// [`TypeTrait`]s.
///
/// The resolution chain and the instantiation plan read the type traits:
/// [`TypeTraitDefault`] and [`TypeTraitBlank`] construct values, the
/// strategy traits declare how the type is encoded.
///
/// ```
/// use og_serial::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait(<TypeTraitDefault as FromType<String>>::from_type());
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// ```
///
/// [`TypeTraitDefault`]: crate::registry::TypeTraitDefault
/// [`TypeTraitBlank`]: crate::registry::TypeTraitBlank
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            type_info: T::type_info(),
            trait_table: TypeIdMap::new(),
        }
    }

    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn ty(&self) -> &'static Type {
        self.type_info.ty()
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_info.type_id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_info.type_path()
    }

    /// Inserts or replaces a [`TypeTrait`].
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|data| <dyn TypeTrait>::downcast_ref(data.deref()))
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for (id, data) in self.trait_table.iter() {
            trait_table.insert(*id, (**data).clone_type_trait());
        }
        Self {
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_info", &self.type_info)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Creates the [`TypeMeta`] of a type for registration.
///
/// Implemented by `#[derive(Serial)]`, which also registers the field types
/// in [`register_dependencies`](GetTypeMeta::register_dependencies).
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot be registered",
    note = "consider annotating `{Self}` with `#[derive(Serial)]`"
)]
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

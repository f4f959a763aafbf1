//! Static storage for type information.
//!
//! A `static` inside a generic function is shared by every instantiation,
//! so generic types key their storage by [`TypeId`]. Non-generic types only
//! need a [`OnceLock`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use og_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    pub trait Stored: Send + Sync + 'static {}

    impl Stored for String {}
    impl Stored for crate::info::TypeInfo {}
}

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// The [`TypeInfo`] of one non-generic type.
///
/// ```
/// use og_serial::impls::NonGenericTypeInfoCell;
/// use og_serial::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// struct Handle;
///
/// impl TypePath for Handle {
///     fn type_path() -> &'static str { "demo::Handle" }
///     fn type_name() -> &'static str { "Handle" }
///     fn type_ident() -> &'static str { "Handle" }
/// }
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Handle>()))
///     }
/// }
///
/// assert_eq!(Handle::type_info().type_path(), "demo::Handle");
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericCell

/// Per-type storage inside a `static` of a generic function.
///
/// Values are leaked on insertion and live for the rest of the program.
pub struct GenericCell<T: sealed::Stored>(RwLock<TypeIdMap<&'static T>>);

/// The [`TypeInfo`] of each instantiation of a generic type.
pub type GenericTypeInfoCell = GenericCell<TypeInfo>;

/// The type path or name of each instantiation of a generic type.
///
/// ```
/// use og_serial::impls::{GenericTypePathCell, concat};
/// use og_serial::info::TypePath;
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Pair<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Pair<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Pair" }
/// }
///
/// assert_eq!(Pair::<i32>::type_path(), "demo::Pair<i32>");
/// assert_eq!(Pair::<String>::type_name(), "Pair<String>");
/// ```
pub type GenericTypePathCell = GenericCell<String>;

impl<T: sealed::Stored> GenericCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// The value stored for `G`, created by `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &'static T {
        let type_id = TypeId::of::<G>();
        match self.get(type_id) {
            Some(value) => value,
            None => self.insert(type_id, f()),
        }
    }

    #[inline(never)]
    fn get(&self, type_id: TypeId) -> Option<&'static T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert(&self, type_id: TypeId, value: T) -> &'static T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl<T: sealed::Stored> Default for GenericCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

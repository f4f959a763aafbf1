use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, TypeInfo, TypePath};
use crate::SerialError;
use crate::object::SharedCell;

// -----------------------------------------------------------------------------
// Object

/// A value the codec can write and read through dynamic dispatch.
///
/// Implemented by `#[derive(Serial)]`, by the primitive types that have a
/// tag sentinel and by the supported containers. `Box<dyn Object>` and
/// [`Shared<dyn Object>`] are the polymorphic slots: their class is written
/// to the stream.
///
/// ```
/// use og_serial::Object;
///
/// let value: Box<dyn Object> = Box::new(450_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.take::<i32>().ok(), Some(450));
/// ```
///
/// [`Shared<dyn Object>`]: crate::Shared
pub trait Object: DynamicTypePath + Any {
    #[inline(always)]
    fn as_object(&self) -> &dyn Object
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_object_mut(&mut self) -> &mut dyn Object
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_object(self: Box<Self>) -> Box<dyn Object>
    where
        Self: Sized,
    {
        self
    }

    /// Moves the value into a new shared cell.
    fn into_shared(self: Box<Self>) -> SharedCell;

    /// The static [`TypeInfo`] of the underlying type.
    fn object_info(&self) -> &'static TypeInfo;

    /// Replaces `self` with `value` if it has the same type.
    fn set(&mut self, value: Box<dyn Object>) -> Result<(), Box<dyn Object>>;

    /// Structural equality, `None` when the type does not support it.
    #[inline]
    fn object_eq(&self, _other: &dyn Object) -> Option<bool> {
        None
    }

    /// A stable structural hash, `None` when the type does not support it.
    #[inline]
    fn object_hash(&self) -> Option<u64> {
        None
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.object_type_path())
    }
}

impl dyn Object {
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).type_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    pub fn downcast<T: Any>(self: Box<dyn Object>) -> Result<Box<T>, Box<dyn Object>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    #[inline]
    pub fn take<T: Any>(self: Box<dyn Object>) -> Result<T, Box<dyn Object>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Like [`downcast_ref`](Self::downcast_ref), failing with
    /// [`SerialError::TypeMismatch`].
    pub fn try_downcast_ref<T: TypePath + Any>(&self) -> Result<&T, SerialError> {
        let found = self.object_type_path();
        self.downcast_ref::<T>().ok_or(SerialError::TypeMismatch {
            expected: T::type_path(),
            found,
        })
    }

    /// Like [`downcast_mut`](Self::downcast_mut), failing with
    /// [`SerialError::TypeMismatch`].
    pub fn try_downcast_mut<T: TypePath + Any>(&mut self) -> Result<&mut T, SerialError> {
        let found = self.object_type_path();
        self.downcast_mut::<T>().ok_or(SerialError::TypeMismatch {
            expected: T::type_path(),
            found,
        })
    }

    /// Like [`take`](Self::take), failing with [`SerialError::TypeMismatch`].
    pub fn try_take<T: TypePath + Any>(self: Box<dyn Object>) -> Result<T, SerialError> {
        self.take::<T>().map_err(|value| SerialError::TypeMismatch {
            expected: T::type_path(),
            found: (*value).object_type_path(),
        })
    }
}

impl fmt::Debug for dyn Object {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object_debug(f)
    }
}

impl TypePath for dyn Object {
    #[inline]
    fn type_path() -> &'static str {
        "dyn og_serial::Object"
    }

    #[inline]
    fn type_name() -> &'static str {
        "dyn Object"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "dyn Object"
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the object plumbing shared by every sized [`Object`].
///
/// Expects `Self: Typed`.
macro_rules! impl_object_cast_fn {
    () => {
        #[inline]
        fn into_shared(self: ::alloc::boxed::Box<Self>) -> $crate::object::SharedCell {
            $crate::object::SharedCell::new(*self)
        }

        #[inline]
        fn object_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Object>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Object>> {
            *self = value.take::<Self>()?;
            Ok(())
        }
    };
}

pub(crate) use impl_object_cast_fn;

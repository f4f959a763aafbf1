use alloc::boxed::Box;
use core::any::{TypeId, type_name};

use crate::info::TypePath;
use crate::{Input, Object, Output, SerialError};

// -----------------------------------------------------------------------------
// Typed contracts

/// Writes values of one type.
///
/// Implement [`InplaceSerializer`] or [`ValueSerializer`] on top and wrap the
/// serializer with [`Strategy::inplace`] or [`Strategy::value`].
///
/// [`Strategy::inplace`]: crate::Strategy::inplace
/// [`Strategy::value`]: crate::Strategy::value
pub trait Serializer: Send + Sync + 'static {
    type Target: Object + TypePath;

    fn serialize(&self, value: &Self::Target, output: &mut Output<'_>) -> Result<(), SerialError>;
}

/// Reads into a value that already exists.
///
/// The reader allocates the target and registers it under its id before
/// calling [`deserialize_into`](Self::deserialize_into), so back-references
/// to the target from inside its own contents resolve.
pub trait InplaceSerializer: Serializer {
    fn deserialize_into(
        &self,
        target: &mut Self::Target,
        input: &mut Input<'_>,
    ) -> Result<(), SerialError>;
}

/// Reads a finished value in one step.
///
/// The value is registered under its id only after it is complete, so it
/// cannot be reached through a back-reference from inside itself.
pub trait ValueSerializer: Serializer {
    fn deserialize(&self, input: &mut Input<'_>) -> Result<Self::Target, SerialError>;
}

// -----------------------------------------------------------------------------
// Dynamic contracts

/// The object-safe form of [`Serializer`].
pub trait DynSerializer: Send + Sync + 'static {
    /// The type this serializer is written for, `None` if it accepts any.
    fn target(&self) -> Option<TypeId>;

    fn serializer_name(&self) -> &'static str;

    fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError>;
}

/// The object-safe form of [`InplaceSerializer`].
pub trait DynInplaceSerializer: DynSerializer {
    fn deserialize_into(
        &self,
        target: &mut dyn Object,
        input: &mut Input<'_>,
    ) -> Result<(), SerialError>;
}

/// The object-safe form of [`ValueSerializer`].
pub trait DynValueSerializer: DynSerializer {
    fn deserialize(&self, input: &mut Input<'_>) -> Result<Box<dyn Object>, SerialError>;
}

// -----------------------------------------------------------------------------
// Typed wrappers

pub(crate) struct TypedInplace<S>(pub S);

pub(crate) struct TypedValue<S>(pub S);

macro_rules! impl_typed_dyn_serializer {
    ($wrapper:ident) => {
        impl<S: Serializer> DynSerializer for $wrapper<S> {
            #[inline]
            fn target(&self) -> Option<TypeId> {
                Some(TypeId::of::<S::Target>())
            }

            #[inline]
            fn serializer_name(&self) -> &'static str {
                type_name::<S>()
            }

            fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
                self.0.serialize(value.try_downcast_ref::<S::Target>()?, output)
            }
        }
    };
}

impl_typed_dyn_serializer!(TypedInplace);
impl_typed_dyn_serializer!(TypedValue);

impl<S: InplaceSerializer> DynInplaceSerializer for TypedInplace<S> {
    fn deserialize_into(
        &self,
        target: &mut dyn Object,
        input: &mut Input<'_>,
    ) -> Result<(), SerialError> {
        self.0
            .deserialize_into(target.try_downcast_mut::<S::Target>()?, input)
    }
}

impl<S: ValueSerializer> DynValueSerializer for TypedValue<S> {
    fn deserialize(&self, input: &mut Input<'_>) -> Result<Box<dyn Object>, SerialError> {
        Ok(Box::new(self.0.deserialize(input)?))
    }
}

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::info::TypePath;
use crate::strategy::{InplaceSerializer, Serializer, Strategy};
use crate::{Input, Object, Output, SerialError};

/// A value made of component objects.
///
/// Both methods list the same components in the same order.
pub trait Compound: Object + TypePath {
    fn components(&self) -> Vec<&dyn Object>;

    fn components_mut(&mut self) -> Vec<&mut dyn Object>;
}

/// Writes each component untyped and reads each back into the existing
/// component.
pub struct CompoundSerializer<T>(PhantomData<fn() -> T>);

impl<T: Compound> CompoundSerializer<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Compound> Default for CompoundSerializer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Compound> Serializer for CompoundSerializer<T> {
    type Target = T;

    fn serialize(&self, value: &T, output: &mut Output<'_>) -> Result<(), SerialError> {
        for component in value.components() {
            output.write_untyped(component)?;
        }
        Ok(())
    }
}

impl<T: Compound> InplaceSerializer for CompoundSerializer<T> {
    fn deserialize_into(&self, target: &mut T, input: &mut Input<'_>) -> Result<(), SerialError> {
        for component in target.components_mut() {
            input.read_inplace(component)?;
        }
        Ok(())
    }
}

/// The strategy of a [`Compound`] type, for use as a companion or module
/// entry.
#[inline]
pub fn compound<T: Compound>() -> Strategy {
    Strategy::inplace(CompoundSerializer::<T>::new())
}

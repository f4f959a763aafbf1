use crate::info::TypePath;
use crate::registry::TypeRegistry;
use crate::strategy::Strategy;
use crate::{Input, Output, SerialError};

/// A statically typed slot: a struct field, a container item or a top-level
/// value written with [`Output::write_value`].
///
/// The slot decides the framing. Concrete types are final: their class is
/// known from the slot type and they are written untyped. `Box<dyn Object>`
/// and `Shared<dyn Object>` are not final and write the class of the value.
/// `Option<T>` adds a null marker; `Shared<T>` adds identity.
///
/// `#[derive(Serial)]` implements this trait for the type itself.
pub trait Serial: TypePath + Sized {
    /// Whether the class of a value in this slot is implied by the slot.
    const FINAL: bool = true;

    /// The dedicated codec for `Vec<Self>`, set for fixed-width primitives.
    const ARRAY_STRATEGY: Option<fn() -> Strategy> = None;

    fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError>;

    fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError>;

    /// Whether this value is written as the bare null marker.
    #[inline]
    fn is_null_slot(&self) -> bool {
        false
    }

    /// Reads into an existing value. Replaces it by default.
    fn read_slot_in_place(&mut self, input: &mut Input<'_>) -> Result<(), SerialError> {
        *self = Self::read_slot(input)?;
        Ok(())
    }

    /// Registers the types a value in this slot may need.
    fn register_slot(_registry: &mut TypeRegistry) {}
}

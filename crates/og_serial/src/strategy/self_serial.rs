use core::marker::PhantomData;

use crate::info::TypePath;
use crate::strategy::{InplaceSerializer, Serializer, Strategy};
use crate::{Input, Object, Output, SerialError};

// -----------------------------------------------------------------------------
// SelfSerial

/// A type that writes and reads its own payload.
///
/// Checked before every other declaration of the type. Enabled with
/// `#[serial(self_describing)]`.
///
/// ```
/// use og_serial::{Input, Output, SerialError, derive::Serial, strategy::SelfSerial};
///
/// #[derive(Serial, Default)]
/// #[serial(default, self_describing)]
/// struct Rgb { packed: i32 }
///
/// impl SelfSerial for Rgb {
///     fn serialize(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
///         output.write_raw(&self.packed.to_be_bytes()[1..])
///     }
///
///     fn deserialize(&mut self, input: &mut Input<'_>) -> Result<(), SerialError> {
///         let [r, g, b] = input.read_array()?;
///         self.packed = i32::from_be_bytes([0, r, g, b]);
///         Ok(())
///     }
/// }
/// ```
pub trait SelfSerial: Object + TypePath {
    fn serialize(&self, output: &mut Output<'_>) -> Result<(), SerialError>;

    /// Reads the payload into a freshly constructed value.
    fn deserialize(&mut self, input: &mut Input<'_>) -> Result<(), SerialError>;
}

/// The in-place strategy of a [`SelfSerial`] type.
pub struct SelfSerialSerializer<T>(PhantomData<fn() -> T>);

impl<T: SelfSerial> SelfSerialSerializer<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: SelfSerial> Default for SelfSerialSerializer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SelfSerial> Serializer for SelfSerialSerializer<T> {
    type Target = T;

    #[inline]
    fn serialize(&self, value: &T, output: &mut Output<'_>) -> Result<(), SerialError> {
        value.serialize(output)
    }
}

impl<T: SelfSerial> InplaceSerializer for SelfSerialSerializer<T> {
    #[inline]
    fn deserialize_into(&self, target: &mut T, input: &mut Input<'_>) -> Result<(), SerialError> {
        target.deserialize(input)
    }
}

// -----------------------------------------------------------------------------
// Companion

/// A type that supplies its own [`Strategy`].
///
/// Enabled with `#[serial(companion)]`. The returned strategy must target
/// the type itself.
pub trait Companion: Object + TypePath {
    fn companion() -> Strategy;
}

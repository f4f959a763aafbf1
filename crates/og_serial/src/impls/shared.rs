use crate::registry::{GetTypeMeta, TypeRegistry};
use crate::{Input, Object, Output, Serial, SerialError, Shared};

/// A node of a known type, written without its class.
impl<T: Object + GetTypeMeta> Serial for Shared<T> {
    fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.context().ensure_registered::<T>();
        output.write_shared_untyped(self)
    }

    #[inline]
    fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError> {
        input.read_shared_untyped::<T>()
    }

    #[inline]
    fn register_slot(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

/// The polymorphic node: the class of the value is written.
impl Serial for Shared<dyn Object> {
    const FINAL: bool = false;

    #[inline]
    fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_shared(self)
    }

    #[inline]
    fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError> {
        input.read_shared()
    }
}

use alloc::boxed::Box;

use crate::info::TypePath;
use crate::{Input, Object, Output, Serial, SerialError};

impl TypePath for Box<dyn Object> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::boxed::Box<dyn og_serial::Object>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Box<dyn Object>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

/// The polymorphic owned slot: the class of the value is written.
impl Serial for Box<dyn Object> {
    const FINAL: bool = false;

    #[inline]
    fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_object(&**self)
    }

    #[inline]
    fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError> {
        input.read_object()
    }
}

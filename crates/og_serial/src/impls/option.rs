use crate::impls::{GenericTypePathCell, concat};
use crate::info::TypePath;
use crate::registry::TypeRegistry;
use crate::{Input, Output, Serial, SerialError};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

/// `None` is a null marker, `Some` is framed by `T`.
///
/// `Some(None)` would share the marker of `None`, so writing it fails.
impl<T: Serial> Serial for Option<T> {
    const FINAL: bool = T::FINAL;

    fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        match self {
            Some(value) if value.is_null_slot() => Err(SerialError::AmbiguousNull(Self::type_path())),
            Some(value) => value.write_slot(output),
            None => output.write_null(),
        }
    }

    #[inline]
    fn is_null_slot(&self) -> bool {
        self.is_none()
    }

    fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError> {
        if input.is_null_next()? {
            input.read_null()?;
            return Ok(None);
        }
        T::read_slot(input).map(Some)
    }

    #[inline]
    fn register_slot(registry: &mut TypeRegistry) {
        T::register_slot(registry);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{Output, SerialContext, SerialError};

    #[test]
    fn nested_none_is_rejected() {
        let context = SerialContext::new();
        let mut bytes = Vec::new();
        let mut output = Output::new(&context, &mut bytes);

        output.write_value(&Some(Some(3_i32))).unwrap();
        output.write_value(&None::<Option<i32>>).unwrap();
        let result = output.write_value(&Some(None::<i32>));
        output.close().unwrap();

        assert!(matches!(
            result,
            Err(SerialError::AmbiguousNull("core::option::Option<core::option::Option<i32>>"))
        ));
        assert_eq!(bytes, [0xFA, 0, 0, 0, 3, 0x01]);
    }
}

use alloc::boxed::Box;
use alloc::vec::{self, Vec};
use core::any::Any;
use core::fmt;

use crate::info::{Type, TypePath};
use crate::{Input, Object, Output, Serial, SerialError};

/// Writes one field of a struct.
pub type FieldWriteFn = fn(&dyn Object, &mut Output<'_>) -> Result<(), SerialError>;

/// Reads one field into an existing struct.
pub type FieldReadFn = fn(&mut dyn Object, &mut Input<'_>) -> Result<(), SerialError>;

/// Builds a data class from its field values, in field order.
pub type DataConstructor = fn(DataArgs) -> Result<Box<dyn Object>, SerialError>;

// -----------------------------------------------------------------------------
// FieldInfo

/// A serialized field of a struct.
///
/// Transient fields are left out of [`StructInfo`] entirely.
#[derive(Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    index: usize,
    ty: Type,
    is_final: bool,
    write: FieldWriteFn,
    read_into: FieldReadFn,
    read_value: fn(&mut Input<'_>) -> Result<Box<dyn Any>, SerialError>,
}

fn read_boxed<F: Serial>(input: &mut Input<'_>) -> Result<Box<dyn Any>, SerialError> {
    Ok(Box::new(F::read_slot(input)?))
}

impl FieldInfo {
    /// Creates the info of field `name` of type `F`.
    ///
    /// `index` is the declaration index, counting transient fields.
    /// Tuple fields are named by their index.
    pub fn new<F: Serial>(
        name: &'static str,
        index: usize,
        write: FieldWriteFn,
        read_into: FieldReadFn,
    ) -> Self {
        Self {
            name,
            index,
            ty: Type::of::<F>(),
            is_final: F::FINAL,
            write,
            read_into,
            read_value: read_boxed::<F>,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Whether the slot is written without its class.
    #[inline]
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    #[inline]
    pub fn write(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        (self.write)(value, output)
    }

    #[inline]
    pub fn read_into(&self, target: &mut dyn Object, input: &mut Input<'_>) -> Result<(), SerialError> {
        (self.read_into)(target, input)
    }

    /// Reads the field on its own, for [`DataArgs`].
    #[inline]
    pub fn read_value(&self, input: &mut Input<'_>) -> Result<Box<dyn Any>, SerialError> {
        (self.read_value)(input)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("ty", &self.ty)
            .field("is_final", &self.is_final)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Info of a struct: its serialized fields in declaration order, plus the
/// constructor of a data class.
pub struct StructInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    constructor: Option<DataConstructor>,
}

impl StructInfo {
    pub fn new<T: TypePath>(fields: &[FieldInfo]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            constructor: None,
        }
    }

    /// Marks the struct as a data class built by `constructor`.
    pub fn with_constructor(mut self, constructor: DataConstructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Serialized fields, in walk order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn constructor(&self) -> Option<DataConstructor> {
        self.constructor
    }

    #[inline]
    pub fn is_data(&self) -> bool {
        self.constructor.is_some()
    }
}

impl fmt::Debug for StructInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInfo")
            .field("ty", &self.ty)
            .field("fields", &self.fields)
            .field("data", &self.is_data())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// DataArgs

/// Decoded field values handed to a [`DataConstructor`], in field order.
pub struct DataArgs {
    type_path: &'static str,
    values: vec::IntoIter<Box<dyn Any>>,
}

impl DataArgs {
    pub fn new(type_path: &'static str, values: Vec<Box<dyn Any>>) -> Self {
        Self {
            type_path,
            values: values.into_iter(),
        }
    }

    /// Takes the next value.
    pub fn take<T: 'static>(&mut self) -> Result<T, SerialError> {
        let Some(value) = self.values.next() else {
            return Err(SerialError::invalid(format_args!(
                "missing constructor argument of `{}`",
                self.type_path
            )));
        };
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(SerialError::TypeMismatch {
                expected: core::any::type_name::<T>(),
                found: "constructor argument",
            }),
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::Any;

    use super::DataArgs;
    use crate::SerialError;

    #[test]
    fn data_args_in_order() {
        let values: Vec<Box<dyn Any>> = vec![Box::new(String::from("V8")), Box::new(450_i32)];
        let mut args = DataArgs::new("demo::Engine", values);
        assert_eq!(args.remaining(), 2);
        assert_eq!(args.take::<String>().unwrap(), "V8");
        assert!(matches!(
            args.take::<String>(),
            Err(SerialError::TypeMismatch { .. })
        ));
        assert!(matches!(
            args.take::<i32>(),
            Err(SerialError::InvalidData(_))
        ));
    }
}

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::info::{DataArgs, StructInfo};
use crate::strategy::{DynSerializer, DynValueSerializer, Strategy};
use crate::{Input, Object, Output, SerialError};

/// Data classes: the fields in constructor order, read back in full before
/// the constructor runs.
///
/// The value exists only once all fields are decoded, so a data class
/// cannot sit on a reference cycle.
pub struct DataSerializer {
    info: &'static StructInfo,
}

impl DataSerializer {
    #[inline]
    pub const fn new(info: &'static StructInfo) -> Self {
        Self { info }
    }

    #[inline]
    pub fn strategy(info: &'static StructInfo) -> Strategy {
        Strategy::dyn_value(Self::new(info))
    }
}

impl DynSerializer for DataSerializer {
    #[inline]
    fn target(&self) -> Option<TypeId> {
        Some(self.info.ty().id())
    }

    fn serializer_name(&self) -> &'static str {
        "DataSerializer"
    }

    fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        for field in self.info.fields() {
            field.write(value, output)?;
        }
        Ok(())
    }
}

impl DynValueSerializer for DataSerializer {
    fn deserialize(&self, input: &mut Input<'_>) -> Result<Box<dyn Object>, SerialError> {
        let Some(constructor) = self.info.constructor() else {
            return Err(SerialError::NoConstructor(self.info.ty().path()));
        };
        let mut values = Vec::with_capacity(self.info.field_len());
        for field in self.info.fields() {
            values.push(field.read_value(input)?);
        }
        constructor(DataArgs::new(self.info.ty().path(), values))
    }
}

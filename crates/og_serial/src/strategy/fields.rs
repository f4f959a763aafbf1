use core::any::TypeId;

use crate::info::StructInfo;
use crate::strategy::{DynInplaceSerializer, DynSerializer, Strategy};
use crate::{Input, Object, Output, SerialError};

/// The fallback: every non-transient field in declaration order, each
/// framed by its slot type.
pub struct FieldWalkSerializer {
    info: &'static StructInfo,
}

impl FieldWalkSerializer {
    #[inline]
    pub const fn new(info: &'static StructInfo) -> Self {
        Self { info }
    }

    #[inline]
    pub fn strategy(info: &'static StructInfo) -> Strategy {
        Strategy::dyn_inplace(Self::new(info))
    }
}

impl DynSerializer for FieldWalkSerializer {
    #[inline]
    fn target(&self) -> Option<TypeId> {
        Some(self.info.ty().id())
    }

    fn serializer_name(&self) -> &'static str {
        "FieldWalkSerializer"
    }

    fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        for field in self.info.fields() {
            field.write(value, output)?;
        }
        Ok(())
    }
}

impl DynInplaceSerializer for FieldWalkSerializer {
    fn deserialize_into(&self, target: &mut dyn Object, input: &mut Input<'_>) -> Result<(), SerialError> {
        for field in self.info.fields() {
            field.read_into(target, input)?;
        }
        Ok(())
    }
}

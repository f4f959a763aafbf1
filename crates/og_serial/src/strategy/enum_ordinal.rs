use alloc::boxed::Box;
use core::any::TypeId;

use crate::info::EnumInfo;
use crate::strategy::{DynSerializer, DynValueSerializer, Strategy};
use crate::{Input, Object, Output, SerialError};

/// Unit enums as their ordinal, a tagged int.
///
/// The ordinal is the declaration index of the variant. A stream written
/// before the variants were reordered decodes to the wrong variants.
pub struct EnumSerializer {
    info: &'static EnumInfo,
}

impl EnumSerializer {
    #[inline]
    pub const fn new(info: &'static EnumInfo) -> Self {
        Self { info }
    }

    #[inline]
    pub fn strategy(info: &'static EnumInfo) -> Strategy {
        Strategy::dyn_value(Self::new(info))
    }
}

impl DynSerializer for EnumSerializer {
    #[inline]
    fn target(&self) -> Option<TypeId> {
        Some(self.info.ty().id())
    }

    fn serializer_name(&self) -> &'static str {
        "EnumSerializer"
    }

    fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        let ordinal = self
            .info
            .ordinal(value)
            .ok_or(SerialError::TypeMismatch {
                expected: self.info.ty().path(),
                found: value.object_type_path(),
            })?;
        let ordinal = i32::try_from(ordinal)
            .map_err(|_| SerialError::invalid(format_args!("ordinal {ordinal} exceeds i32")))?;
        output.write_i32(ordinal)
    }
}

impl DynValueSerializer for EnumSerializer {
    fn deserialize(&self, input: &mut Input<'_>) -> Result<Box<dyn Object>, SerialError> {
        let ordinal = input.read_i32()?;
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| self.info.from_ordinal(index))
            .ok_or_else(|| {
                SerialError::invalid(format_args!(
                    "ordinal {ordinal} is out of range for `{}` with {} variants",
                    self.info.ty().path(),
                    self.info.variant_len(),
                ))
            })
    }
}

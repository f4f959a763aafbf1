use core::any::TypeId;

use crate::info::SequenceInfo;
use crate::strategy::{DynInplaceSerializer, DynSerializer, Strategy};
use crate::{Input, Object, Output, SerialError};

/// Arrays, lists and sets: a 4-byte count followed by the items, each
/// framed by the item slot.
pub struct SequenceSerializer {
    info: &'static SequenceInfo,
}

impl SequenceSerializer {
    #[inline]
    pub const fn new(info: &'static SequenceInfo) -> Self {
        Self { info }
    }

    #[inline]
    pub fn strategy(info: &'static SequenceInfo) -> Strategy {
        Strategy::dyn_inplace(Self::new(info))
    }
}

impl DynSerializer for SequenceSerializer {
    #[inline]
    fn target(&self) -> Option<TypeId> {
        Some(self.info.ty().id())
    }

    fn serializer_name(&self) -> &'static str {
        "SequenceSerializer"
    }

    fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        self.info.write_items(value, output)
    }
}

impl DynInplaceSerializer for SequenceSerializer {
    fn deserialize_into(&self, target: &mut dyn Object, input: &mut Input<'_>) -> Result<(), SerialError> {
        self.info.read_items(target, input)
    }
}

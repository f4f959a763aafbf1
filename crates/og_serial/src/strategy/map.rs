use core::any::TypeId;

use crate::info::MapInfo;
use crate::strategy::{DynInplaceSerializer, DynSerializer, Strategy};
use crate::{Input, Object, Output, SerialError};

/// Maps: a 4-byte count followed by key/value pairs.
///
/// Entries are read back into an empty map of the same type. Order follows
/// the map's own iteration order.
pub struct MapSerializer {
    info: &'static MapInfo,
}

impl MapSerializer {
    #[inline]
    pub const fn new(info: &'static MapInfo) -> Self {
        Self { info }
    }

    #[inline]
    pub fn strategy(info: &'static MapInfo) -> Strategy {
        Strategy::dyn_inplace(Self::new(info))
    }
}

impl DynSerializer for MapSerializer {
    #[inline]
    fn target(&self) -> Option<TypeId> {
        Some(self.info.ty().id())
    }

    fn serializer_name(&self) -> &'static str {
        "MapSerializer"
    }

    fn serialize(&self, value: &dyn Object, output: &mut Output<'_>) -> Result<(), SerialError> {
        self.info.write_entries(value, output)
    }
}

impl DynInplaceSerializer for MapSerializer {
    fn deserialize_into(&self, target: &mut dyn Object, input: &mut Input<'_>) -> Result<(), SerialError> {
        self.info.read_entries(target, input)
    }
}

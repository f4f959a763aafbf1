use alloc::boxed::Box;
use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use og_utils::hash::fixed_hash;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::object::impl_object_cast_fn;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::{Input, Object, Output, Serial, SerialError};

impl TypePath for SystemTime {
    #[inline]
    fn type_path() -> &'static str {
        "std::time::SystemTime"
    }

    #[inline]
    fn type_name() -> &'static str {
        "SystemTime"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "SystemTime"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("std::time")
    }
}

impl Typed for SystemTime {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<SystemTime>()))
    }
}

/// Allocated as the Unix epoch before the adapter fills it.
impl GetTypeMeta for SystemTime {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(TypeTraitDefault::new(|| Box::new(UNIX_EPOCH)));
        meta
    }
}

impl Object for SystemTime {
    impl_object_cast_fn!();

    fn object_eq(&self, other: &dyn Object) -> Option<bool> {
        Some(other.downcast_ref::<Self>() == Some(self))
    }

    fn object_hash(&self) -> Option<u64> {
        Some(fixed_hash(self))
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Serial for SystemTime {
    fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.context().ensure_registered::<Self>();
        output.write_untyped(self)
    }

    #[inline]
    fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError> {
        input.read_untyped::<Self>()
    }

    #[inline]
    fn register_slot(registry: &mut TypeRegistry) {
        registry.register::<Self>();
    }
}

use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::Hash;
use std::collections::HashSet;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{SequenceInfo, TypeInfo, TypePath, Typed};
use crate::object::impl_object_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::strategy::PREALLOC_LIMIT;
use crate::{Input, Object, Output, Serial, SerialError};

macro_rules! impl_sequence {
    (
        $ty:ident, $path:literal, $module:literal, $variant:ident, $insert:ident
        $(, bounds: $($bound:path),+)?
        $(, array: $array:ident)?
    ) => {
        impl<T: TypePath $($(+ $bound)+)?> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$path, "<", T::type_path(), ">"]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[stringify!($ty), "<", T::type_name(), ">"]))
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        const _: () = {
            fn write_items<T: Serial $($(+ $bound)+)?>(
                value: &dyn Object,
                output: &mut Output<'_>,
            ) -> Result<(), SerialError> {
                let items = value.try_downcast_ref::<$ty<T>>()?;
                output.write_len(items.len())?;
                items.iter().try_for_each(|item| item.write_slot(output))
            }

            fn read_items<T: Serial $($(+ $bound)+)?>(
                target: &mut dyn Object,
                input: &mut Input<'_>,
            ) -> Result<(), SerialError> {
                let items = target.try_downcast_mut::<$ty<T>>()?;
                let len = input.read_len()?;
                items.clear();
                impl_sequence!(@reserve $variant, items, len);
                for _ in 0..len {
                    items.$insert(T::read_slot(input)?);
                }
                Ok(())
            }

            impl<T: Serial $($(+ $bound)+)?> Typed for $ty<T> {
                fn type_info() -> &'static TypeInfo {
                    static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                    CELL.get_or_insert::<Self>(|| {
                        let info = SequenceInfo::new::<Self, T>(write_items::<T>, read_items::<T>);
                        $(let info = info.with_primitive_array(T::$array);)?
                        TypeInfo::$variant(info)
                    })
                }
            }
        };

        impl<T: Serial $($(+ $bound)+)?> GetTypeMeta for $ty<T> {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
                meta
            }

            #[inline]
            fn register_dependencies(registry: &mut TypeRegistry) {
                T::register_slot(registry);
            }
        }

        impl<T: Serial $($(+ $bound)+)?> Object for $ty<T> {
            impl_object_cast_fn!();
        }

        impl<T: Serial $($(+ $bound)+)?> Serial for $ty<T> {
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
    };
    (@reserve Set, $items:ident, $len:ident) => {};
    (@reserve $variant:ident, $items:ident, $len:ident) => {
        $items.reserve($len.min(PREALLOC_LIMIT));
    };
}

impl_sequence!(Vec, "alloc::vec::Vec", "alloc::vec", Array, push, array: ARRAY_STRATEGY);
impl_sequence!(VecDeque, "alloc::collections::VecDeque", "alloc::collections", List, push_back);
impl_sequence!(BTreeSet, "alloc::collections::BTreeSet", "alloc::collections", Set, insert, bounds: Ord);
impl_sequence!(HashSet, "std::collections::HashSet", "std::collections", Set, insert, bounds: Eq, Hash);

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use std::collections::HashSet;

    use crate::info::{TypePath, Typed};
    use crate::registry::{GetTypeMeta, TypeRegistry};

    #[test]
    fn paths() {
        assert_eq!(Vec::<i32>::type_path(), "alloc::vec::Vec<i32>");
        assert_eq!(VecDeque::<String>::type_name(), "VecDeque<String>");
        assert_eq!(HashSet::<i64>::type_ident(), "HashSet");
    }

    #[test]
    fn info_kinds() {
        let ints = Vec::<i32>::type_info().as_array().unwrap();
        assert!(ints.primitive_array().is_some());
        assert_eq!(ints.item_ty().path(), "i32");

        let strings = Vec::<String>::type_info().as_array().unwrap();
        assert!(strings.primitive_array().is_none());

        assert!(VecDeque::<i8>::type_info().as_list().is_some());
        assert!(HashSet::<char>::type_info().as_set().is_some());
    }

    #[test]
    fn dependencies_are_registered() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Vec<i16>>>();
        assert!(registry.contains(TypeId::of::<Vec<i16>>()));
        assert!(registry.contains(TypeId::of::<i16>()));
        assert!(Vec::<i16>::get_type_meta().type_info().as_array().is_some());
    }
}

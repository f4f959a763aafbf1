use alloc::collections::BTreeMap;
use core::hash::Hash;
use std::collections::HashMap;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::object::impl_object_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::{Input, Object, Output, Serial, SerialError};

macro_rules! impl_map {
    ($ty:ident, $path:literal, $module:literal, bounds: $($bound:path),+) => {
        impl<K: TypePath, V: TypePath> TypePath for $ty<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$path, "<", K::type_path(), ", ", V::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($ty), "<", K::type_name(), ", ", V::type_name(), ">"])
                })
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
            // Entries are written as alternating key and value slots.
            fn write_entries<K: Serial $(+ $bound)+, V: Serial>(
                value: &dyn Object,
                output: &mut Output<'_>,
            ) -> Result<(), SerialError> {
                let map = value.try_downcast_ref::<$ty<K, V>>()?;
                output.write_len(map.len())?;
                for (key, value) in map {
                    key.write_slot(output)?;
                    value.write_slot(output)?;
                }
                Ok(())
            }

            fn read_entries<K: Serial $(+ $bound)+, V: Serial>(
                target: &mut dyn Object,
                input: &mut Input<'_>,
            ) -> Result<(), SerialError> {
                let map = target.try_downcast_mut::<$ty<K, V>>()?;
                let len = input.read_len()?;
                map.clear();
                for _ in 0..len {
                    let key = K::read_slot(input)?;
                    let value = V::read_slot(input)?;
                    map.insert(key, value);
                }
                Ok(())
            }

            impl<K: Serial $(+ $bound)+, V: Serial> Typed for $ty<K, V> {
                fn type_info() -> &'static TypeInfo {
                    static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                    CELL.get_or_insert::<Self>(|| {
                        TypeInfo::Map(MapInfo::new::<Self, K, V>(
                            write_entries::<K, V>,
                            read_entries::<K, V>,
                        ))
                    })
                }
            }
        };

        impl<K: Serial $(+ $bound)+, V: Serial> GetTypeMeta for $ty<K, V> {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                K::register_slot(registry);
                V::register_slot(registry);
            }
        }

        impl<K: Serial $(+ $bound)+, V: Serial> Object for $ty<K, V> {
            impl_object_cast_fn!();
        }

        impl<K: Serial $(+ $bound)+, V: Serial> Serial for $ty<K, V> {
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
}

impl_map!(BTreeMap, "alloc::collections::BTreeMap", "alloc::collections", bounds: Ord);
impl_map!(HashMap, "std::collections::HashMap", "std::collections", bounds: Eq, Hash);

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use std::collections::HashMap;

    use crate::info::{TypePath, Typed};

    #[test]
    fn paths() {
        assert_eq!(
            BTreeMap::<String, i32>::type_path(),
            "alloc::collections::BTreeMap<alloc::string::String, i32>"
        );
        assert_eq!(HashMap::<i64, Vec<f32>>::type_name(), "HashMap<i64, Vec<f32>>");
    }

    #[test]
    fn info() {
        let info = BTreeMap::<char, String>::type_info().as_map().unwrap();
        assert_eq!(info.key_ty().path(), "char");
        assert_eq!(info.value_ty().name(), "String");
    }
}

use alloc::string::String;
use core::fmt;

use og_utils::hash::fixed_hash;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{PrimitiveInfo, TypeInfo, TypePath, Typed};
use crate::object::impl_object_cast_fn;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::strategy::{PrimitiveArraySerializer, Strategy};
use crate::{Input, Object, Output, Serial, SerialError};

macro_rules! impl_type_path {
    ($ty:ty, $name:literal $(, $module:literal)?) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                concat!($($module, "::",)? $name)
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }

            $(
                #[inline]
                fn module_path() -> Option<&'static str> {
                    Some($module)
                }
            )?
        }
    };
}

/// `Serial` for a primitive: the tagged value, no framing.
macro_rules! impl_primitive_serial {
    ($ty:ty, array: $array:expr, register: $register:expr) => {
        impl Serial for $ty {
            const ARRAY_STRATEGY: Option<fn() -> Strategy> = $array;

            #[inline]
            fn write_slot(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
                output.write_primitive(self)
            }

            #[inline]
            fn read_slot(input: &mut Input<'_>) -> Result<Self, SerialError> {
                input.read_primitive()
            }

            fn register_slot(registry: &mut TypeRegistry) {
                let register: fn(&mut TypeRegistry) = $register;
                register(registry);
            }
        }
    };
}

/// Equality and hashing of a primitive, by value or by bit pattern.
macro_rules! object_key {
    (value, $v:expr) => {
        $v
    };
    (bits, $v:expr) => {
        $v.to_bits()
    };
}

/// The object primitives.
macro_rules! impl_object_primitive {
    ($ty:ty, $name:literal $(, $module:literal)?; key = $key:ident; array: $array:expr) => {
        impl_type_path!($ty, $name $(, $module)?);

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Primitive(PrimitiveInfo::new::<$ty>()))
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
                meta
            }
        }

        impl Object for $ty {
            impl_object_cast_fn!();

            fn object_eq(&self, other: &dyn Object) -> Option<bool> {
                let other = other.downcast_ref::<$ty>();
                Some(other.is_some_and(|other| object_key!($key, self) == object_key!($key, other)))
            }

            fn object_hash(&self) -> Option<u64> {
                Some(fixed_hash(&object_key!($key, self)))
            }

            fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }

        impl_primitive_serial!($ty, array: $array, register: |registry| registry.register::<$ty>());
    };
}

impl_object_primitive!(i8, "i8"; key = value; array: Some(PrimitiveArraySerializer::<i8>::strategy));
impl_object_primitive!(bool, "bool"; key = value; array: Some(PrimitiveArraySerializer::<bool>::strategy));
impl_object_primitive!(char, "char"; key = value; array: Some(PrimitiveArraySerializer::<char>::strategy));
impl_object_primitive!(i16, "i16"; key = value; array: Some(PrimitiveArraySerializer::<i16>::strategy));
impl_object_primitive!(i32, "i32"; key = value; array: Some(PrimitiveArraySerializer::<i32>::strategy));
impl_object_primitive!(i64, "i64"; key = value; array: Some(PrimitiveArraySerializer::<i64>::strategy));
impl_object_primitive!(f32, "f32"; key = bits; array: Some(PrimitiveArraySerializer::<f32>::strategy));
impl_object_primitive!(f64, "f64"; key = bits; array: Some(PrimitiveArraySerializer::<f64>::strategy));
impl_object_primitive!(String, "String", "alloc::string"; key = value; array: None);

// Unsigned integers are slot types only. Read back through `dyn Object`
// they become the signed type of the same width.
macro_rules! impl_unsigned {
    ($($ty:ty => $name:literal),*) => {$(
        impl_type_path!($ty, $name);
        impl_primitive_serial!($ty, array: Some(PrimitiveArraySerializer::<$ty>::strategy), register: |_| {});
    )*};
}

impl_unsigned!(u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64");

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Object;
    use crate::info::{TypePath, Typed};

    #[test]
    fn paths() {
        assert_eq!(i32::type_path(), "i32");
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_name(), "String");
        assert_eq!(String::module_path(), Some("alloc::string"));
        assert_eq!(u16::type_path(), "u16");
        assert!(f64::type_info().as_primitive().is_some());
    }

    #[test]
    fn float_equality_is_bitwise() {
        let nan = f64::NAN;
        assert_eq!(nan.object_eq(&f64::NAN), Some(true));
        assert_eq!(0.0_f64.object_eq(&-0.0_f64), Some(false));
        assert_eq!(1_i32.object_eq(&1_i64), Some(false));
        assert_eq!(nan.object_hash(), f64::NAN.object_hash());
    }
}

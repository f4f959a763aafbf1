use core::any::TypeId;
use core::fmt;

use crate::info::{EnumInfo, MapInfo, SequenceInfo, StructInfo, Type, TypePath};
use crate::wire::{Primitive, PrimitiveKind};

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a type, as seen by the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Struct,
    Enum,
    Array,
    List,
    Set,
    Map,
    Opaque,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => f.pad("Primitive"),
            Self::Struct => f.pad("Struct"),
            Self::Enum => f.pad("Enum"),
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
            Self::Set => f.pad("Set"),
            Self::Map => f.pad("Map"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a type.
///
/// Struct and enum infos carry the generated accessors the built-in
/// strategies walk; sequence and map infos carry the item codecs.
#[derive(Debug)]
pub enum TypeInfo {
    /// A type with its own tag sentinel.
    Primitive(PrimitiveInfo),
    /// Named, tuple or unit structs.
    Struct(StructInfo),
    /// Unit-only enums, encoded by ordinal.
    Enum(EnumInfo),
    /// `Vec<T>`.
    Array(SequenceInfo),
    /// `VecDeque<T>`.
    List(SequenceInfo),
    /// `BTreeSet<T>`, `HashSet<T>`.
    Set(SequenceInfo),
    /// `BTreeMap<K, V>`, `HashMap<K, V>`.
    Map(MapInfo),
    /// Anything else. Needs a declared or module strategy.
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_primitive: Primitive => PrimitiveInfo);
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_array: Array => SequenceInfo);
    impl_cast_method!(as_list: List => SequenceInfo);
    impl_cast_method!(as_set: Set => SequenceInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Primitive(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Array(info) | Self::List(info) | Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Primitive(_) => TypeKind::Primitive,
            Self::Struct(_) => TypeKind::Struct,
            Self::Enum(_) => TypeKind::Enum,
            Self::Array(_) => TypeKind::Array,
            Self::List(_) => TypeKind::List,
            Self::Set(_) => TypeKind::Set,
            Self::Map(_) => TypeKind::Map,
            Self::Opaque(_) => TypeKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// PrimitiveInfo

/// Info of a type written inline after its sentinel.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    ty: Type,
    kind: PrimitiveKind,
}

impl PrimitiveInfo {
    #[inline]
    pub const fn new<T: Primitive + TypePath>() -> Self {
        Self {
            ty: Type::of::<T>(),
            kind: T::KIND,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

#[derive(Debug, Clone, Copy)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}

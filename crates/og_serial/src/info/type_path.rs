use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// The type path is the class identity written to the stream, so it has to
/// be stable across builds. [`core::any::type_name`] is not.
///
/// - [`type_path`]: the unique identifier of the type.
/// - [`type_name`]: the type name without module path, may be duplicated.
/// - [`type_ident`]: the shortest name, without module path and generics.
/// - [`module_path`]: optional module path.
///
/// These names never start with `::`.
///
/// `#[derive(Serial)]` implements this trait with `module_path!()` and the
/// type ident, or with the path given by `#[serial(type_path = "...")]`.
///
/// ```
/// use og_serial::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn type_ident() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`type_ident`]: TypePath::type_ident
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path with generics of the target type.
    ///
    /// For `Option<Vec<i32>>`, this is `"core::option::Option<alloc::vec::Vec<i32>>"`.
    fn type_path() -> &'static str;

    /// Returns a short path to the type. Duplicates are allowed.
    ///
    /// For `Option<Vec<i32>>`, this is `"Option<Vec<i32>>"`.
    fn type_name() -> &'static str;

    /// Returns the short name of the type, without generics.
    fn type_ident() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// Primitive types return `None`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Dynamic dispatch for types that implement [`TypePath`].
///
/// ```
/// use og_serial::{Object, info::DynamicTypePath};
///
/// let x: Box<dyn Object> = Box::new(String::new());
/// assert_eq!((*x).object_type_path(), "alloc::string::String");
/// ```
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn object_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn object_type_name(&self) -> &'static str;

    /// See [`TypePath::type_ident`].
    fn object_type_ident(&self) -> &'static str;

    /// See [`TypePath::module_path`].
    fn object_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn object_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn object_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn object_type_ident(&self) -> &'static str {
        Self::type_ident()
    }

    #[inline]
    fn object_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Function pointers to a type's [`TypePath`] implementation.
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline(always)]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }
}

impl fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePathTable")
            .field("type_path", &self.path())
            .field("type_name", &self.name())
            .field("module_path", &self.module_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] together with its [`TypePathTable`].
///
/// ```
/// use core::any::TypeId;
/// use og_serial::info::Type;
///
/// let ty = Type::of::<String>();
/// assert!(ty.is::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    type_path_table: TypePathTable,
    type_id: TypeId,
}

impl Type {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path_table: TypePathTable::of::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn type_path_table(&self) -> &TypePathTable {
        &self.type_path_table
    }

    #[inline]
    pub fn path(&self) -> &'static str {
        self.type_path_table.path()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.type_path_table.name()
    }

    #[inline]
    pub fn ident(&self) -> &'static str {
        self.type_path_table.ident()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.type_path_table.module_path()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

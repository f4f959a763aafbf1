use alloc::string::String;
use core::any::TypeId;
use core::fmt;
use std::time::SystemTime;

use og_utils::TypeIdMap;
use og_utils::hash::{HashMap, HashSet};

use crate::registry::{GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The store of registered types.
///
/// A value can only be written through `dyn Object`, and a class name can
/// only be resolved while reading, if its type is registered. Registering a
/// type also registers the types of its fields.
///
/// ```
/// use core::any::TypeId;
/// use og_serial::derive::Serial;
/// use og_serial::registry::{TypeRegistry, TypeTraitDefault};
///
/// #[derive(Serial, Default)]
/// #[serial(default)]
/// struct Foo {
///     name: Option<String>,
///     value: i32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Foo>();
///
/// assert!(registry.contains(TypeId::of::<Foo>()));
/// assert!(registry.contains(TypeId::of::<i32>()));
/// assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Foo>()).is_some());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Creates a registry with the object primitives, `String` and `SystemTime`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<i8>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<SystemTime>();
        registry
    }

    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Inserts the meta unless the type is already registered.
    ///
    /// Returns `false` if it was. Dependencies are not registered.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.type_meta_table.try_insert(type_meta.type_id(), || {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            type_meta
        })
    }

    /// Registers `T` and, the first time, its dependencies.
    ///
    /// The type is inserted before its dependencies, so recursive types
    /// terminate.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.try_insert_type_meta(T::get_type_meta()) {
            T::register_dependencies(self);
        }
    }

    /// Registers every type submitted with `#[serial(auto_register)]`.
    ///
    /// Returns `false` when the `auto_register` feature is off.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(self);
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Looks a type up by its full path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        let id = self.type_path_to_id.get(type_path)?;
        self.get(*id)
    }

    /// Looks a type up by its short name, `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        let id = self.type_name_to_id.get(type_name)?;
        self.get(*id)
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        self.get(type_id)?.get_trait::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.type_path_to_id.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::registry::TypeTraitDefault;

    #[test]
    fn primitives_are_preregistered() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<i32>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(
            registry
                .get_type_trait::<TypeTraitDefault>(TypeId::of::<i64>())
                .is_some()
        );
        assert!(TypeRegistry::empty().get_with_type_name("i32").is_none());
    }

    #[test]
    fn dependencies_are_registered() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Vec<i32>>>();
        assert!(registry.contains(TypeId::of::<Vec<i32>>()));
        assert!(registry.contains(TypeId::of::<i32>()));
        assert_eq!(registry.len(), 3);
    }
}

use core::any::TypeId;

use crate::registry::TypeRegistry;

/// Turns a class name read from the stream back into a registered type.
pub trait ClassResolver: Send + Sync + 'static {
    fn resolve(&self, name: &str, registry: &TypeRegistry) -> Option<TypeId>;
}

/// Looks the name up as a full type path, then as an unambiguous short
/// type name.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryResolver;

impl ClassResolver for RegistryResolver {
    fn resolve(&self, name: &str, registry: &TypeRegistry) -> Option<TypeId> {
        registry
            .get_with_type_path(name)
            .or_else(|| registry.get_with_type_name(name))
            .map(|meta| meta.type_id())
    }
}

impl<F> ClassResolver for F
where
    F: Fn(&str, &TypeRegistry) -> Option<TypeId> + Send + Sync + 'static,
{
    #[inline]
    fn resolve(&self, name: &str, registry: &TypeRegistry) -> Option<TypeId> {
        self(name, registry)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use super::{ClassResolver, RegistryResolver};
    use crate::registry::TypeRegistry;

    #[test]
    fn path_then_name() {
        let registry = TypeRegistry::new();
        assert_eq!(
            RegistryResolver.resolve("alloc::string::String", &registry),
            Some(TypeId::of::<String>())
        );
        assert_eq!(
            RegistryResolver.resolve("String", &registry),
            Some(TypeId::of::<String>())
        );
        assert_eq!(RegistryResolver.resolve("demo::Missing", &registry), None);
    }

    #[test]
    fn closures_resolve() {
        let registry = TypeRegistry::new();
        let alias = |name: &str, registry: &TypeRegistry| match name {
            "str" => Some(TypeId::of::<String>()),
            other => RegistryResolver.resolve(other, registry),
        };
        assert_eq!(
            alias.resolve("str", &registry),
            Some(TypeId::of::<String>())
        );
        assert_eq!(alias.resolve("i32", &registry), Some(TypeId::of::<i32>()));
    }
}

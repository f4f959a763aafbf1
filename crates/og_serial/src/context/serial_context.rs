use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use og_utils::TypeIdMap;

use crate::context::{Bundle, ClassResolver, Constructor, DefaultModule, ExplicitModule, InstancePlan};
use crate::context::{RegistryResolver, SerialConfig, SerialModule, SharingMode};
use crate::info::TypeInfo;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitAdapter, TypeTraitBlank};
use crate::registry::{TypeTraitCompanion, TypeTraitDefault, TypeTraitSelfSerial, TypeTraitWith};
use crate::strategy::{DataSerializer, EnumSerializer, FieldWalkSerializer, SequenceSerializer, Strategy};
use crate::{Object, SerialError};

// -----------------------------------------------------------------------------
// SerialContext

/// Registered types, installed modules and the resolved strategies and
/// instance plans.
///
/// A context is `Send + Sync` and can serve any number of streams at once.
/// Both caches only grow. Two threads resolving the same type may both run
/// the resolution chain; the first result stored is the one kept.
///
/// ```
/// use og_serial::{SerialContext, SharingMode};
///
/// let context = SerialContext::builder()
///     .sharing(SharingMode::IdentityShared)
///     .share_class_names(true)
///     .build();
///
/// assert!(context.config().share_class_names);
/// ```
pub struct SerialContext {
    registry: RwLock<TypeRegistry>,
    modules: Vec<Box<dyn SerialModule>>,
    constructors: TypeIdMap<Constructor>,
    strategies: RwLock<TypeIdMap<Strategy>>,
    plans: RwLock<TypeIdMap<InstancePlan>>,
    config: SerialConfig,
    resolver: Box<dyn ClassResolver>,
}

impl Default for SerialContext {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerialContext {
    /// A context with the default configuration and modules.
    ///
    /// With the `auto_register` feature, every type marked
    /// `#[serial(auto_register)]` is registered.
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[inline]
    pub fn builder() -> SerialContextBuilder {
        SerialContextBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Read access to the registry.
    ///
    /// Do not hold the guard across calls that register types.
    pub fn registry(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T` and the types of its fields.
    pub fn register<T: GetTypeMeta>(&self) {
        self.registry_mut().register::<T>();
    }

    /// Registers `T` unless it already is.
    ///
    /// Called by the slot implementations, so types reached through a
    /// statically known slot need no explicit registration.
    pub fn ensure_registered<T: GetTypeMeta>(&self) {
        if !self.registry().contains(TypeId::of::<T>()) {
            self.register::<T>();
        }
    }

    // -------------------------------------------------------------------------
    // Strategy resolution

    /// The strategy of the type of `value`.
    #[inline]
    pub fn strategy_for(&self, value: &dyn Object) -> Result<Strategy, SerialError> {
        self.resolve_id((value as &dyn Any).type_id(), value.object_type_path())
    }

    /// The strategy of the type `type_id`, resolved once and cached.
    ///
    /// `type_path` is only used in the error of an unregistered type.
    pub fn resolve_id(&self, type_id: TypeId, type_path: &str) -> Result<Strategy, SerialError> {
        let cached = self
            .strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(strategy) = cached {
            return Ok(strategy);
        }

        let strategy = {
            let registry = self.registry();
            let meta = registry
                .get(type_id)
                .ok_or_else(|| SerialError::Unregistered(type_path.to_string()))?;
            let strategy = self.resolve(meta)?;
            log::debug!("resolved `{}` to {strategy:?}", meta.type_path());
            strategy
        };

        Ok(self
            .strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || strategy)
            .clone())
    }

    /// The resolution chain. The first rule that applies wins.
    fn resolve(&self, meta: &TypeMeta) -> Result<Strategy, SerialError> {
        let ty = meta.ty();

        for module in &self.modules {
            if let Some(strategy) = module.strategy_for(meta) {
                return strategy.check(ty);
            }
        }

        if let Some(declared) = meta.get_trait::<TypeTraitSelfSerial>() {
            return Ok(declared.strategy());
        }

        match meta.type_info() {
            TypeInfo::Enum(info) => return Ok(EnumSerializer::strategy(info)),
            TypeInfo::Array(info) => {
                return Ok(match info.primitive_array() {
                    Some(strategy) => strategy(),
                    None => SequenceSerializer::strategy(info),
                });
            }
            _ => {}
        }

        if let Some(declared) = meta.get_trait::<TypeTraitWith>() {
            return declared.strategy().check(ty);
        }
        if let Some(declared) = meta.get_trait::<TypeTraitAdapter>() {
            return declared.strategy().check(ty);
        }
        if let Some(declared) = meta.get_trait::<TypeTraitCompanion>() {
            return declared.strategy().check(ty);
        }

        match meta.type_info() {
            TypeInfo::Struct(info) if info.is_data() => Ok(DataSerializer::strategy(info)),
            TypeInfo::Struct(info) => Ok(FieldWalkSerializer::strategy(info)),
            _ => Err(SerialError::NoStrategy(meta.type_path())),
        }
    }

    // -------------------------------------------------------------------------
    // Instantiation

    /// A fresh value of the type `type_id`, for an in-place strategy to fill.
    pub fn instantiate(
        &self,
        type_id: TypeId,
        type_path: &str,
        bundle: &Bundle,
    ) -> Result<Box<dyn Object>, SerialError> {
        Ok(self.instance_plan(type_id, type_path)?.instantiate(bundle))
    }

    /// The instance plan of the type `type_id`, chosen once and cached.
    pub fn instance_plan(&self, type_id: TypeId, type_path: &str) -> Result<InstancePlan, SerialError> {
        let cached = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(plan) = cached {
            return Ok(plan);
        }

        let plan = self.plan(type_id, type_path)?;
        Ok(self
            .plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || plan)
            .clone())
    }

    fn plan(&self, type_id: TypeId, type_path: &str) -> Result<InstancePlan, SerialError> {
        if let Some(constructor) = self.constructors.get(&type_id) {
            return Ok(InstancePlan::Custom(constructor.clone()));
        }

        let registry = self.registry();
        let meta = registry
            .get(type_id)
            .ok_or_else(|| SerialError::Unregistered(type_path.to_string()))?;

        if let Some(default) = meta.get_trait::<TypeTraitDefault>() {
            return Ok(InstancePlan::Default(default.func()));
        }
        if self.config.allow_raw
            && let Some(blank) = meta.get_trait::<TypeTraitBlank>()
        {
            log::warn!(
                "`{}` has no constructor, falling back to a blank value",
                meta.type_path()
            );
            return Ok(InstancePlan::Blank(blank.func()));
        }
        Err(SerialError::NoConstructor(meta.type_path()))
    }

    // -------------------------------------------------------------------------
    // Class names

    /// The type and type path of a class name read from the stream.
    pub fn resolve_class(&self, name: &str) -> Result<(TypeId, &'static str), SerialError> {
        let registry = self.registry();
        self.resolver
            .resolve(name, &registry)
            .and_then(|type_id| registry.get(type_id))
            .map(|meta| (meta.type_id(), meta.type_path()))
            .ok_or_else(|| SerialError::ClassNotFound(name.to_string()))
    }
}

impl fmt::Debug for SerialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialContext")
            .field("config", &self.config)
            .field("modules", &self.modules)
            .field("registered", &self.registry().len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// SerialContextBuilder

/// Builds a [`SerialContext`].
///
/// Strategies registered with [`strategy`](Self::strategy) are asked first,
/// then the modules in the order they were added, then the default module.
pub struct SerialContextBuilder {
    config: SerialConfig,
    explicit: ExplicitModule,
    modules: Vec<Box<dyn SerialModule>>,
    default_module: bool,
    constructors: TypeIdMap<Constructor>,
    registry: TypeRegistry,
    resolver: Box<dyn ClassResolver>,
    auto_register: bool,
}

impl Default for SerialContextBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerialContextBuilder {
    pub fn new() -> Self {
        Self {
            config: SerialConfig::default(),
            explicit: ExplicitModule::new(),
            modules: Vec::new(),
            default_module: true,
            constructors: TypeIdMap::new(),
            registry: TypeRegistry::new(),
            resolver: Box::new(RegistryResolver),
            auto_register: true,
        }
    }

    /// Replaces the whole configuration.
    #[inline]
    pub fn config(mut self, config: SerialConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn sharing(mut self, sharing: SharingMode) -> Self {
        self.config.sharing = sharing;
        self
    }

    #[inline]
    pub fn share_class_names(mut self, enabled: bool) -> Self {
        self.config.share_class_names = enabled;
        self
    }

    #[inline]
    pub fn allow_raw(mut self, enabled: bool) -> Self {
        self.config.allow_raw = enabled;
        self
    }

    /// Installs a module after the ones already added.
    pub fn module(mut self, module: impl SerialModule) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Uses `strategy` for `T`, ahead of every module and declaration.
    ///
    /// The strategy is checked against `T` when `T` is first resolved.
    pub fn strategy<T: GetTypeMeta>(mut self, strategy: Strategy) -> Self {
        self.registry.register::<T>();
        self.explicit.insert(TypeId::of::<T>(), strategy);
        self
    }

    /// Uses `constructor` to allocate `T` before an in-place read.
    ///
    /// The constructor sees the [`Bundle`] of the reading stream.
    pub fn constructor<T: GetTypeMeta + Object>(
        mut self,
        constructor: impl Fn(&Bundle) -> T + Send + Sync + 'static,
    ) -> Self {
        self.registry.register::<T>();
        let boxed: Constructor =
            Arc::new(move |bundle: &Bundle| -> Box<dyn Object> { Box::new(constructor(bundle)) });
        self.constructors.insert(TypeId::of::<T>(), boxed);
        self
    }

    pub fn register<T: GetTypeMeta>(mut self) -> Self {
        self.registry.register::<T>();
        self
    }

    pub fn resolver(mut self, resolver: impl ClassResolver) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Leaves out [`DefaultModule`].
    pub fn without_default_module(mut self) -> Self {
        self.default_module = false;
        self
    }

    /// Whether [`build`](Self::build) runs [`TypeRegistry::auto_register`].
    /// On by default.
    pub fn auto_register(mut self, enabled: bool) -> Self {
        self.auto_register = enabled;
        self
    }

    pub fn build(self) -> SerialContext {
        let Self {
            config,
            explicit,
            modules: added,
            default_module,
            constructors,
            mut registry,
            resolver,
            auto_register,
        } = self;

        if auto_register {
            registry.auto_register();
        }

        let mut modules: Vec<Box<dyn SerialModule>> = Vec::with_capacity(added.len() + 2);
        if !explicit.is_empty() {
            modules.push(Box::new(explicit));
        }
        modules.extend(added);
        if default_module {
            modules.push(Box::new(DefaultModule));
        }

        SerialContext {
            registry: RwLock::new(registry),
            modules,
            constructors,
            strategies: RwLock::new(TypeIdMap::new()),
            plans: RwLock::new(TypeIdMap::new()),
            config,
            resolver,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::SerialContext;
    use crate::context::{Bundle, InstancePlan};
    use crate::strategy::{PrimitiveArraySerializer, Strategy};
    use crate::SerialError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn context_is_send_sync() {
        assert_send_sync::<SerialContext>();
        assert_send_sync::<Strategy>();
    }

    #[test]
    fn resolution_is_cached() {
        let context = SerialContext::new();
        context.register::<Vec<i32>>();
        let first = context.resolve_id(TypeId::of::<Vec<i32>>(), "").unwrap();
        let second = context.resolve_id(TypeId::of::<Vec<i32>>(), "").unwrap();
        assert_eq!(first.name(), second.name());
        match (first, second) {
            (Strategy::Inplace(a), Strategy::Inplace(b)) => assert!(Arc::ptr_eq(&a, &b)),
            _ => panic!("expected in-place strategies"),
        }
    }

    #[test]
    fn primitive_arrays_use_the_dedicated_codec() {
        let context = SerialContext::new();
        context.register::<Vec<i64>>();
        context.register::<Vec<String>>();
        let ints = context.resolve_id(TypeId::of::<Vec<i64>>(), "").unwrap();
        let strings = context.resolve_id(TypeId::of::<Vec<String>>(), "").unwrap();
        assert_eq!(ints.name(), PrimitiveArraySerializer::<i64>::strategy().name());
        assert_eq!(strings.name(), "SequenceSerializer");
    }

    #[test]
    fn unregistered_types_fail() {
        let context = SerialContext::new();
        assert!(matches!(
            context.resolve_id(TypeId::of::<VecDeque<u8>>(), "VecDeque<u8>"),
            Err(SerialError::Unregistered(path)) if path == "VecDeque<u8>"
        ));
    }

    #[test]
    fn builtin_plans_use_default() {
        let context = SerialContext::new();
        let plan = context
            .instance_plan(TypeId::of::<String>(), "alloc::string::String")
            .unwrap();
        assert!(matches!(plan, InstancePlan::Default(_)));
    }

    #[test]
    fn custom_constructor_wins() {
        let context = SerialContext::builder()
            .constructor::<String>(|bundle: &Bundle| {
                let seed = bundle.get::<&'static str>().copied().unwrap_or("seed");
                String::from(seed)
            })
            .build();
        let plain = context
            .instantiate(TypeId::of::<String>(), "alloc::string::String", &Bundle::new())
            .unwrap();
        assert_eq!(plain.take::<String>().unwrap(), "seed");

        let mut bundle = Bundle::new();
        bundle.insert("seeded");
        let seeded = context
            .instantiate(TypeId::of::<String>(), "alloc::string::String", &bundle)
            .unwrap();
        assert_eq!(seeded.take::<String>().unwrap(), "seeded");
    }
}

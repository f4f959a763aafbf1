use core::any::TypeId;
use core::fmt;
use std::time::SystemTime;

use og_utils::TypeIdMap;

use crate::info::TypeInfo;
use crate::registry::TypeMeta;
use crate::strategy::{AdapterSerializer, MapSerializer, SequenceSerializer, Strategy, SystemTimeAdapter};

// -----------------------------------------------------------------------------
// SerialModule

/// A source of strategies, asked before any declaration on the type.
///
/// Modules are asked in installation order and the first answer wins.
pub trait SerialModule: Send + Sync + 'static {
    fn strategy_for(&self, meta: &TypeMeta) -> Option<Strategy>;

    fn module_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn SerialModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_name())
    }
}

// -----------------------------------------------------------------------------
// ExplicitModule

/// Strategies registered per type.
///
/// The builder collects [`SerialContextBuilder::strategy`] calls into one of
/// these and installs it ahead of every other module.
///
/// [`SerialContextBuilder::strategy`]: crate::context::SerialContextBuilder::strategy
#[derive(Default, Clone)]
pub struct ExplicitModule {
    strategies: TypeIdMap<Strategy>,
}

impl ExplicitModule {
    #[inline]
    pub const fn new() -> Self {
        Self {
            strategies: TypeIdMap::new(),
        }
    }

    /// Uses `strategy` for the type `type_id`, replacing an earlier entry.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, strategy: Strategy) {
        self.strategies.insert(type_id, strategy);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl SerialModule for ExplicitModule {
    #[inline]
    fn strategy_for(&self, meta: &TypeMeta) -> Option<Strategy> {
        self.strategies.get(&meta.type_id()).cloned()
    }

    fn module_name(&self) -> &'static str {
        "ExplicitModule"
    }
}

// -----------------------------------------------------------------------------
// DefaultModule

/// Lists, sets, maps and `SystemTime`.
///
/// Installed by default, after every other module.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultModule;

impl SerialModule for DefaultModule {
    fn strategy_for(&self, meta: &TypeMeta) -> Option<Strategy> {
        match meta.type_info() {
            TypeInfo::List(info) | TypeInfo::Set(info) => Some(SequenceSerializer::strategy(info)),
            TypeInfo::Map(info) => Some(MapSerializer::strategy(info)),
            TypeInfo::Opaque(info) if info.ty().is::<SystemTime>() => {
                Some(Strategy::inplace(AdapterSerializer::<SystemTimeAdapter>::new()))
            }
            _ => None,
        }
    }

    fn module_name(&self) -> &'static str {
        "DefaultModule"
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, VecDeque};
    use alloc::string::String;
    use std::time::SystemTime;

    use super::{DefaultModule, ExplicitModule, SerialModule};
    use crate::registry::{GetTypeMeta, TypeMeta};

    #[test]
    fn default_module_covers_collections() {
        let module = DefaultModule;
        let strategy = |meta: TypeMeta| module.strategy_for(&meta).map(|s| s.name());

        assert_eq!(
            strategy(VecDeque::<i32>::get_type_meta()),
            Some("SequenceSerializer")
        );
        assert_eq!(
            strategy(BTreeMap::<String, i32>::get_type_meta()),
            Some("MapSerializer")
        );
        assert!(strategy(SystemTime::get_type_meta()).is_some());
        assert_eq!(strategy(i32::get_type_meta()), None);
    }

    #[test]
    fn explicit_module_is_keyed_by_type() {
        let module = ExplicitModule::new();
        assert!(module.is_empty());
        assert!(module.strategy_for(&i32::get_type_meta()).is_none());
    }
}

use alloc::boxed::Box;

use crate::Object;
use crate::info::Typed;
use crate::registry::FromType;

/// The zero-argument constructor of a type, backed by [`Default`].
///
/// Preferred by the instantiation plan before any fallback.
///
/// ```
/// use og_serial::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
/// let generator = registry
///     .get_with_type_name("String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// assert_eq!(generator.default().take::<String>().unwrap(), "");
/// ```
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Object>,
}

impl TypeTraitDefault {
    /// Uses `func` as the zero-argument constructor.
    #[inline]
    pub const fn new(func: fn() -> Box<dyn Object>) -> Self {
        Self { func }
    }

    #[inline(always)]
    pub fn default(&self) -> Box<dyn Object> {
        (self.func)()
    }

    #[inline]
    pub(crate) fn func(&self) -> fn() -> Box<dyn Object> {
        self.func
    }
}

impl<T: Default + Typed + Object> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}

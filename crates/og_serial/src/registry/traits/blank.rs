use alloc::boxed::Box;

use crate::Object;

/// Builds a value with every field set to its own [`Default`], without
/// running the type's constructor.
///
/// This is the raw allocation fallback. The instantiation plan only uses it
/// when the type has no zero-argument constructor and the context allows
/// raw allocation. `#[derive(Serial)]` generates it for `#[serial(blank)]`.
#[derive(Clone)]
pub struct TypeTraitBlank {
    func: fn() -> Box<dyn Object>,
}

impl TypeTraitBlank {
    #[inline]
    pub const fn new(func: fn() -> Box<dyn Object>) -> Self {
        Self { func }
    }

    #[inline(always)]
    pub fn blank(&self) -> Box<dyn Object> {
        (self.func)()
    }

    #[inline]
    pub(crate) fn func(&self) -> fn() -> Box<dyn Object> {
        self.func
    }
}

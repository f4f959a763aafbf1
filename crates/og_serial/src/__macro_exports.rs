//! Items named by code generated with `#[derive(Serial)]`.

pub use alloc::boxed::Box;
pub use core::default::Default;
pub use core::option::Option;
pub use core::result::Result;

pub use og_utils::hash::fixed_hash;

use crate::registry::{GetTypeMeta, TypeRegistry};

/// Registers `T` with its dependencies.
#[inline]
pub fn __register<T: GetTypeMeta>(registry: &mut TypeRegistry) {
    registry.register::<T>();
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::TypeRegistry;

    /// A registration function submitted by `#[serial(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Runs every submitted registration function.
    pub fn register_types(registry: &mut TypeRegistry) {
        let mut count = 0_usize;
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
            count += 1;
        }
        log::debug!("auto-registered {count} types");
    }
}

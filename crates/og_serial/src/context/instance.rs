use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::Object;
use crate::context::Bundle;

/// A constructor registered on the builder. Receives the bundle of the
/// stream being read.
pub type Constructor = Arc<dyn Fn(&Bundle) -> Box<dyn Object> + Send + Sync>;

/// How the reader allocates a value before an in-place strategy fills it.
///
/// Chosen once per type, in this order of preference.
#[derive(Clone)]
pub enum InstancePlan {
    /// Registered with [`SerialContextBuilder::constructor`].
    ///
    /// [`SerialContextBuilder::constructor`]: crate::context::SerialContextBuilder::constructor
    Custom(Constructor),
    /// The zero-argument constructor.
    Default(fn() -> Box<dyn Object>),
    /// Every field set to its own default, only with `allow_raw`.
    Blank(fn() -> Box<dyn Object>),
}

impl InstancePlan {
    pub fn instantiate(&self, bundle: &Bundle) -> Box<dyn Object> {
        match self {
            Self::Custom(constructor) => constructor(bundle),
            Self::Default(func) | Self::Blank(func) => func(),
        }
    }
}

impl fmt::Debug for InstancePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom"),
            Self::Default(_) => f.write_str("Default"),
            Self::Blank(_) => f.write_str("Blank"),
        }
    }
}

//! The value model of the codec.
//!
//! - [`Object`]: dynamic access to a serializable value.
//! - [`Serial`]: the framing of a statically typed slot.
//! - [`Shared`]: a graph node with identity, `Rc<RefCell<T>>` underneath.
//! - [`SharedCell`]: a node with both typed and dynamic handles.

// -----------------------------------------------------------------------------
// Modules

mod object;
mod serial;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use object::impl_object_cast_fn;

pub use object::Object;
pub use serial::Serial;
pub use shared::{Shared, SharedCell};

//! Implementations for foreign types, plus helpers for writing them.
//!
//! - [`concat`]: joins type path fragments.
//! - [`NonGenericTypeInfoCell`]: static [`TypeInfo`] of a non-generic type.
//! - [`GenericTypeInfoCell`], [`GenericTypePathCell`]: the same for generic types.
//!
//! ## Implemented types
//!
//! | type | `Object` | `Serial` | encoding |
//! |---|---|---|---|
//! | `i8 bool char i16 i32 i64 f32 f64 String` | yes | yes | tagged primitive |
//! | `u8 u16 u32 u64` | | yes | tagged primitive of the same width |
//! | `Vec<T>` | yes | yes | array |
//! | `VecDeque<T>` | yes | yes | list |
//! | `BTreeSet<T>`, `HashSet<T>` | yes | yes | set |
//! | `BTreeMap<K, V>`, `HashMap<K, V>` | yes | yes | map |
//! | `SystemTime` | yes | yes | adapter, signed nanoseconds |
//! | `Option<T>` | | yes | null marker or `T` |
//! | `Box<dyn Object>` | | yes | with class |
//! | `Shared<T>` | | yes | node without class |
//! | `Shared<dyn Object>` | | yes | node with class |
//!
//! [`TypeInfo`]: crate::info::TypeInfo

use alloc::string::String;

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod map;
mod option;
mod primitive;
mod sequence;
mod shared;
mod time;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// Joins fragments into one string with a single allocation.
///
/// ```
/// use og_serial::impls::concat;
///
/// let path = concat(&["alloc::vec::Vec", "<", "i32", ">"]);
/// assert_eq!(path, "alloc::vec::Vec<i32>");
/// assert_eq!(path.capacity(), 20);
/// ```
#[inline(never)]
pub fn concat(parts: &[&str]) -> String {
    let len = parts.iter().map(|part| part.len()).sum();
    let mut joined = String::with_capacity(len);
    parts.iter().for_each(|part| joined.push_str(part));
    joined
}

//! The byte-level vocabulary of the stream.
//!
//! Every encoded unit starts with one tag byte. Negative values are
//! [`Sentinel`]s for inline primitives; non-negative values are [`WireTag`]
//! flags that frame an object.
//!
//! ```text
//! tag >= 0 : [flags] [id: u32 if SHARED or BACKREF]
//!            [class: u32 if CLASS_REF | len+utf8 name, unless UNTYPED] [payload]
//! tag <  0 : [sentinel] [big-endian value]
//! ```

// -----------------------------------------------------------------------------
// Modules

mod primitive;
mod tag;

// -----------------------------------------------------------------------------
// Exports

pub use primitive::{Primitive, PrimitiveKind};
pub use tag::{Sentinel, Tag, WireTag};

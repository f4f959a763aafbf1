//! A binary codec for object graphs.
//!
//! Values are written to an [`Output`] and read back from an [`Input`]. Both
//! consult a [`SerialContext`], which picks an encoding [`Strategy`] for every
//! type and caches the choice.
//!
//! ## Menu
//!
//! - [`wire`]: tag bytes and the fixed-width primitive codec.
//! - [`info`]: static type information generated by `#[derive(Serial)]`.
//! - [`registry`]: [`TypeRegistry`], [`TypeMeta`] and the type traits.
//! - [`object`]: the [`Object`] and [`Serial`] traits and the [`Shared`] graph node.
//! - [`context`]: [`SerialContext`], configuration and modules.
//! - [`strategy`]: the built-in encoding strategies.
//! - [`ser`] / [`de`]: the graph writer and reader.
//!
//! ## Example
//!
//! ```
//! use og_serial::{Input, Output, SerialContext, derive::Serial};
//!
//! #[derive(Serial, Default, Debug, PartialEq)]
//! #[serial(default)]
//! struct Engine {
//!     name: String,
//!     ps: i32,
//! }
//!
//! let context = SerialContext::new();
//! context.register::<Engine>();
//!
//! let mut bytes = Vec::new();
//! let mut output = Output::new(&context, &mut bytes);
//! output.write_object(&Engine { name: "V8".into(), ps: 450 }).unwrap();
//! output.close().unwrap();
//!
//! let mut input = Input::new(&context, bytes.as_slice());
//! let engine = input.read_object_as::<Engine>().unwrap();
//! assert_eq!(engine, Engine { name: "V8".into(), ps: 450 });
//! ```
//!
//! [`TypeRegistry`]: registry::TypeRegistry
//! [`TypeMeta`]: registry::TypeMeta

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate as `og_serial`, which must also work
// from inside the crate itself.
extern crate self as og_serial;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod context;
pub mod de;
pub mod impls;
pub mod info;
pub mod object;
pub mod registry;
pub mod ser;
pub mod strategy;
pub mod wire;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use context::{SerialConfig, SerialContext, SharingMode};
pub use de::Input;
pub use error::SerialError;
pub use object::{Object, Serial, Shared};
pub use og_serial_derive as derive;
pub use ser::Output;
pub use strategy::Strategy;

//! See [`Serial`](derive_serial).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Serial Derivation
///
/// `#[derive(Serial)]` implements `TypePath`, `Typed`, `Object`, `Serial`
/// and `GetTypeMeta` for a struct or a unit-only enum.
///
/// Structs are encoded by walking their fields in declaration order, unless
/// an attribute says otherwise. Enums are encoded by ordinal, so reordering
/// the variants changes the meaning of streams written earlier.
///
/// ## Instantiation
///
/// Reading a struct fills a fresh instance. Declare how to make one:
///
/// - `default`: the type implements `Default`.
/// - `blank`: every field set to its own `Default`. Only used when the
///   context is configured with `allow_raw`.
///
/// A constructor registered on the context builder takes precedence.
///
/// ```rust, ignore
/// #[derive(Serial, Default)]
/// #[serial(default)]
/// struct Engine {
///     name: String,
///     ps: i32,
/// }
/// ```
///
/// ## Encoding
///
/// At most one of:
///
/// - `data`: read all field values first, then build the value at once.
///   Transient fields are rebuilt with `Default`. A data class cannot
///   reference itself through its fields.
/// - `self_describing`: the type implements `SelfSerial`.
/// - `with = expr`: `expr` evaluates to a `Strategy` for this type.
/// - `adapter = Path`: an `Adapter` whose `Target` is this type.
/// - `companion`: the type implements `Companion`.
///
/// ```rust, ignore
/// #[derive(Serial)]
/// #[serial(data)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// ```
///
/// ## Fields
///
/// `#[serial(transient)]` leaves a field out of the stream.
///
/// ## Equality and hashing
///
/// `partial_eq`, `hash` and `debug` back `Object::object_eq`,
/// `Object::object_hash` and `Object::object_debug` with the standard
/// traits. Equivalence sharing needs `partial_eq` and `hash`.
///
/// ## Type path
///
/// `#[serial(type_path = "my_crate::Engine")]` overrides the path written
/// as the class name. Generics are appended.
///
/// ## Auto registration
///
/// `auto_register` adds the type to the list registered by every new
/// context. No effect on generic types, or without the `auto_register`
/// feature.
#[proc_macro_derive(Serial, attributes(serial))]
pub fn derive_serial(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::SerialDerive::from_input(&ast) {
        Ok(derive) => impls::impl_serial(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

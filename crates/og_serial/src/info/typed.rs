use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by `#[derive(Serial)]`. Manual implementations store the
/// info in a [`NonGenericTypeInfoCell`] or, for generic types, a
/// [`GenericTypeInfoCell`]:
///
/// ```
/// use og_serial::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
/// use og_serial::impls::NonGenericTypeInfoCell;
///
/// struct Token;
///
/// impl TypePath for Token {
///     fn type_path() -> &'static str { "demo::Token" }
///     fn type_name() -> &'static str { "Token" }
///     fn type_ident() -> &'static str { "Token" }
/// }
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Token::type_info().ty().is::<Token>());
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

use crate::info::Typed;

/// Creates a type trait for the type `T`.
///
/// ```
/// use og_serial::registry::{FromType, TypeTraitDefault};
///
/// let default = <TypeTraitDefault as FromType<String>>::from_type();
/// assert_eq!(default.default().take::<String>().ok().as_deref(), Some(""));
/// ```
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}

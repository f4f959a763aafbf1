use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use og_utils::TypeIdMap;

/// Extra properties of one stream, at most one value per type.
///
/// Every [`Input`] owns a bundle. Custom constructors receive it, so a
/// value can be seeded from state the caller attached to the stream.
///
/// ```
/// use og_serial::context::Bundle;
///
/// struct Locale(&'static str);
///
/// let mut bundle = Bundle::new();
/// bundle.insert(Locale("de"));
/// assert_eq!(bundle.get::<Locale>().map(|l| l.0), Some("de"));
/// assert!(bundle.get::<u8>().is_none());
/// ```
///
/// [`Input`]: crate::Input
#[derive(Default)]
pub struct Bundle(TypeIdMap<Box<dyn Any>>);

impl Bundle {
    #[inline]
    pub const fn new() -> Self {
        Self(TypeIdMap::new())
    }

    /// Stores `value`, returning the previous value of the same type.
    pub fn insert<T: Any>(&mut self, value: T) -> Option<T> {
        let old = self.0.insert(TypeId::of::<T>(), Box::new(value))?;
        old.downcast::<T>().ok().map(|old| *old)
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.get_type::<T>()?.downcast_ref::<T>()
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.get_mut(&TypeId::of::<T>())?.downcast_mut::<T>()
    }

    pub fn remove<T: Any>(&mut self) -> Option<T> {
        let old = self.0.remove(&TypeId::of::<T>())?;
        old.downcast::<T>().ok().map(|old| *old)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::Bundle;

    #[test]
    fn one_value_per_type() {
        let mut bundle = Bundle::new();
        assert_eq!(bundle.insert(String::from("a")), None);
        assert_eq!(bundle.insert(7_u32), None);
        assert_eq!(bundle.insert(String::from("b")).as_deref(), Some("a"));
        assert_eq!(bundle.len(), 2);

        *bundle.get_mut::<u32>().unwrap() += 1;
        assert_eq!(bundle.remove::<u32>(), Some(8));
        assert_eq!(bundle.get::<String>().map(String::as_str), Some("b"));
        assert!(bundle.get::<u32>().is_none());
    }
}

use core::any::TypeId;
use core::fmt::Debug;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map with [`TypeId`] keys.
///
/// `TypeId` is already a well distributed hash, so the map hashes it with
/// [`NoOpHashState`] instead of running a real hasher.
///
/// Only the operations needed by registries and memo tables are exposed,
/// so the backing container can change without touching callers.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use og_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.insert(TypeId::of::<u8>(), "byte");
///
/// assert_eq!(map.get_type::<u8>(), Some(&"byte"));
/// assert!(!map.contains_type::<u16>());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty map. Usable in `static` and `const` contexts.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, NoOpHashState))
    }

    /// Inserts the value produced by `f` unless the key is already present.
    ///
    /// Returns `true` when a new entry was created.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the entry for `type_id`, creating it with `f` first if missing.
    ///
    /// When two callers race to fill the same key, the first stored value wins
    /// and later values are dropped.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    /// Inserts a value, returning the previous one for this key.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every entry but keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Visits all entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }

    /// Visits all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn first_insert_wins() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<i32>(), || 1));
        assert!(!map.try_insert(TypeId::of::<i32>(), || 2));
        assert_eq!(*map.get_or_insert(TypeId::of::<i32>(), || 3), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let mut map = TypeIdMap::with_capacity(4);
        map.insert(TypeId::of::<u8>(), 'a');
        map.insert(TypeId::of::<u16>(), 'b');
        assert_eq!(map.remove(&TypeId::of::<u8>()), Some('a'));
        assert!(map.contains_type::<u16>());
        map.clear();
        assert!(map.is_empty());
    }
}

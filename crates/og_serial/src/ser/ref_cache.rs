use alloc::vec::Vec;

use og_utils::hash::HashMap;

use crate::context::SharingMode;
use crate::{Object, Shared};

/// Ids of the nodes written so far.
///
/// Every registered node is retained until the cache is cleared, so an
/// address cannot be reused by a different node while it is still a key.
pub(crate) struct ReferenceCache {
    mode: SharingMode,
    next_id: u32,
    by_addr: HashMap<usize, u32>,
    by_hash: HashMap<u64, Vec<(Shared<dyn Object>, u32)>>,
    retained: Vec<Shared<dyn Object>>,
}

impl ReferenceCache {
    pub fn new(mode: SharingMode) -> Self {
        Self {
            mode,
            next_id: 0,
            by_addr: HashMap::default(),
            by_hash: HashMap::default(),
            retained: Vec::new(),
        }
    }

    /// The id of `node`, or of an equal node in equivalence mode.
    pub fn lookup(&self, node: &Shared<dyn Object>) -> Option<u32> {
        match self.mode {
            SharingMode::Unshared => None,
            SharingMode::IdentityShared => self.by_addr.get(&node.addr()).copied(),
            SharingMode::EquivalenceShared => self
                .by_addr
                .get(&node.addr())
                .copied()
                .or_else(|| self.lookup_equal(node)),
        }
    }

    fn lookup_equal(&self, node: &Shared<dyn Object>) -> Option<u32> {
        let value = node.as_rc().try_borrow().ok()?;
        let candidates = self.by_hash.get(&value.object_hash()?)?;
        candidates.iter().find_map(|(other, id)| {
            let other = other.as_rc().try_borrow().ok()?;
            (value.object_eq(&*other) == Some(true)).then_some(*id)
        })
    }

    /// Assigns the next id to `node`, `None` when nothing is shared.
    pub fn register(&mut self, node: &Shared<dyn Object>) -> Option<u32> {
        if !self.mode.is_shared() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.by_addr.insert(node.addr(), id);
        self.retained.push(node.clone());

        if self.mode == SharingMode::EquivalenceShared {
            let hash = node
                .as_rc()
                .try_borrow()
                .ok()
                .and_then(|value| value.object_hash());
            if let Some(hash) = hash {
                self.by_hash.entry(hash).or_default().push((node.clone(), id));
            }
        }
        Some(id)
    }

    pub fn clear(&mut self) {
        self.next_id = 0;
        self.by_addr.clear();
        self.by_hash.clear();
        self.retained.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::ReferenceCache;
    use crate::context::SharingMode;
    use crate::{Object, Shared};

    fn node(text: &str) -> Shared<dyn Object> {
        Shared::new(String::from(text)).to_dyn()
    }

    #[test]
    fn unshared_assigns_nothing() {
        let mut cache = ReferenceCache::new(SharingMode::Unshared);
        let a = node("a");
        assert_eq!(cache.register(&a), None);
        assert_eq!(cache.lookup(&a), None);
    }

    #[test]
    fn identity_by_address() {
        let mut cache = ReferenceCache::new(SharingMode::IdentityShared);
        let a = node("a");
        let b = node("a");
        assert_eq!(cache.register(&a), Some(0));
        assert_eq!(cache.lookup(&a.clone()), Some(0));
        assert_eq!(cache.lookup(&b), None);
        assert_eq!(cache.register(&b), Some(1));
        cache.clear();
        assert_eq!(cache.lookup(&a), None);
    }

    #[test]
    fn equivalence_by_value() {
        let mut cache = ReferenceCache::new(SharingMode::EquivalenceShared);
        let a = node("a");
        assert_eq!(cache.register(&a), Some(0));
        assert_eq!(cache.lookup(&node("a")), Some(0));
        assert_eq!(cache.lookup(&node("b")), None);
    }
}

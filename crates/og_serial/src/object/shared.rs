use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Object;
use crate::impls::{GenericTypePathCell, concat};
use crate::info::TypePath;

// -----------------------------------------------------------------------------
// Shared

/// A graph node with identity.
///
/// Only `Shared` values take part in reference sharing: two clones of the
/// same `Shared` are written once and read back as one node when the
/// context shares by identity. Owned fields are always written inline.
///
/// `Shared<dyn Object>` is the polymorphic form; its class is written to the
/// stream.
///
/// ```
/// use og_serial::Shared;
///
/// let a = Shared::new(1_i32);
/// let b = a.clone();
/// *b.borrow_mut() += 1;
/// assert!(a.ptr_eq(&b));
/// assert_eq!(*a.borrow(), 2);
/// ```
pub struct Shared<T: ?Sized>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }
}

impl<T: ?Sized> Shared<T> {
    #[inline]
    pub fn from_rc(rc: Rc<RefCell<T>>) -> Self {
        Self(rc)
    }

    #[inline]
    pub fn as_rc(&self) -> &Rc<RefCell<T>> {
        &self.0
    }

    /// Panics if the node is currently borrowed mutably.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Panics if the node is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point to the same node.
    #[inline]
    pub fn ptr_eq<U: ?Sized>(&self, other: &Shared<U>) -> bool {
        self.addr() == other.addr()
    }

    /// The address of the node, its identity.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T: Object> Shared<T> {
    /// Returns a polymorphic handle to the same node.
    #[inline]
    pub fn to_dyn(&self) -> Shared<dyn Object> {
        let rc: Rc<RefCell<dyn Object>> = self.0.clone();
        Shared(rc)
    }

    /// Returns a cell with both typed and dynamic access to the same node.
    #[inline]
    pub fn to_cell(&self) -> SharedCell {
        SharedCell::from_rc(self.0.clone())
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Default> Default for Shared<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Equal when the nodes are the same, otherwise compares the contents.
///
/// A pair of nodes met again while it is being compared counts as equal,
/// so cyclic graphs compare in finite time.
impl<T: PartialEq + ?Sized> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match Visit::enter(Visiting::Eq(self.addr(), other.addr())) {
            Some(_visit) => *self.borrow() == *other.borrow(),
            None => true,
        }
    }
}

impl<T: Eq + ?Sized> Eq for Shared<T> {}

/// Hashes the contents. A node met again while it is being hashed only
/// contributes a marker.
impl<T: Hash + ?Sized> Hash for Shared<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match Visit::enter(Visiting::Hash(self.addr())) {
            Some(_visit) => self.borrow().hash(state),
            None => state.write_u8(CYCLE_MARKER),
        }
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_visit) = Visit::enter(Visiting::Debug(self.addr())) else {
            return f.write_str("Shared(<cycle>)");
        };
        match self.0.try_borrow() {
            Ok(value) => f.debug_tuple("Shared").field(&&*value).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}

impl PartialEq for Shared<dyn Object> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match Visit::enter(Visiting::Eq(self.addr(), other.addr())) {
            Some(_visit) => self.borrow().object_eq(&*other.borrow()) == Some(true),
            None => true,
        }
    }
}

// -----------------------------------------------------------------------------
// Cycle guard

const CYCLE_MARKER: u8 = 0xC7;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visiting {
    Eq(usize, usize),
    Hash(usize),
    Debug(usize),
}

std::thread_local! {
    static VISITING: RefCell<Vec<Visiting>> = const { RefCell::new(Vec::new()) };
}

/// Keeps a node on this thread's visiting stack until dropped.
struct Visit(Visiting);

impl Visit {
    /// `None` if `key` is already being visited.
    fn enter(key: Visiting) -> Option<Self> {
        VISITING.with_borrow_mut(|visiting| {
            if visiting.contains(&key) {
                return None;
            }
            visiting.push(key);
            Some(Self(key))
        })
    }
}

impl Drop for Visit {
    fn drop(&mut self) {
        VISITING.with_borrow_mut(|visiting| {
            if let Some(pos) = visiting.iter().rposition(|key| *key == self.0) {
                visiting.remove(pos);
            }
        });
    }
}

impl<T: TypePath> TypePath for Shared<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["og_serial::Shared<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Shared<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Shared"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("og_serial")
    }
}

impl TypePath for Shared<dyn Object> {
    #[inline]
    fn type_path() -> &'static str {
        "og_serial::Shared<dyn og_serial::Object>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Shared<dyn Object>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Shared"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("og_serial")
    }
}

// -----------------------------------------------------------------------------
// SharedCell

/// A node as stored in the reader's id table.
///
/// Holds the same allocation twice: once as `dyn Any`, so it can be handed
/// out as a typed [`Shared<T>`], and once as `dyn Object` for strategies.
#[derive(Clone)]
pub struct SharedCell {
    any: Rc<dyn Any>,
    object: Rc<RefCell<dyn Object>>,
    type_path: &'static str,
}

impl SharedCell {
    #[inline]
    pub fn new<T: Object>(value: T) -> Self {
        Self::from_rc(Rc::new(RefCell::new(value)))
    }

    pub fn from_rc<T: Object>(rc: Rc<RefCell<T>>) -> Self {
        let type_path = rc.borrow().object_type_path();
        Self {
            any: rc.clone(),
            object: rc,
            type_path,
        }
    }

    #[inline]
    pub fn object(&self) -> &Rc<RefCell<dyn Object>> {
        &self.object
    }

    /// The type path of the stored value, readable while it is borrowed.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn to_dyn(&self) -> Shared<dyn Object> {
        Shared(self.object.clone())
    }

    /// A typed handle, `None` if the value is not a `T`.
    pub fn downcast<T: Object>(&self) -> Option<Shared<T>> {
        self.any.clone().downcast::<RefCell<T>>().ok().map(Shared)
    }

    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.object) as *const () as usize
    }
}

impl fmt::Debug for SharedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCell")
            .field("type_path", &self.type_path)
            .field("addr", &self.addr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::{Shared, SharedCell};
    use crate::Object;

    #[test]
    fn identity_and_equality() {
        let a = Shared::new(String::from("x"));
        let b = Shared::new(String::from("x"));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn cell_keeps_one_allocation() {
        let node = Shared::new(7_i32);
        let cell = node.to_cell();
        assert_eq!(cell.addr(), node.addr());
        assert_eq!(cell.type_path(), "i32");

        let typed = cell.downcast::<i32>().unwrap();
        *typed.borrow_mut() = 8;
        assert_eq!(*node.borrow(), 8);
        assert!(cell.downcast::<i64>().is_none());

        let dynamic = cell.to_dyn();
        assert!(dynamic.ptr_eq(&node));
        assert!(dynamic.borrow().is::<i32>());
    }

    #[test]
    fn boxed_into_shared() {
        let value: Box<dyn Object> = Box::new(String::from("V8"));
        let cell: SharedCell = value.into_shared();
        assert_eq!(&*cell.downcast::<String>().unwrap().borrow(), "V8");
    }
}

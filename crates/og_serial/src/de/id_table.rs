use alloc::vec::Vec;

use crate::SerialError;
use crate::object::SharedCell;

/// Nodes read so far, indexed by id.
///
/// An id is announced when its `SHARED` tag is read and filled once the
/// node exists. In-place reads fill it before the contents are read, value
/// reads only after.
#[derive(Default)]
pub(crate) struct IdTable {
    slots: Vec<Option<SharedCell>>,
}

impl IdTable {
    /// Ids must be announced in first-use order, starting at zero.
    pub fn announce(&mut self, id: u32) -> Result<(), SerialError> {
        let expected = self.slots.len() as u32;
        if id != expected {
            return Err(SerialError::IdOutOfOrder { expected, found: id });
        }
        self.slots.push(None);
        Ok(())
    }

    pub fn register(&mut self, id: u32, cell: SharedCell) {
        if let Some(slot) = self.slots.get_mut(id as usize) {
            *slot = Some(cell);
        }
    }

    /// The node of `id`, if it has been announced and filled.
    pub fn get(&self, id: u32) -> Option<SharedCell> {
        self.slots.get(id as usize)?.clone()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

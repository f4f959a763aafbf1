//! The graph reader.
//!
//! [`Input`] mirrors the writer tag by tag. Nodes with a `SHARED` id are
//! kept in an id table so later back-references resolve to the same node.

// -----------------------------------------------------------------------------
// Modules

mod id_table;
mod input;

// -----------------------------------------------------------------------------
// Exports

pub use input::Input;

pub(crate) use id_table::IdTable;

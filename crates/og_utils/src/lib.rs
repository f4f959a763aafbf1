//! Small shared utilities for the `objgraph` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used for
//!   per-type registries and resolution caches.
//! - [`hash`]: hash states and hash containers on top of *hashbrown* and *foldhash*.
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;

//! The graph writer.
//!
//! [`Output`] frames every object with a tag byte and consults the
//! reference cache for [`Shared`] nodes, so a node reached twice is written
//! once and a cycle terminates.
//!
//! [`Shared`]: crate::Shared

// -----------------------------------------------------------------------------
// Modules

mod output;
mod ref_cache;

// -----------------------------------------------------------------------------
// Exports

pub use output::Output;

pub(crate) use ref_cache::ReferenceCache;

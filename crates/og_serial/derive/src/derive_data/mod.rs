//! Parsing of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod serial_derive;
mod serial_meta;
mod type_parser;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{DeclaredStrategy, FieldAttributes, TypeAttributes};
pub(crate) use serial_derive::{SerialDerive, SerialEnum, SerialStruct, StructStyle};
pub(crate) use serial_meta::SerialMeta;
pub(crate) use type_parser::TypeParser;

//! End-to-end scenarios over the writer, the reader and the derive.

mod model;

mod config;
mod graph;
mod resolution;
mod round_trip;
mod wire_format;

use alloc::vec::Vec;

use crate::{Input, Output, SerialContext, SerialError};

/// Runs `write` against a fresh output and returns the closed stream.
pub(crate) fn encode(
    context: &SerialContext,
    write: impl FnOnce(&mut Output<'_>) -> Result<(), SerialError>,
) -> Result<Vec<u8>, SerialError> {
    let mut bytes = Vec::new();
    let mut output = Output::new(context, &mut bytes);
    let written = write(&mut output);
    output.close()?;
    written.map(|()| bytes)
}

/// Runs `read` against a reader over `bytes`.
pub(crate) fn decode<T>(
    context: &SerialContext,
    bytes: &[u8],
    read: impl FnOnce(&mut Input<'_>) -> Result<T, SerialError>,
) -> Result<T, SerialError> {
    let mut input = Input::new(context, bytes);
    let value = read(&mut input);
    input.close();
    value
}

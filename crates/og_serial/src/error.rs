use alloc::string::String;
use core::fmt::Display;

use thiserror::Error;

// -----------------------------------------------------------------------------
// SerialError

/// The single error kind of the codec.
///
/// Nothing is retried internally. Once a read or write call has failed, the
/// stream position is undefined and the stream should be dropped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    /// A class name read from the stream does not resolve to a registered type.
    #[error("class `{0}` not found")]
    ClassNotFound(String),

    /// A value of an unregistered type was handed to the writer.
    #[error("type `{0}` is not registered in the serial context")]
    Unregistered(String),

    /// The tag byte does not fit the value expected at this position.
    #[error("unexpected tag {found:#04x}, expected {expected}")]
    UnexpectedTag { expected: &'static str, found: u8 },

    /// A back-reference names an id that has no finished object.
    #[error("did not find object ref with id {0}")]
    UnresolvedReference(u32),

    /// A shared id appeared out of first-use order.
    #[error("object id {found} announced out of order, expected {expected}")]
    IdOutOfOrder { expected: u32, found: u32 },

    /// No constructor is available and raw allocation is not permitted.
    #[error("type `{0}` has no usable constructor")]
    NoConstructor(&'static str),

    /// A declared strategy targets a different type.
    #[error("serializer `{serializer}` is not a serializer of type `{type_path}`")]
    IncompatibleSerializer {
        type_path: &'static str,
        serializer: &'static str,
    },

    /// A nested option holds `None`, which cannot be told apart from an
    /// absent value in the stream.
    #[error("`Some(None)` of `{0}` cannot be written, it reads back as `None`")]
    AmbiguousNull(&'static str),

    /// An untyped value was read without naming its class.
    #[error("cannot read untyped value without class")]
    UntypedWithoutClass,

    /// The resolution chain found no strategy for the type.
    #[error("no serializer available for type `{0}`")]
    NoStrategy(&'static str),

    /// A decoded value is not of the requested type.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Bytes that decode to an invalid value.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The underlying byte stream failed.
    #[error("i/o failure on the underlying stream")]
    Io(#[source] std::io::Error),

    /// Raised by user strategies.
    #[error("{0}")]
    Custom(String),
}

impl SerialError {
    /// Creates a [`SerialError::Custom`] from any displayable message.
    #[inline(never)]
    pub fn custom(msg: impl Display) -> Self {
        Self::Custom(alloc::format!("{msg}"))
    }

    #[inline(never)]
    pub(crate) fn invalid(msg: impl Display) -> Self {
        Self::InvalidData(alloc::format!("{msg}"))
    }

    /// Wraps an I/O failure. Called once, where the byte stream is touched.
    #[cold]
    pub(crate) fn io(err: std::io::Error) -> Self {
        log::error!("object graph stream failed: {err}");
        Self::Io(err)
    }
}

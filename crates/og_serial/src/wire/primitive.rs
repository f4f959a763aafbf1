use alloc::string::String;

use crate::wire::Sentinel;
use crate::{Input, Output, SerialError};

// -----------------------------------------------------------------------------
// PrimitiveKind

/// The primitive kinds that have their own tag sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Byte,
    Bool,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl PrimitiveKind {
    /// Byte width of the raw encoding, `None` for strings.
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Byte | Self::Bool => Some(1),
            Self::Short => Some(2),
            Self::Char | Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            Self::String => None,
        }
    }

    #[inline]
    pub const fn is_fixed_width(self) -> bool {
        self.width().is_some()
    }

    /// The kind announced by a sentinel.
    pub const fn of_sentinel(sentinel: Sentinel) -> Self {
        match sentinel {
            Sentinel::Byte => Self::Byte,
            Sentinel::True | Sentinel::False => Self::Bool,
            Sentinel::Char => Self::Char,
            Sentinel::Short => Self::Short,
            Sentinel::Int => Self::Int,
            Sentinel::Long => Self::Long,
            Sentinel::Float => Self::Float,
            Sentinel::Double => Self::Double,
            Sentinel::String => Self::String,
        }
    }
}

// -----------------------------------------------------------------------------
// Primitive

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width (or length-prefixed) big-endian encoding of one primitive.
///
/// `encode`/`decode` handle the raw value only, as stored inside primitive
/// arrays. The tagged forms add the sentinel byte in front.
///
/// Unsigned integers reuse the sentinel of the signed type with the same width.
pub trait Primitive: sealed::Sealed + Sized + 'static {
    const KIND: PrimitiveKind;

    /// The sentinel announcing this value.
    fn sentinel(&self) -> Sentinel;

    fn encode(&self, output: &mut Output<'_>) -> Result<(), SerialError>;

    fn decode(input: &mut Input<'_>) -> Result<Self, SerialError>;

    /// Writes the sentinel and the raw value.
    fn encode_tagged(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_raw(&[self.sentinel().byte()])?;
        self.encode(output)
    }

    /// Decodes the payload after `sentinel` has been read.
    fn decode_tagged(sentinel: Sentinel, input: &mut Input<'_>) -> Result<Self, SerialError> {
        if PrimitiveKind::of_sentinel(sentinel) != Self::KIND {
            return Err(SerialError::UnexpectedTag {
                expected: core::any::type_name::<Self>(),
                found: sentinel.byte(),
            });
        }
        Self::decode(input)
    }
}

macro_rules! impl_numeric_primitive {
    ($($ty:ty => $kind:ident;)*) => {$(
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            #[inline]
            fn sentinel(&self) -> Sentinel {
                Sentinel::$kind
            }

            #[inline]
            fn encode(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
                output.write_raw(&self.to_be_bytes())
            }

            #[inline]
            fn decode(input: &mut Input<'_>) -> Result<Self, SerialError> {
                Ok(<$ty>::from_be_bytes(input.read_array()?))
            }
        }
    )*};
}

impl_numeric_primitive! {
    i8 => Byte;
    u8 => Byte;
    i16 => Short;
    u16 => Short;
    i32 => Int;
    u32 => Int;
    i64 => Long;
    u64 => Long;
    f32 => Float;
    f64 => Double;
}

impl sealed::Sealed for bool {}

impl Primitive for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Bool;

    #[inline]
    fn sentinel(&self) -> Sentinel {
        if *self { Sentinel::True } else { Sentinel::False }
    }

    fn encode(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_raw(&[*self as u8])
    }

    fn decode(input: &mut Input<'_>) -> Result<Self, SerialError> {
        match input.read_array::<1>()? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(SerialError::invalid(format_args!("{other} is not a boolean"))),
        }
    }

    // The sentinel carries the value.
    fn encode_tagged(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_raw(&[self.sentinel().byte()])
    }

    fn decode_tagged(sentinel: Sentinel, _: &mut Input<'_>) -> Result<Self, SerialError> {
        match sentinel {
            Sentinel::True => Ok(true),
            Sentinel::False => Ok(false),
            other => Err(SerialError::UnexpectedTag {
                expected: "bool",
                found: other.byte(),
            }),
        }
    }
}

impl sealed::Sealed for char {}

impl Primitive for char {
    const KIND: PrimitiveKind = PrimitiveKind::Char;

    #[inline]
    fn sentinel(&self) -> Sentinel {
        Sentinel::Char
    }

    fn encode(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_raw(&u32::from(*self).to_be_bytes())
    }

    fn decode(input: &mut Input<'_>) -> Result<Self, SerialError> {
        let scalar = u32::from_be_bytes(input.read_array()?);
        char::from_u32(scalar)
            .ok_or_else(|| SerialError::invalid(format_args!("{scalar:#x} is not a char")))
    }
}

impl sealed::Sealed for String {}

impl Primitive for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;

    #[inline]
    fn sentinel(&self) -> Sentinel {
        Sentinel::String
    }

    fn encode(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_len(self.len())?;
        output.write_raw(self.as_bytes())
    }

    fn decode(input: &mut Input<'_>) -> Result<Self, SerialError> {
        let len = input.read_len()?;
        let bytes = input.read_raw(len)?;
        String::from_utf8(bytes).map_err(|e| SerialError::invalid(e.utf8_error()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{Input, Output, SerialContext, SerialError};

    fn written(write: impl FnOnce(&mut Output<'_>) -> Result<(), SerialError>) -> Vec<u8> {
        let context = SerialContext::new();
        let mut bytes = Vec::new();
        let mut output = Output::new(&context, &mut bytes);
        write(&mut output).unwrap();
        output.close().unwrap();
        bytes
    }

    #[test]
    fn layouts() {
        assert_eq!(written(|o| o.write_bool(true)), [0xFE]);
        assert_eq!(written(|o| o.write_bool(false)), [0xFD]);
        assert_eq!(written(|o| o.write_i8(-1)), [0xFF, 0xFF]);
        assert_eq!(written(|o| o.write_i16(0x0102)), [0xFB, 0x01, 0x02]);
        assert_eq!(written(|o| o.write_char('A')), [0xFC, 0, 0, 0, 0x41]);
        assert_eq!(
            written(|o| o.write_i64(-2)),
            [0xF9, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]
        );
        assert_eq!(written(|o| o.write_f32(1.0)), [0xF8, 0x3F, 0x80, 0, 0]);
        assert_eq!(written(|o| o.write_str("hé")), [0xF6, 0, 0, 0, 3, b'h', 0xC3, 0xA9]);
    }

    #[test]
    fn invalid_payloads() {
        let context = SerialContext::new();

        let surrogate = [0xFC, 0, 0, 0xD8, 0x00];
        let mut input = Input::new(&context, &surrogate[..]);
        assert!(matches!(input.read_char(), Err(SerialError::InvalidData(_))));

        let broken = [0xF6, 0, 0, 0, 1, 0xFF];
        let mut input = Input::new(&context, &broken[..]);
        assert!(matches!(input.read_string(), Err(SerialError::InvalidData(_))));
    }
}

use bitflags::bitflags;

use crate::SerialError;

// -----------------------------------------------------------------------------
// WireTag

bitflags! {
    /// Flags of a non-negative tag byte, framing one object.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WireTag: u8 {
        /// The value is absent; no further bytes.
        const NULL        = 1 << 0;
        /// A 4-byte id of an already registered object follows.
        const BACKREF     = 1 << 1;
        /// A 4-byte id newly assigned to this object follows.
        const SHARED      = 1 << 2;
        /// The class is known to the reader and not encoded.
        const UNTYPED     = 1 << 3;
        /// The encoded class name is added to the class dictionary.
        const CLASS_SHARE = 1 << 4;
        /// The class is a 4-byte class id instead of a name.
        const CLASS_REF   = 1 << 6;
    }
}

// -----------------------------------------------------------------------------
// Sentinel

/// Negative tag bytes, one per inline primitive kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Sentinel {
    Byte = -1,
    True = -2,
    False = -3,
    Char = -4,
    Short = -5,
    Int = -6,
    Long = -7,
    Float = -8,
    Double = -9,
    String = -10,
}

impl Sentinel {
    /// The raw tag byte.
    #[inline]
    pub const fn byte(self) -> u8 {
        self as i8 as u8
    }

    /// The sentinel for a tag byte, if it is one.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte as i8 {
            -1 => Self::Byte,
            -2 => Self::True,
            -3 => Self::False,
            -4 => Self::Char,
            -5 => Self::Short,
            -6 => Self::Int,
            -7 => Self::Long,
            -8 => Self::Float,
            -9 => Self::Double,
            -10 => Self::String,
            _ => return None,
        })
    }

    /// A short name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::True | Self::False => "bool",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

// -----------------------------------------------------------------------------
// Tag

/// A decoded tag byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// An inline primitive follows.
    Primitive(Sentinel),
    /// Object framing follows.
    Object(WireTag),
}

impl Tag {
    /// Splits the byte by sign into a primitive sentinel or object flags.
    pub fn decode(byte: u8) -> Result<Self, SerialError> {
        if (byte as i8) < 0 {
            return match Sentinel::from_byte(byte) {
                Some(sentinel) => Ok(Self::Primitive(sentinel)),
                None => Err(SerialError::UnexpectedTag {
                    expected: "a primitive sentinel",
                    found: byte,
                }),
            };
        }
        match WireTag::from_bits(byte) {
            Some(flags) => Ok(Self::Object(flags)),
            None => Err(SerialError::UnexpectedTag {
                expected: "object flags",
                found: byte,
            }),
        }
    }

    /// The encoded byte.
    #[inline]
    pub const fn byte(self) -> u8 {
        match self {
            Self::Primitive(sentinel) => sentinel.byte(),
            Self::Object(flags) => flags.bits(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Sentinel, Tag, WireTag};
    use crate::SerialError;

    #[test]
    fn sentinels_are_negative_and_distinct() {
        let all = [
            Sentinel::Byte,
            Sentinel::True,
            Sentinel::False,
            Sentinel::Char,
            Sentinel::Short,
            Sentinel::Int,
            Sentinel::Long,
            Sentinel::Float,
            Sentinel::Double,
            Sentinel::String,
        ];
        for (i, a) in all.iter().enumerate() {
            assert!((a.byte() as i8) < 0);
            assert_eq!(Sentinel::from_byte(a.byte()), Some(*a));
            for b in &all[i + 1..] {
                assert_ne!(a.byte(), b.byte());
            }
        }
    }

    #[test]
    fn flag_values() {
        assert_eq!(WireTag::NULL.bits(), 0x01);
        assert_eq!(WireTag::BACKREF.bits(), 0x02);
        assert_eq!(WireTag::SHARED.bits(), 0x04);
        assert_eq!(WireTag::UNTYPED.bits(), 0x08);
        assert_eq!(WireTag::CLASS_SHARE.bits(), 0x10);
        assert_eq!(WireTag::CLASS_REF.bits(), 0x40);
    }

    #[test]
    fn decode_by_sign() {
        assert_eq!(Tag::decode(0xFA).ok(), Some(Tag::Primitive(Sentinel::Int)));
        assert_eq!(
            Tag::decode(0x0C).ok(),
            Some(Tag::Object(WireTag::SHARED | WireTag::UNTYPED))
        );
        assert!(matches!(
            Tag::decode(0x20),
            Err(SerialError::UnexpectedTag { found: 0x20, .. })
        ));
        assert!(matches!(
            Tag::decode(0x80),
            Err(SerialError::UnexpectedTag { found: 0x80, .. })
        ));
    }
}

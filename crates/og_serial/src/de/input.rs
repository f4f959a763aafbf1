use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;
use std::io::{self, BufReader, Read};

use crate::context::{Bundle, SerialContext};
use crate::de::IdTable;
use crate::info::TypePath;
use crate::object::SharedCell;
use crate::registry::GetTypeMeta;
use crate::strategy::{PREALLOC_LIMIT, Strategy};
use crate::wire::{Primitive, PrimitiveKind, Sentinel, Tag, WireTag};
use crate::{Object, Serial, SerialError, Shared};

/// The result of reading one framed unit.
enum Node {
    Null,
    Owned(Box<dyn Object>),
    Shared(SharedCell),
}

const NON_NULL: SerialError = SerialError::UnexpectedTag {
    expected: "a non-null value",
    found: WireTag::NULL.bits(),
};

fn owned_expected(cell: &SharedCell) -> SerialError {
    SerialError::TypeMismatch {
        expected: "an owned value",
        found: cell.type_path(),
    }
}

// -----------------------------------------------------------------------------
// Input

/// Reads an object graph from a byte source.
///
/// Mirrors [`Output`] call by call. An `Input` is confined to one thread
/// and one stream.
///
/// ```
/// use og_serial::{Input, SerialContext};
///
/// let context = SerialContext::new();
/// let bytes = [0xFA, 0x00, 0x00, 0x01, 0xC2];
/// let mut input = Input::new(&context, &bytes[..]);
///
/// assert_eq!(input.read_i32().unwrap(), 450);
/// ```
///
/// [`Output`]: crate::Output
pub struct Input<'a> {
    source: BufReader<Box<dyn Read + 'a>>,
    context: &'a SerialContext,
    peeked: Option<u8>,
    ids: IdTable,
    classes: Vec<(TypeId, &'static str)>,
    bundle: Bundle,
}

impl<'a> Input<'a> {
    pub fn new(context: &'a SerialContext, source: impl Read + 'a) -> Self {
        Self {
            source: BufReader::new(Box::new(source)),
            context,
            peeked: None,
            ids: IdTable::default(),
            classes: Vec::new(),
            bundle: Bundle::new(),
        }
    }

    #[inline]
    pub fn context(&self) -> &'a SerialContext {
        self.context
    }

    /// Properties of this stream, handed to custom constructors.
    #[inline]
    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    #[inline]
    pub fn bundle_mut(&mut self) -> &mut Bundle {
        &mut self.bundle
    }

    // -------------------------------------------------------------------------
    // Raw

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), SerialError> {
        let mut start = 0;
        if let Some(first) = buf.first_mut()
            && let Some(byte) = self.peeked.take()
        {
            *first = byte;
            start = 1;
        }
        self.source
            .read_exact(&mut buf[start..])
            .map_err(SerialError::io)
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerialError> {
        let mut bytes = [0; N];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads exactly `len` bytes.
    ///
    /// The buffer grows with the bytes actually read, so a corrupt length
    /// fails at the end of the stream instead of allocating up front.
    pub fn read_raw(&mut self, len: usize) -> Result<Vec<u8>, SerialError> {
        let mut bytes = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        if len > 0
            && let Some(byte) = self.peeked.take()
        {
            bytes.push(byte);
        }
        let rest = (len - bytes.len()) as u64;
        self.source
            .by_ref()
            .take(rest)
            .read_to_end(&mut bytes)
            .map_err(SerialError::io)?;
        if bytes.len() != len {
            return Err(SerialError::io(io::Error::from(io::ErrorKind::UnexpectedEof)));
        }
        Ok(bytes)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, SerialError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Reads a 4-byte count or byte length.
    #[inline]
    pub fn read_len(&mut self) -> Result<usize, SerialError> {
        Ok(self.read_u32()? as usize)
    }

    fn next_byte(&mut self) -> Result<u8, SerialError> {
        if let Some(byte) = self.peeked.take() {
            return Ok(byte);
        }
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    fn peek_byte(&mut self) -> Result<u8, SerialError> {
        if let Some(byte) = self.peeked {
            return Ok(byte);
        }
        let byte = self.next_byte()?;
        self.peeked = Some(byte);
        Ok(byte)
    }

    // -------------------------------------------------------------------------
    // Tagged primitives

    /// Reads a sentinel and the raw value of `P`.
    pub fn read_primitive<P: Primitive>(&mut self) -> Result<P, SerialError> {
        let byte = self.next_byte()?;
        match Tag::decode(byte)? {
            Tag::Primitive(sentinel) => P::decode_tagged(sentinel, self),
            Tag::Object(_) => Err(SerialError::UnexpectedTag {
                expected: type_name::<P>(),
                found: byte,
            }),
        }
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_char(&mut self) -> Result<char, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64, SerialError> {
        self.read_primitive()
    }

    #[inline]
    pub fn read_string(&mut self) -> Result<String, SerialError> {
        self.read_primitive()
    }

    fn read_primitive_object(&mut self, sentinel: Sentinel) -> Result<Box<dyn Object>, SerialError> {
        macro_rules! decode {
            ($ty:ty) => {
                Box::new(<$ty>::decode_tagged(sentinel, self)?) as Box<dyn Object>
            };
        }

        Ok(match PrimitiveKind::of_sentinel(sentinel) {
            PrimitiveKind::Byte => decode!(i8),
            PrimitiveKind::Bool => decode!(bool),
            PrimitiveKind::Char => decode!(char),
            PrimitiveKind::Short => decode!(i16),
            PrimitiveKind::Int => decode!(i32),
            PrimitiveKind::Long => decode!(i64),
            PrimitiveKind::Float => decode!(f32),
            PrimitiveKind::Double => decode!(f64),
            PrimitiveKind::String => decode!(String),
        })
    }

    // -------------------------------------------------------------------------
    // Objects

    /// Whether the next tag is a null marker. Does not consume it.
    pub fn is_null_next(&mut self) -> Result<bool, SerialError> {
        Ok(self.peek_byte()? == WireTag::NULL.bits())
    }

    pub fn read_null(&mut self) -> Result<(), SerialError> {
        let byte = self.next_byte()?;
        if byte != WireTag::NULL.bits() {
            return Err(SerialError::UnexpectedTag {
                expected: "null",
                found: byte,
            });
        }
        Ok(())
    }

    /// Reads a value framed by its slot type.
    #[inline]
    pub fn read_value<T: Serial>(&mut self) -> Result<T, SerialError> {
        T::read_slot(self)
    }

    /// Reads an owned value written with its class.
    pub fn read_object(&mut self) -> Result<Box<dyn Object>, SerialError> {
        match self.read_node(None)? {
            Node::Owned(value) => Ok(value),
            Node::Null => Err(NON_NULL),
            Node::Shared(cell) => Err(owned_expected(&cell)),
        }
    }

    pub fn read_optional_object(&mut self) -> Result<Option<Box<dyn Object>>, SerialError> {
        match self.read_node(None)? {
            Node::Owned(value) => Ok(Some(value)),
            Node::Null => Ok(None),
            Node::Shared(cell) => Err(owned_expected(&cell)),
        }
    }

    /// Reads an owned value with its class and takes it as a `T`.
    pub fn read_object_as<T: Object + TypePath>(&mut self) -> Result<T, SerialError> {
        self.read_object()?.try_take::<T>()
    }

    /// Reads an owned value written without its class.
    pub fn read_untyped<T: Object + GetTypeMeta>(&mut self) -> Result<T, SerialError> {
        self.context.ensure_registered::<T>();
        match self.read_node(Some((TypeId::of::<T>(), T::type_path())))? {
            Node::Owned(value) => value.try_take::<T>(),
            Node::Null => Err(NON_NULL),
            Node::Shared(cell) => Err(owned_expected(&cell)),
        }
    }

    /// Reads a value written without its class into `target`.
    ///
    /// In-place strategies fill `target`; value strategies replace it.
    pub fn read_inplace(&mut self, target: &mut dyn Object) -> Result<(), SerialError> {
        let expected = target.object_type_path();
        let mismatch = |value: Box<dyn Object>| SerialError::TypeMismatch {
            expected,
            found: (*value).object_type_path(),
        };

        let byte = self.next_byte()?;
        let flags = match Tag::decode(byte)? {
            Tag::Primitive(sentinel) => {
                let value = self.read_primitive_object(sentinel)?;
                return target.set(value).map_err(mismatch);
            }
            Tag::Object(flags) => flags,
        };
        if flags.intersects(WireTag::NULL | WireTag::BACKREF | WireTag::SHARED) {
            return Err(SerialError::UnexpectedTag {
                expected: "an owned value",
                found: byte,
            });
        }
        if let Some((_, type_path)) = self.read_class(flags)?
            && type_path != expected
        {
            return Err(SerialError::TypeMismatch {
                expected,
                found: type_path,
            });
        }

        match self.context.strategy_for(&*target)? {
            Strategy::Inplace(serializer) => serializer.deserialize_into(target, self),
            Strategy::Value(serializer) => {
                let value = serializer.deserialize(self)?;
                target.set(value).map_err(mismatch)
            }
        }
    }

    /// Reads a node written with its class.
    ///
    /// A back-reference yields the node read before.
    pub fn read_shared(&mut self) -> Result<Shared<dyn Object>, SerialError> {
        match self.read_node(None)? {
            Node::Shared(cell) => Ok(cell.to_dyn()),
            Node::Owned(value) => Ok(value.into_shared().to_dyn()),
            Node::Null => Err(NON_NULL),
        }
    }

    /// Reads a node written without its class.
    pub fn read_shared_untyped<T: Object + GetTypeMeta>(&mut self) -> Result<Shared<T>, SerialError> {
        self.context.ensure_registered::<T>();
        match self.read_node(Some((TypeId::of::<T>(), T::type_path())))? {
            Node::Shared(cell) => cell.downcast::<T>().ok_or(SerialError::TypeMismatch {
                expected: T::type_path(),
                found: cell.type_path(),
            }),
            Node::Owned(value) => Ok(Shared::new(value.try_take::<T>()?)),
            Node::Null => Err(NON_NULL),
        }
    }

    // -------------------------------------------------------------------------
    // Framing

    /// The class after the tag, `None` for untyped values.
    fn read_class(&mut self, flags: WireTag) -> Result<Option<(TypeId, &'static str)>, SerialError> {
        if flags.contains(WireTag::UNTYPED) {
            return Ok(None);
        }
        if flags.contains(WireTag::CLASS_REF) {
            let class_id = self.read_u32()?;
            return match self.classes.get(class_id as usize) {
                Some(class) => Ok(Some(*class)),
                None => Err(SerialError::invalid(format_args!("unknown class id {class_id}"))),
            };
        }

        let len = self.read_len()?;
        let name = String::from_utf8(self.read_raw(len)?)
            .map_err(|e| SerialError::invalid(e.utf8_error()))?;
        let class = self.context.resolve_class(&name)?;
        if flags.contains(WireTag::CLASS_SHARE) {
            self.classes.push(class);
        }
        Ok(Some(class))
    }

    fn read_node(&mut self, expected: Option<(TypeId, &'static str)>) -> Result<Node, SerialError> {
        let byte = self.next_byte()?;
        let flags = match Tag::decode(byte)? {
            Tag::Primitive(sentinel) => return self.read_primitive_object(sentinel).map(Node::Owned),
            Tag::Object(flags) => flags,
        };

        if flags.contains(WireTag::NULL) {
            return Ok(Node::Null);
        }
        if flags.contains(WireTag::BACKREF) {
            let id = self.read_u32()?;
            return self
                .ids
                .get(id)
                .map(Node::Shared)
                .ok_or(SerialError::UnresolvedReference(id));
        }

        let id = if flags.contains(WireTag::SHARED) {
            let id = self.read_u32()?;
            self.ids.announce(id)?;
            Some(id)
        } else {
            None
        };

        let (type_id, type_path) = match self.read_class(flags)? {
            Some(class) => class,
            None => expected.ok_or(SerialError::UntypedWithoutClass)?,
        };

        match self.context.resolve_id(type_id, type_path)? {
            Strategy::Inplace(serializer) => {
                let mut value = self.context.instantiate(type_id, type_path, &self.bundle)?;
                let Some(id) = id else {
                    serializer.deserialize_into(&mut *value, self)?;
                    return Ok(Node::Owned(value));
                };
                let cell = value.into_shared();
                self.ids.register(id, cell.clone());
                {
                    let mut target = cell.object().borrow_mut();
                    serializer.deserialize_into(&mut *target, self)?;
                }
                Ok(Node::Shared(cell))
            }
            Strategy::Value(serializer) => {
                let value = serializer.deserialize(self)?;
                let Some(id) = id else {
                    return Ok(Node::Owned(value));
                };
                let cell = value.into_shared();
                self.ids.register(id, cell.clone());
                Ok(Node::Shared(cell))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Stream

    /// Clears the id table and class dictionary and drops the source.
    pub fn close(mut self) {
        self.ids.clear();
        self.classes.clear();
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("peeked", &self.peeked)
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

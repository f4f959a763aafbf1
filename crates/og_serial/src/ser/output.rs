use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use std::io::{BufWriter, Write};

use og_utils::hash::HashMap;

use crate::context::{SerialConfig, SerialContext};
use crate::info::TypeInfo;
use crate::ser::ReferenceCache;
use crate::strategy::Strategy;
use crate::wire::{Primitive, PrimitiveKind, Sentinel, WireTag};
use crate::{Object, Serial, SerialError, Shared};

// -----------------------------------------------------------------------------
// Output

/// Writes an object graph to a byte sink.
///
/// An `Output` is confined to one thread and one stream. Its reference
/// cache and class dictionary live until [`close`](Self::close).
///
/// ```
/// use og_serial::{Output, SerialContext};
///
/// let context = SerialContext::new();
/// let mut bytes = Vec::new();
/// let mut output = Output::new(&context, &mut bytes);
/// output.write_i32(450).unwrap();
/// output.close().unwrap();
///
/// assert_eq!(bytes, [0xFA, 0x00, 0x00, 0x01, 0xC2]);
/// ```
pub struct Output<'a> {
    sink: BufWriter<Box<dyn Write + 'a>>,
    context: &'a SerialContext,
    config: SerialConfig,
    cache: ReferenceCache,
    class_ids: HashMap<&'static str, u32>,
}

enum Class {
    Untyped,
    Ref(u32),
    Name(&'static str),
}

impl<'a> Output<'a> {
    pub fn new(context: &'a SerialContext, sink: impl Write + 'a) -> Self {
        let config = *context.config();
        Self {
            sink: BufWriter::new(Box::new(sink)),
            context,
            config,
            cache: ReferenceCache::new(config.sharing),
            class_ids: HashMap::default(),
        }
    }

    #[inline]
    pub fn context(&self) -> &'a SerialContext {
        self.context
    }

    #[inline]
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Raw

    /// Writes bytes as they are.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.sink.write_all(bytes).map_err(SerialError::io)
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<(), SerialError> {
        self.write_raw(&value.to_be_bytes())
    }

    /// Writes a count or byte length as a 4-byte big-endian integer.
    pub fn write_len(&mut self, len: usize) -> Result<(), SerialError> {
        let len = u32::try_from(len)
            .map_err(|_| SerialError::invalid(format_args!("length {len} does not fit in 4 bytes")))?;
        self.write_u32(len)
    }

    #[inline]
    fn write_tag(&mut self, tag: WireTag) -> Result<(), SerialError> {
        self.write_raw(&[tag.bits()])
    }

    // -------------------------------------------------------------------------
    // Tagged primitives

    /// Writes the sentinel of `value` followed by its raw encoding.
    #[inline]
    pub fn write_primitive<P: Primitive>(&mut self, value: &P) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_char(&mut self, value: char) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_f32(&mut self, value: f32) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) -> Result<(), SerialError> {
        value.encode_tagged(self)
    }

    pub fn write_str(&mut self, value: &str) -> Result<(), SerialError> {
        self.write_raw(&[Sentinel::String.byte()])?;
        self.write_len(value.len())?;
        self.write_raw(value.as_bytes())
    }

    // -------------------------------------------------------------------------
    // Objects

    #[inline]
    pub fn write_null(&mut self) -> Result<(), SerialError> {
        self.write_tag(WireTag::NULL)
    }

    /// Writes `value` framed by its slot type.
    #[inline]
    pub fn write_value<T: Serial>(&mut self, value: &T) -> Result<(), SerialError> {
        value.write_slot(self)
    }

    /// Writes an owned value with its class.
    ///
    /// Primitives are written inline after their sentinel.
    #[inline]
    pub fn write_object(&mut self, value: &dyn Object) -> Result<(), SerialError> {
        self.write_owned(value, false)
    }

    /// Writes an owned value whose class the reader already knows.
    #[inline]
    pub fn write_untyped(&mut self, value: &dyn Object) -> Result<(), SerialError> {
        self.write_owned(value, true)
    }

    /// Writes a value with its class, or null.
    pub fn write_optional(&mut self, value: Option<&dyn Object>) -> Result<(), SerialError> {
        match value {
            Some(value) => self.write_object(value),
            None => self.write_null(),
        }
    }

    /// Writes a node with its class.
    ///
    /// When the context shares nodes, a node already written becomes a
    /// back-reference.
    #[inline]
    pub fn write_shared(&mut self, node: &Shared<dyn Object>) -> Result<(), SerialError> {
        self.write_node(node, false)
    }

    /// Writes a node whose class the reader already knows.
    #[inline]
    pub fn write_shared_untyped<T: Object>(&mut self, node: &Shared<T>) -> Result<(), SerialError> {
        self.write_node(&node.to_dyn(), true)
    }

    fn write_owned(&mut self, value: &dyn Object, untyped: bool) -> Result<(), SerialError> {
        if let TypeInfo::Primitive(info) = value.object_info() {
            return self.write_primitive_object(info.kind(), value);
        }
        let strategy = self.context.strategy_for(value)?;
        self.write_frame(value, &strategy, untyped, None)
    }

    fn write_node(&mut self, node: &Shared<dyn Object>, untyped: bool) -> Result<(), SerialError> {
        if let Some(id) = self.cache.lookup(node) {
            self.write_tag(WireTag::BACKREF)?;
            return self.write_u32(id);
        }

        let value = node
            .as_rc()
            .try_borrow()
            .map_err(|_| SerialError::custom("cannot write a node that is mutably borrowed"))?;
        if let TypeInfo::Primitive(info) = value.object_info() {
            return self.write_primitive_object(info.kind(), &*value);
        }

        let strategy = self.context.strategy_for(&*value)?;
        let id = self.cache.register(node);
        self.write_frame(&*value, &strategy, untyped, id)
    }

    fn write_frame(
        &mut self,
        value: &dyn Object,
        strategy: &Strategy,
        untyped: bool,
        id: Option<u32>,
    ) -> Result<(), SerialError> {
        let mut tag = WireTag::empty();
        if id.is_some() {
            tag |= WireTag::SHARED;
        }

        let class = if untyped {
            tag |= WireTag::UNTYPED;
            Class::Untyped
        } else {
            let type_path = value.object_type_path();
            match self.class_ids.get(type_path) {
                Some(&class_id) => {
                    tag |= WireTag::CLASS_REF;
                    Class::Ref(class_id)
                }
                None => {
                    if self.config.share_class_names {
                        tag |= WireTag::CLASS_SHARE;
                        let class_id = self.class_ids.len() as u32;
                        self.class_ids.insert(type_path, class_id);
                    }
                    Class::Name(type_path)
                }
            }
        };

        self.write_tag(tag)?;
        if let Some(id) = id {
            self.write_u32(id)?;
        }
        match class {
            Class::Untyped => {}
            Class::Ref(class_id) => self.write_u32(class_id)?,
            Class::Name(type_path) => {
                self.write_len(type_path.len())?;
                self.write_raw(type_path.as_bytes())?;
            }
        }
        strategy.serialize(value, self)
    }

    fn write_primitive_object(&mut self, kind: PrimitiveKind, value: &dyn Object) -> Result<(), SerialError> {
        macro_rules! encode {
            ($ty:ty) => {
                value.try_downcast_ref::<$ty>()?.encode_tagged(self)
            };
        }

        match kind {
            PrimitiveKind::Byte => encode!(i8),
            PrimitiveKind::Bool => encode!(bool),
            PrimitiveKind::Char => encode!(char),
            PrimitiveKind::Short => encode!(i16),
            PrimitiveKind::Int => encode!(i32),
            PrimitiveKind::Long => encode!(i64),
            PrimitiveKind::Float => encode!(f32),
            PrimitiveKind::Double => encode!(f64),
            PrimitiveKind::String => encode!(String),
        }
    }

    // -------------------------------------------------------------------------
    // Stream

    pub fn flush(&mut self) -> Result<(), SerialError> {
        self.sink.flush().map_err(SerialError::io)
    }

    /// Flushes the sink, clears the caches and drops the sink.
    pub fn close(mut self) -> Result<(), SerialError> {
        self.flush()?;
        self.cache.clear();
        self.class_ids.clear();
        Ok(())
    }
}

impl fmt::Debug for Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("config", &self.config)
            .field("classes", &self.class_ids.len())
            .finish_non_exhaustive()
    }
}

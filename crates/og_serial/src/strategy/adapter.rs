use alloc::boxed::Box;
use alloc::vec::Vec;
use core::marker::PhantomData;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::info::TypePath;
use crate::strategy::{InplaceSerializer, Serializer};
use crate::{Input, Object, Output, Serial, SerialError};

// -----------------------------------------------------------------------------
// Property

type PropertyWriteFn<T> = Box<dyn Fn(&T, &mut Output<'_>) -> Result<(), SerialError> + Send + Sync>;
type PropertyReadFn<T> = Box<dyn Fn(&mut T, &mut Input<'_>) -> Result<(), SerialError> + Send + Sync>;

/// A named, mutable view of part of `T`.
///
/// The getter and setter do not have to map to a single field. A setter may
/// update several fields of the target.
pub struct Property<T> {
    name: &'static str,
    transient: bool,
    write: PropertyWriteFn<T>,
    read: PropertyReadFn<T>,
}

impl<T: 'static> Property<T> {
    /// A property of slot type `V`.
    pub fn new<V: Serial>(
        name: &'static str,
        get: impl Fn(&T) -> V + Send + Sync + 'static,
        set: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            transient: false,
            write: Box::new(move |target, output| get(target).write_slot(output)),
            read: Box::new(move |target, input| {
                set(target, V::read_slot(input)?);
                Ok(())
            }),
        }
    }

    /// Excludes the property from the stream.
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn is_transient(&self) -> bool {
        self.transient
    }
}

// -----------------------------------------------------------------------------
// Adapter

/// Describes a type through properties instead of its fields.
///
/// Declared with `#[serial(adapter = A)]` on the target, or installed from a
/// [`SerialModule`] for foreign types.
///
/// ```
/// use og_serial::strategy::{Adapter, Property};
/// # use og_serial::derive::Serial;
///
/// #[derive(Serial, Default)]
/// #[serial(default, adapter = RangeAdapter)]
/// struct Range { start: i32, len: i32 }
///
/// struct RangeAdapter;
///
/// impl Adapter for RangeAdapter {
///     type Target = Range;
///
///     fn properties() -> Vec<Property<Range>> {
///         vec![
///             Property::new("start", |r: &Range| r.start, |r: &mut Range, v| r.start = v),
///             Property::new("end", |r: &Range| r.start + r.len, |r: &mut Range, v: i32| r.len = v - r.start),
///         ]
///     }
/// }
/// ```
///
/// [`SerialModule`]: crate::context::SerialModule
pub trait Adapter: Send + Sync + 'static {
    type Target: Object + TypePath;

    fn properties() -> Vec<Property<Self::Target>>;
}

/// Walks the properties of an [`Adapter`] in name order, skipping transient
/// ones.
pub struct AdapterSerializer<A: Adapter> {
    properties: Vec<Property<A::Target>>,
    _marker: PhantomData<fn() -> A>,
}

impl<A: Adapter> AdapterSerializer<A> {
    pub fn new() -> Self {
        let mut properties: Vec<_> = A::properties()
            .into_iter()
            .filter(|property| !property.transient)
            .collect();
        properties.sort_by(|a, b| a.name.cmp(b.name));
        Self {
            properties,
            _marker: PhantomData,
        }
    }
}

impl<A: Adapter> Default for AdapterSerializer<A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Adapter> Serializer for AdapterSerializer<A> {
    type Target = A::Target;

    fn serialize(&self, value: &A::Target, output: &mut Output<'_>) -> Result<(), SerialError> {
        for property in &self.properties {
            (property.write)(value, output)?;
        }
        Ok(())
    }
}

impl<A: Adapter> InplaceSerializer for AdapterSerializer<A> {
    fn deserialize_into(&self, target: &mut A::Target, input: &mut Input<'_>) -> Result<(), SerialError> {
        for property in &self.properties {
            (property.read)(target, input)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// SystemTimeAdapter

/// `SystemTime` as signed nanoseconds since the Unix epoch, in property
/// `unix_nanos`.
///
/// Times beyond the `i64` range saturate.
pub struct SystemTimeAdapter;

fn unix_nanos(time: &SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_nanos()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_nanos()).map_or(i64::MIN, |nanos| -nanos),
    }
}

fn from_unix_nanos(nanos: i64) -> SystemTime {
    let offset = Duration::from_nanos(nanos.unsigned_abs());
    let time = if nanos >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    };
    time.unwrap_or(UNIX_EPOCH)
}

impl Adapter for SystemTimeAdapter {
    type Target = SystemTime;

    fn properties() -> Vec<Property<SystemTime>> {
        alloc::vec![Property::new(
            "unix_nanos",
            unix_nanos,
            |time: &mut SystemTime, nanos| *time = from_unix_nanos(nanos),
        )]
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::{from_unix_nanos, unix_nanos};

    #[test]
    fn nanos_are_signed() {
        let after = UNIX_EPOCH + Duration::from_nanos(1_500);
        let before = UNIX_EPOCH - Duration::from_nanos(2_000);
        assert_eq!(unix_nanos(&after), 1_500);
        assert_eq!(unix_nanos(&before), -2_000);
        assert_eq!(from_unix_nanos(-2_000), before);
        assert_eq!(from_unix_nanos(0), UNIX_EPOCH);
    }
}

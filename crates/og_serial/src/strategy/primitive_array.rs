use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::strategy::{InplaceSerializer, Serializer, Strategy};
use crate::wire::Primitive;
use crate::{Input, Output, Serial, SerialError};

/// `Vec<P>` for fixed-width primitives: a 4-byte count followed by the raw
/// big-endian values, without a tag per item.
pub struct PrimitiveArraySerializer<P>(PhantomData<fn() -> P>);

impl<P: Primitive + Serial> PrimitiveArraySerializer<P> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    pub fn strategy() -> Strategy {
        Strategy::inplace(Self::new())
    }
}

impl<P: Primitive + Serial> Serializer for PrimitiveArraySerializer<P> {
    type Target = Vec<P>;

    fn serialize(&self, value: &Vec<P>, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_len(value.len())?;
        for item in value {
            item.encode(output)?;
        }
        Ok(())
    }
}

impl<P: Primitive + Serial> InplaceSerializer for PrimitiveArraySerializer<P> {
    fn deserialize_into(&self, target: &mut Vec<P>, input: &mut Input<'_>) -> Result<(), SerialError> {
        let len = input.read_len()?;
        target.clear();
        target.reserve(len.min(super::PREALLOC_LIMIT));
        for _ in 0..len {
            target.push(P::decode(input)?);
        }
        Ok(())
    }
}

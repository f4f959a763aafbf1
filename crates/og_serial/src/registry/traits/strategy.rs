use crate::info::Typed;
use crate::registry::FromType;
use crate::strategy::{Adapter, Companion, SelfSerial, Strategy};
use crate::strategy::{AdapterSerializer, SelfSerialSerializer};

macro_rules! define_strategy_trait {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name {
            strategy: fn() -> Strategy,
        }

        impl $name {
            #[inline]
            pub const fn new(strategy: fn() -> Strategy) -> Self {
                Self { strategy }
            }

            #[inline]
            pub fn strategy(&self) -> Strategy {
                (self.strategy)()
            }
        }
    };
}

define_strategy_trait! {
    /// The type encodes itself through [`SelfSerial`].
    TypeTraitSelfSerial
}

define_strategy_trait! {
    /// A strategy declared with `#[serial(with = ...)]`.
    TypeTraitWith
}

define_strategy_trait! {
    /// An [`Adapter`] declared with `#[serial(adapter = ...)]`.
    TypeTraitAdapter
}

define_strategy_trait! {
    /// The strategy returned by [`Companion::companion`].
    TypeTraitCompanion
}

impl<T: Typed + SelfSerial> FromType<T> for TypeTraitSelfSerial {
    fn from_type() -> Self {
        Self::new(|| Strategy::inplace(SelfSerialSerializer::<T>::new()))
    }
}

impl<T: Typed + Companion> FromType<T> for TypeTraitCompanion {
    fn from_type() -> Self {
        Self::new(T::companion)
    }
}

impl TypeTraitAdapter {
    /// The trait for adapter `A`.
    #[inline]
    pub fn of<A: Adapter>() -> Self {
        Self::new(|| Strategy::inplace(AdapterSerializer::<A>::new()))
    }
}

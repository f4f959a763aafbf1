use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::derive::Serial;
use crate::strategy::{Adapter, Companion, Compound, InplaceSerializer, Property, Serializer, Strategy, compound};
use crate::{Input, Object, Output, SerialError, Shared};

#[derive(Serial, Default, Debug, Clone, PartialEq, Eq, Hash)]
#[serial(default, partial_eq, hash, debug)]
pub(crate) struct Engine {
    pub name: String,
    pub ps: i32,
}

impl Engine {
    pub fn new(name: &str, ps: i32) -> Self {
        Self {
            name: name.into(),
            ps,
        }
    }
}

#[derive(Serial, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serial(default, partial_eq, hash, debug)]
pub(crate) enum Country {
    #[default]
    DE,
    FR,
    IT,
}

#[derive(Serial, Default, Debug, Clone, PartialEq)]
#[serial(default, partial_eq, debug)]
pub(crate) struct Brand {
    pub name: String,
    pub founded: i32,
    pub country: Country,
}

#[derive(Serial, Default, Debug, PartialEq)]
#[serial(default, partial_eq, debug)]
pub(crate) struct Car {
    pub engine: Engine,
    pub brand: Brand,
}

pub(crate) fn ferrari() -> Car {
    Car {
        engine: Engine::new("V8", 450),
        brand: Brand {
            name: "Ferrari".into(),
            founded: 1947,
            country: Country::FR,
        },
    }
}

/// Two slots that may hold the same node.
#[derive(Serial, Default)]
#[serial(default)]
pub(crate) struct Garage {
    pub first: Shared<Engine>,
    pub second: Shared<Engine>,
}

/// Field-walked, so it may reference itself.
#[derive(Serial, Default)]
#[serial(default)]
pub(crate) struct Person {
    pub name: String,
    pub friend: Option<Shared<Person>>,
}

/// Hashed and compared by value, and may reference itself.
#[derive(Serial, Default, Debug, PartialEq, Eq, Hash)]
#[serial(default, partial_eq, hash, debug)]
pub(crate) struct Ring {
    pub label: String,
    pub next: Option<Shared<Ring>>,
}

/// Built from its field values, so it cannot reference itself.
#[derive(Serial)]
#[serial(data)]
pub(crate) struct Link {
    pub label: String,
    pub next: Option<Shared<Link>>,
}

#[derive(Serial, Debug, PartialEq)]
#[serial(data, partial_eq, debug)]
pub(crate) struct Point {
    pub x: i32,
    pub y: i32,
    #[serial(transient)]
    pub label: String,
}

/// No zero-argument constructor.
#[derive(Serial, Debug, PartialEq)]
#[serial(blank, partial_eq, debug)]
pub(crate) struct Ticket {
    pub seat: i16,
    pub holder: String,
}

/// Declares a strategy for another type.
#[derive(Serial, Default)]
#[serial(default, with = crate::strategy::PrimitiveArraySerializer::<i32>::strategy())]
pub(crate) struct Mismatched {
    pub value: i32,
}

// -----------------------------------------------------------------------------
// Adapter

#[derive(Serial, Default, Debug, PartialEq)]
#[serial(default, partial_eq, debug, adapter = TemperatureAdapter)]
pub(crate) struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

pub(crate) struct TemperatureAdapter;

impl Adapter for TemperatureAdapter {
    type Target = Temperature;

    fn properties() -> Vec<Property<Temperature>> {
        vec![
            Property::new(
                "fahrenheit",
                |t: &Temperature| t.fahrenheit,
                |t: &mut Temperature, v| t.fahrenheit = v,
            )
            .transient(),
            Property::new(
                "celsius",
                |t: &Temperature| t.celsius,
                |t: &mut Temperature, v: f64| {
                    t.celsius = v;
                    t.fahrenheit = v * 9.0 / 5.0 + 32.0;
                },
            ),
        ]
    }
}

// -----------------------------------------------------------------------------
// Companion

/// Three raw bytes.
#[derive(Serial, Default, Debug, PartialEq)]
#[serial(default, partial_eq, debug, companion)]
pub(crate) struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub(crate) struct RgbSerializer;

impl Serializer for RgbSerializer {
    type Target = Rgb;

    fn serialize(&self, value: &Rgb, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_raw(&[value.r, value.g, value.b])
    }
}

impl InplaceSerializer for RgbSerializer {
    fn deserialize_into(&self, target: &mut Rgb, input: &mut Input<'_>) -> Result<(), SerialError> {
        let [r, g, b] = input.read_array()?;
        *target = Rgb { r, g, b };
        Ok(())
    }
}

impl Companion for Rgb {
    fn companion() -> Strategy {
        Strategy::inplace(RgbSerializer)
    }
}

// -----------------------------------------------------------------------------
// Compound

#[derive(Serial, Default, Debug, PartialEq)]
#[serial(default, partial_eq, debug, with = compound::<Badge>())]
pub(crate) struct Badge {
    pub engine: Engine,
    pub country: Country,
}

impl Compound for Badge {
    fn components(&self) -> Vec<&dyn Object> {
        vec![&self.engine, &self.country]
    }

    fn components_mut(&mut self) -> Vec<&mut dyn Object> {
        vec![&mut self.engine, &mut self.country]
    }
}

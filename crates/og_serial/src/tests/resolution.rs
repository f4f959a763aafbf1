use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use std::time::UNIX_EPOCH;

use super::model::{Car, Country, Engine, Mismatched, Ticket, ferrari};
use super::{decode, encode};
use crate::context::{Bundle, SerialModule};
use crate::derive::Serial;
use crate::info::TypePath;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::strategy::{PrimitiveArraySerializer, SelfSerial, Serializer, Strategy, ValueSerializer};
use crate::{Input, Output, SerialContext, SerialError};

/// Keeps only the name of an engine.
struct NameOnly;

impl Serializer for NameOnly {
    type Target = Engine;

    fn serialize(&self, value: &Engine, output: &mut Output<'_>) -> Result<(), SerialError> {
        output.write_str(&value.name)
    }
}

impl ValueSerializer for NameOnly {
    fn deserialize(&self, input: &mut Input<'_>) -> Result<Engine, SerialError> {
        Ok(Engine {
            name: input.read_string()?,
            ps: 0,
        })
    }
}

struct EngineModule;

impl SerialModule for EngineModule {
    fn strategy_for(&self, meta: &TypeMeta) -> Option<Strategy> {
        meta.ty().is::<Engine>().then(|| Strategy::value(NameOnly))
    }
}

#[derive(Serial, Default, Debug, PartialEq)]
#[serial(default, partial_eq, debug, self_describing)]
struct Packed {
    value: i32,
}

impl SelfSerial for Packed {
    fn serialize(&self, output: &mut Output<'_>) -> Result<(), SerialError> {
        let value = i16::try_from(self.value).map_err(SerialError::custom)?;
        output.write_raw(&value.to_be_bytes())
    }

    fn deserialize(&mut self, input: &mut Input<'_>) -> Result<(), SerialError> {
        self.value = i16::from_be_bytes(input.read_array()?).into();
        Ok(())
    }
}

#[test]
fn explicit_strategy_wins() {
    let context = SerialContext::builder()
        .strategy::<Engine>(Strategy::value(NameOnly))
        .build();

    let strategy = context.resolve_id(TypeId::of::<Engine>(), "").unwrap();
    assert!(strategy.name().ends_with("NameOnly"));
    assert!(!strategy.is_inplace());

    let bytes = encode(&context, |output| output.write_value(&Engine::new("V8", 450))).unwrap();
    let back: Engine = decode(&context, &bytes, |input| input.read_value()).unwrap();
    assert_eq!(back, Engine::new("V8", 0));
}

#[test]
fn modules_come_before_declarations() {
    let context = SerialContext::builder().module(EngineModule).build();

    let car = ferrari();
    let bytes = encode(&context, |output| output.write_value(&car)).unwrap();
    let back: Car = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(back.engine, Engine::new("V8", 0));
    assert_eq!(back.brand, car.brand);
}

#[test]
fn explicit_strategy_is_checked() {
    let context = SerialContext::builder()
        .strategy::<Engine>(PrimitiveArraySerializer::<i32>::strategy())
        .build();

    let result = encode(&context, |output| output.write_value(&Engine::new("V8", 450)));
    assert!(matches!(
        result,
        Err(SerialError::IncompatibleSerializer { type_path, .. }) if type_path == Engine::type_path()
    ));
}

#[test]
fn declared_strategy_is_checked_before_writing() {
    let context = SerialContext::new();

    let mut bytes = Vec::new();
    let mut output = Output::new(&context, &mut bytes);
    let result = output.write_value(&Mismatched { value: 1 });
    output.close().unwrap();

    assert!(matches!(result, Err(SerialError::IncompatibleSerializer { .. })));
    assert!(bytes.is_empty());
}

#[test]
fn self_describing() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&Packed { value: -2 })).unwrap();
    assert_eq!(bytes, [0x08, 0xFF, 0xFE]);

    let back: Packed = decode(&context, &bytes, |input| input.read_value()).unwrap();
    assert_eq!(back, Packed { value: -2 });

    let result = encode(&context, |output| output.write_value(&Packed { value: 1 << 20 }));
    assert!(matches!(result, Err(SerialError::Custom(_))));
}

#[test]
fn missing_default_module() {
    let context = SerialContext::builder().without_default_module().build();

    let result = encode(&context, |output| output.write_value(&UNIX_EPOCH));
    assert!(matches!(
        result,
        Err(SerialError::NoStrategy("std::time::SystemTime"))
    ));
}

// -----------------------------------------------------------------------------
// Instantiation

fn ticket() -> Ticket {
    Ticket {
        seat: 42,
        holder: String::from("Ada"),
    }
}

#[test]
fn no_constructor() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&ticket())).unwrap();
    let result = decode(&context, &bytes, |input| input.read_value::<Ticket>());

    assert!(matches!(
        result,
        Err(SerialError::NoConstructor(path)) if path == Ticket::type_path()
    ));
}

#[test]
fn blank_constructor_when_allowed() {
    let context = SerialContext::builder().allow_raw(true).build();

    let bytes = encode(&context, |output| output.write_value(&ticket())).unwrap();
    let back: Ticket = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(back, ticket());
}

#[test]
fn custom_constructor() {
    let context = SerialContext::builder()
        .constructor(|_: &Bundle| Ticket {
            seat: -1,
            holder: String::from("nobody"),
        })
        .build();

    let bytes = encode(&context, |output| output.write_value(&ticket())).unwrap();
    let back: Ticket = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(back, ticket());
}

/// The venue a stream of seats was issued for.
struct Venue(&'static str);

#[derive(Serial, Debug, PartialEq)]
#[serial(partial_eq, debug)]
struct Seat {
    row: i16,
    #[serial(transient)]
    venue: String,
}

#[test]
fn constructor_sees_the_stream_bundle() {
    let context = SerialContext::builder()
        .constructor(|bundle: &Bundle| Seat {
            row: 0,
            venue: String::from(bundle.get::<Venue>().map_or("unknown", |venue| venue.0)),
        })
        .build();

    let seat = Seat {
        row: 7,
        venue: String::from("Imola"),
    };
    let bytes = encode(&context, |output| output.write_value(&seat)).unwrap();

    let back = decode(&context, &bytes, |input| {
        input.bundle_mut().insert(Venue("Monza"));
        input.read_value::<Seat>()
    })
    .unwrap();
    assert_eq!(
        back,
        Seat {
            row: 7,
            venue: String::from("Monza"),
        }
    );

    let plain: Seat = decode(&context, &bytes, |input| input.read_value()).unwrap();
    assert_eq!(plain.venue, "unknown");
}

// -----------------------------------------------------------------------------
// Class names

#[test]
fn unknown_class() {
    let writer = SerialContext::new();
    writer.register::<Car>();
    let reader = SerialContext::new();

    let bytes = encode(&writer, |output| output.write_object(&ferrari())).unwrap();
    let result = decode(&reader, &bytes, |input| input.read_object());

    assert!(matches!(
        result,
        Err(SerialError::ClassNotFound(name)) if name == Car::type_path()
    ));
}

#[test]
fn unregistered_type() {
    let context = SerialContext::new();

    let result = encode(&context, |output| output.write_object(&Engine::new("V8", 450)));
    assert!(matches!(
        result,
        Err(SerialError::Unregistered(path)) if path == Engine::type_path()
    ));
}

#[test]
fn mismatch_names_the_decoded_type() {
    let context = SerialContext::new();
    context.register::<Country>();
    context.register::<Engine>();

    let bytes = encode(&context, |output| output.write_object(&Country::FR)).unwrap();
    let result = decode(&context, &bytes, |input| input.read_object_as::<Engine>());

    assert!(matches!(
        result,
        Err(SerialError::TypeMismatch { expected, found })
            if expected == Engine::type_path() && found == Country::type_path()
    ));
}

/// A class frame naming `class`, followed by the payload of `engine`.
fn framed_as(context: &SerialContext, class: &str, engine: &Engine) -> Vec<u8> {
    let payload = encode(context, |output| output.write_value(engine)).unwrap();
    let mut bytes = alloc::vec![0x00];
    bytes.extend_from_slice(&(class.len() as u32).to_be_bytes());
    bytes.extend_from_slice(class.as_bytes());
    bytes.extend_from_slice(&payload[1..]);
    bytes
}

#[test]
fn short_class_names() {
    let context = SerialContext::new();
    context.register::<Engine>();

    let bytes = framed_as(&context, "Engine", &Engine::new("V8", 450));
    let back = decode(&context, &bytes, |input| input.read_object_as::<Engine>()).unwrap();

    assert_eq!(back, Engine::new("V8", 450));
}

#[test]
fn custom_class_resolver() {
    let context = SerialContext::builder()
        .register::<Engine>()
        .resolver(|name: &str, registry: &TypeRegistry| match name {
            "Motor" => Some(TypeId::of::<Engine>()),
            _ => registry.get_with_type_path(name).map(TypeMeta::type_id),
        })
        .build();

    let bytes = framed_as(&context, "Motor", &Engine::new("V8", 450));
    let back = decode(&context, &bytes, |input| input.read_object_as::<Engine>()).unwrap();

    assert_eq!(back, Engine::new("V8", 450));
}

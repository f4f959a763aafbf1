use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use super::model::{Country, Engine, Rgb};
use super::{decode, encode};
use crate::info::TypePath;
use crate::{Object, SerialContext, SerialError, Shared, SharingMode};

#[test]
fn field_walk_layout() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&Engine::new("V8", 450))).unwrap();

    assert_eq!(
        bytes,
        [0x08, 0xF6, 0, 0, 0, 2, b'V', b'8', 0xFA, 0, 0, 0x01, 0xC2]
    );
}

#[test]
fn class_name_layout() {
    let context = SerialContext::new();
    context.register::<Engine>();

    let bytes = encode(&context, |output| output.write_object(&Engine::new("", 0))).unwrap();
    let path = Engine::type_path().as_bytes();

    assert_eq!(bytes[0], 0x00);
    assert_eq!(bytes[1..5], (path.len() as u32).to_be_bytes());
    assert_eq!(&bytes[5..5 + path.len()], path);
    assert_eq!(bytes.len(), 5 + path.len() + 5 + 5);
}

#[test]
fn int_array_has_no_item_tags() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&vec![1_i32, 2, 3])).unwrap();

    assert_eq!(
        bytes,
        [0x08, 0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]
    );
    let back: Vec<i32> = decode(&context, &bytes, |input| input.read_value()).unwrap();
    assert_eq!(back, [1, 2, 3]);
}

#[test]
fn enum_ordinal() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&Country::IT)).unwrap();
    assert_eq!(bytes, [0x08, 0xFA, 0, 0, 0, 2]);

    let out_of_range = [0x08, 0xFA, 0, 0, 0, 9];
    let result = decode(&context, &out_of_range, |input| input.read_value::<Country>());
    assert!(matches!(result, Err(SerialError::InvalidData(_))));
}

#[test]
fn null_marker() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&None::<Engine>)).unwrap();
    assert_eq!(bytes, [0x01]);
}

#[test]
fn companion_writes_raw_bytes() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&Rgb { r: 1, g: 2, b: 3 })).unwrap();
    assert_eq!(bytes, [0x08, 1, 2, 3]);
}

#[test]
fn back_reference_layout() {
    let context = SerialContext::builder()
        .sharing(SharingMode::IdentityShared)
        .build();

    let engine = Shared::new(Engine::new("V8", 450));
    let bytes = encode(&context, |output| {
        output.write_value(&engine)?;
        output.write_value(&engine)
    })
    .unwrap();

    assert_eq!(&bytes[..5], &[0x0C, 0, 0, 0, 0]);
    assert_eq!(&bytes[bytes.len() - 5..], &[0x02, 0, 0, 0, 0]);
}

#[test]
fn class_dictionary() {
    let engines: Vec<Box<dyn Object>> = (0..1000)
        .map(|ps| Box::new(Engine::new("I4", ps)) as Box<dyn Object>)
        .collect();

    let write = |context: &SerialContext| {
        context.register::<Engine>();
        encode(context, |output| output.write_value(&engines)).unwrap()
    };
    let plain = SerialContext::new();
    let sharing = SerialContext::builder().share_class_names(true).build();
    let long = write(&plain);
    let short = write(&sharing);

    let path = Engine::type_path();
    assert_eq!(long.len() - short.len(), 999 * path.len());

    let occurrences = short
        .windows(path.len())
        .filter(|window| *window == path.as_bytes())
        .count();
    assert_eq!(occurrences, 1);
    // first tag after the array header
    assert_eq!(short[5], 0x10);

    let back: Vec<Box<dyn Object>> = decode(&sharing, &short, |input| input.read_value()).unwrap();
    assert_eq!(back.len(), 1000);
    assert_eq!(back[999].downcast_ref::<Engine>(), Some(&Engine::new("I4", 999)));
}

#[test]
fn unknown_back_reference() {
    let context = SerialContext::new();

    let bytes = [0x02, 0, 0, 0, 7];
    let result = decode(&context, &bytes, |input| input.read_object());
    assert!(matches!(result, Err(SerialError::UnresolvedReference(7))));
}

#[test]
fn ids_must_arrive_in_order() {
    let context = SerialContext::builder()
        .sharing(SharingMode::IdentityShared)
        .build();

    let bytes = [0x0C, 0, 0, 0, 3];
    let result = decode(&context, &bytes, |input| input.read_value::<Shared<Engine>>());
    assert!(matches!(
        result,
        Err(SerialError::IdOutOfOrder { expected: 0, found: 3 })
    ));
}

#[test]
fn untyped_needs_a_class() {
    let context = SerialContext::new();

    let bytes = [0x08, 0xFA, 0, 0, 0, 1];
    let result = decode(&context, &bytes, |input| input.read_object());
    assert!(matches!(result, Err(SerialError::UntypedWithoutClass)));
}

#[test]
fn truncated_stream() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_value(&Engine::new("V8", 450))).unwrap();
    let result = decode(&context, &bytes[..bytes.len() - 2], |input| input.read_value::<Engine>());
    assert!(matches!(result, Err(SerialError::Io(_))));
}

#[test]
fn wrong_primitive_tag() {
    let context = SerialContext::new();

    let bytes = encode(&context, |output| output.write_i64(7)).unwrap();
    let result = decode(&context, &bytes, |input| input.read_i32());
    assert!(matches!(result, Err(SerialError::UnexpectedTag { .. })));
}

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::model::{Badge, Brand, Car, Country, Engine, Point, Rgb, Temperature, ferrari};
use super::{decode, encode};
use crate::{Object, SerialContext, Shared, SharingMode};

#[test]
fn car_with_class() {
    let context = SerialContext::new();
    context.register::<Car>();

    let car = ferrari();
    let bytes = encode(&context, |output| output.write_object(&car)).unwrap();
    let back = decode(&context, &bytes, |input| input.read_object_as::<Car>()).unwrap();

    assert_eq!(back, car);
    assert_eq!(back.brand.country, Country::FR);
}

#[test]
fn every_sharing_mode() {
    let modes = [
        SharingMode::Unshared,
        SharingMode::IdentityShared,
        SharingMode::EquivalenceShared,
    ];
    for mode in modes {
        let context = SerialContext::builder().sharing(mode).build();

        let car = Shared::new(ferrari());
        let counts: HashMap<String, i32> = [(String::from("a"), 1), (String::from("b"), 2)].into();
        let bytes = encode(&context, |output| {
            output.write_value(&car)?;
            output.write_value(&counts)
        })
        .unwrap();

        decode(&context, &bytes, |input| {
            assert_eq!(input.read_value::<Shared<Car>>()?, car, "{mode:?}");
            assert_eq!(input.read_value::<HashMap<String, i32>>()?, counts, "{mode:?}");
            Ok(())
        })
        .unwrap();
    }
}

#[test]
fn car_as_value_needs_no_registration() {
    let context = SerialContext::new();

    let car = ferrari();
    let bytes = encode(&context, |output| output.write_value(&car)).unwrap();
    let back: Car = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(back, car);
    assert!(context.registry().contains(TypeId::of::<Brand>()));
}

#[test]
fn sequence_of_objects() {
    let context = SerialContext::new();
    context.register::<Engine>();
    context.register::<Country>();

    let items: Vec<Box<dyn Object>> = vec![
        Box::new(Engine::new("V12", 789)),
        Box::new(Country::IT),
        Box::new(42_i32),
        Box::new(String::from("loose")),
    ];
    let bytes = encode(&context, |output| output.write_value(&items)).unwrap();
    let back: Vec<Box<dyn Object>> = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(back.len(), 4);
    assert_eq!(back[0].downcast_ref::<Engine>(), Some(&Engine::new("V12", 789)));
    assert_eq!(back[1].downcast_ref::<Country>(), Some(&Country::IT));
    assert_eq!(back[2].downcast_ref::<i32>(), Some(&42));
    assert_eq!(back[3].downcast_ref::<String>().map(String::as_str), Some("loose"));
}

#[test]
fn collections() {
    let context = SerialContext::new();

    let list: VecDeque<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
    let ordered: BTreeSet<i64> = [5, -3, 9].into_iter().collect();
    let hashed: HashSet<Country> = [Country::DE, Country::IT].into_iter().collect();
    let names: Vec<String> = vec![String::from("x"), String::new()];

    let bytes = encode(&context, |output| {
        output.write_value(&list)?;
        output.write_value(&ordered)?;
        output.write_value(&hashed)?;
        output.write_value(&names)
    })
    .unwrap();

    decode(&context, &bytes, |input| {
        assert_eq!(input.read_value::<VecDeque<String>>()?, list);
        assert_eq!(input.read_value::<BTreeSet<i64>>()?, ordered);
        assert_eq!(input.read_value::<HashSet<Country>>()?, hashed);
        assert_eq!(input.read_value::<Vec<String>>()?, names);
        Ok(())
    })
    .unwrap();
}

#[test]
fn maps() {
    let context = SerialContext::new();

    let mut by_name = BTreeMap::new();
    by_name.insert(String::from("small"), Engine::new("I3", 90));
    by_name.insert(String::from("large"), Engine::new("V8", 450));

    let mut by_country = HashMap::new();
    by_country.insert(Country::DE, vec![1_i32, 2]);
    by_country.insert(Country::FR, Vec::new());

    let bytes = encode(&context, |output| {
        output.write_value(&by_name)?;
        output.write_value(&by_country)
    })
    .unwrap();

    decode(&context, &bytes, |input| {
        assert_eq!(input.read_value::<BTreeMap<String, Engine>>()?, by_name);
        assert_eq!(input.read_value::<HashMap<Country, Vec<i32>>>()?, by_country);
        Ok(())
    })
    .unwrap();
}

#[test]
fn optional_slots() {
    let context = SerialContext::new();

    let some = Some(Engine::new("V6", 300));
    let none: Option<Engine> = None;
    let bytes = encode(&context, |output| {
        output.write_value(&some)?;
        output.write_value(&none)
    })
    .unwrap();

    decode(&context, &bytes, |input| {
        assert_eq!(input.read_value::<Option<Engine>>()?, some);
        assert_eq!(input.read_value::<Option<Engine>>()?, None);
        Ok(())
    })
    .unwrap();
}

#[test]
fn data_class_skips_transient_fields() {
    let context = SerialContext::new();

    let point = Point {
        x: 3,
        y: -4,
        label: String::from("origin"),
    };
    let bytes = encode(&context, |output| output.write_value(&point)).unwrap();
    let back: Point = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(
        back,
        Point {
            x: 3,
            y: -4,
            label: String::new(),
        }
    );
}

#[test]
fn adapter_setter_updates_derived_state() {
    let context = SerialContext::new();

    let reading = Temperature {
        celsius: 25.0,
        fahrenheit: 0.0,
    };
    let bytes = encode(&context, |output| output.write_value(&reading)).unwrap();
    let back: Temperature = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(
        back,
        Temperature {
            celsius: 25.0,
            fahrenheit: 77.0,
        }
    );
}

#[test]
fn companion_strategy() {
    let context = SerialContext::new();
    context.register::<Rgb>();

    let color = Rgb { r: 10, g: 20, b: 30 };
    let bytes = encode(&context, |output| output.write_object(&color)).unwrap();
    let back = decode(&context, &bytes, |input| input.read_object_as::<Rgb>()).unwrap();

    assert_eq!(back, color);
    assert_eq!(&bytes[bytes.len() - 3..], &[10, 20, 30]);
}

#[test]
fn compound_components() {
    let context = SerialContext::new();

    let badge = Badge {
        engine: Engine::new("W16", 1500),
        country: Country::FR,
    };
    let bytes = encode(&context, |output| output.write_value(&badge)).unwrap();
    let back: Badge = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert_eq!(back, badge);
}

#[test]
fn system_time() {
    let context = SerialContext::new();

    let later = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
    let earlier = UNIX_EPOCH - Duration::from_secs(86_400);
    let bytes = encode(&context, |output| {
        output.write_value(&later)?;
        output.write_value(&earlier)
    })
    .unwrap();

    decode(&context, &bytes, |input| {
        assert_eq!(input.read_value::<SystemTime>()?, later);
        assert_eq!(input.read_value::<SystemTime>()?, earlier);
        Ok(())
    })
    .unwrap();
}

#[test]
fn one_context_serves_many_threads() {
    let context = SerialContext::new();
    context.register::<Car>();

    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let context = &context;
                scope.spawn(move || {
                    let mut car = ferrari();
                    car.engine.ps += i;
                    let bytes = encode(context, |output| output.write_object(&car)).unwrap();
                    let back = decode(context, &bytes, |input| input.read_object_as::<Car>()).unwrap();
                    assert_eq!(back, car);
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
    });
}

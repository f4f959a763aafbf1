use alloc::string::String;
use alloc::vec::Vec;

use super::model::{Engine, Garage, Link, Person, Ring};
use super::{decode, encode};
use crate::{Object, SerialContext, SerialError, Shared, SharingMode};

fn context(sharing: SharingMode) -> SerialContext {
    SerialContext::builder().sharing(sharing).build()
}

#[test]
fn identity_keeps_aliases() {
    let context = context(SharingMode::IdentityShared);

    let engine = Shared::new(Engine::new("V8", 450));
    let garage = Garage {
        first: engine.clone(),
        second: engine,
    };
    let bytes = encode(&context, |output| output.write_value(&garage)).unwrap();
    let back: Garage = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert!(back.first.ptr_eq(&back.second));
    back.first.borrow_mut().ps = 500;
    assert_eq!(back.second.borrow().ps, 500);
}

#[test]
fn identity_keeps_distinct_nodes_apart() {
    let context = context(SharingMode::IdentityShared);

    let garage = Garage {
        first: Shared::new(Engine::new("V8", 450)),
        second: Shared::new(Engine::new("V8", 450)),
    };
    let bytes = encode(&context, |output| output.write_value(&garage)).unwrap();
    let back: Garage = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert!(!back.first.ptr_eq(&back.second));
}

#[test]
fn unshared_duplicates() {
    let context = context(SharingMode::Unshared);

    let engine = Shared::new(Engine::new("V8", 450));
    let garage = Garage {
        first: engine.clone(),
        second: engine,
    };
    let bytes = encode(&context, |output| output.write_value(&garage)).unwrap();
    let back: Garage = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert!(!back.first.ptr_eq(&back.second));
    assert_eq!(back.first, back.second);
}

#[test]
fn equivalence_merges_equal_nodes() {
    let context = context(SharingMode::EquivalenceShared);

    let garage = Garage {
        first: Shared::new(Engine::new("V8", 450)),
        second: Shared::new(Engine::new("V8", 450)),
    };
    let bytes = encode(&context, |output| output.write_value(&garage)).unwrap();
    let back: Garage = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert!(back.first.ptr_eq(&back.second));

    let distinct = Garage {
        first: Shared::new(Engine::new("V8", 450)),
        second: Shared::new(Engine::new("V6", 450)),
    };
    let bytes = encode(&context, |output| output.write_value(&distinct)).unwrap();
    let back: Garage = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert!(!back.first.ptr_eq(&back.second));
    assert_eq!(back.second.borrow().name, "V6");
}

#[test]
fn self_cycle() {
    let context = context(SharingMode::IdentityShared);

    let narcissus = Shared::new(Person {
        name: String::from("Narcissus"),
        friend: None,
    });
    narcissus.borrow_mut().friend = Some(narcissus.clone());

    let bytes = encode(&context, |output| output.write_value(&narcissus)).unwrap();
    let back: Shared<Person> = decode(&context, &bytes, |input| input.read_value()).unwrap();

    let friend = back.borrow().friend.clone();
    assert!(friend.is_some_and(|friend| friend.ptr_eq(&back)));
    assert_eq!(back.borrow().name, "Narcissus");

    narcissus.borrow_mut().friend = None;
    back.borrow_mut().friend = None;
}

#[test]
fn two_node_cycle() {
    let context = context(SharingMode::IdentityShared);

    let alice = Shared::new(Person {
        name: String::from("Alice"),
        friend: None,
    });
    let bob = Shared::new(Person {
        name: String::from("Bob"),
        friend: Some(alice.clone()),
    });
    alice.borrow_mut().friend = Some(bob.clone());

    let bytes = encode(&context, |output| output.write_value(&alice)).unwrap();
    let back: Shared<Person> = decode(&context, &bytes, |input| input.read_value()).unwrap();

    let bob_back = back.borrow().friend.clone();
    let Some(bob_back) = bob_back else {
        panic!("friend lost");
    };
    assert_eq!(bob_back.borrow().name, "Bob");
    let alice_again = bob_back.borrow().friend.clone();
    assert!(alice_again.is_some_and(|alice_again| alice_again.ptr_eq(&back)));

    alice.borrow_mut().friend = None;
    back.borrow_mut().friend = None;
}

#[test]
fn data_class_cannot_reach_itself() {
    let context = context(SharingMode::IdentityShared);

    let link = Shared::new(Link {
        label: String::from("loop"),
        next: None,
    });
    link.borrow_mut().next = Some(link.clone());

    let bytes = encode(&context, |output| output.write_value(&link)).unwrap();
    let result = decode(&context, &bytes, |input| input.read_value::<Shared<Link>>());

    assert!(matches!(result, Err(SerialError::UnresolvedReference(0))));
    link.borrow_mut().next = None;
}

#[test]
fn data_class_chain() {
    let context = context(SharingMode::IdentityShared);

    let tail = Shared::new(Link {
        label: String::from("tail"),
        next: None,
    });
    let head = Shared::new(Link {
        label: String::from("head"),
        next: Some(tail.clone()),
    });
    let bytes = encode(&context, |output| {
        output.write_value(&head)?;
        output.write_value(&tail)
    })
    .unwrap();
    let (head, tail) = decode(&context, &bytes, |input| {
        Ok((input.read_value::<Shared<Link>>()?, input.read_value::<Shared<Link>>()?))
    })
    .unwrap();

    assert_eq!(head.borrow().label, "head");
    let next = head.borrow().next.clone();
    assert!(next.is_some_and(|next| next.ptr_eq(&tail)));
}

#[test]
fn polymorphic_nodes() {
    let context = context(SharingMode::IdentityShared);
    context.register::<Engine>();

    let engine = Shared::new(Engine::new("V8", 450)).to_dyn();
    let label = Shared::new(String::from("shared label")).to_dyn();
    let nodes: Vec<Shared<dyn Object>> = alloc::vec![engine.clone(), engine, label];

    let bytes = encode(&context, |output| {
        nodes.iter().try_for_each(|node| output.write_shared(node))
    })
    .unwrap();
    let back = decode(&context, &bytes, |input| {
        (0..3).map(|_| input.read_shared()).collect::<Result<Vec<_>, _>>()
    })
    .unwrap();

    assert!(back[0].ptr_eq(&back[1]));
    assert!(back[0].borrow().is::<Engine>());
    assert_eq!(
        back[2].borrow().downcast_ref::<String>().map(String::as_str),
        Some("shared label")
    );
}

#[test]
fn nodes_are_numbered_per_stream() {
    let context = context(SharingMode::IdentityShared);

    let engine = Shared::new(Engine::new("V8", 450));
    let first = encode(&context, |output| output.write_value(&engine)).unwrap();
    let second = encode(&context, |output| output.write_value(&engine)).unwrap();

    assert_eq!(first, second);
    assert_eq!(&first[..5], &[0x0C, 0, 0, 0, 0]);
}

#[test]
fn equivalence_leaves_owned_values_inline() {
    let engines = alloc::vec![Engine::new("V8", 450), Engine::new("V8", 450)];

    let written = |sharing| encode(&context(sharing), |output| output.write_value(&engines));
    let unshared = written(SharingMode::Unshared).unwrap();
    let merged = written(SharingMode::EquivalenceShared).unwrap();

    assert_eq!(merged, unshared);
}

#[test]
fn equivalence_with_a_cycle() {
    let context = context(SharingMode::EquivalenceShared);

    let ring = Shared::new(Ring {
        label: String::from("loop"),
        next: None,
    });
    ring.borrow_mut().next = Some(ring.clone());
    let twin = Shared::new(Ring {
        label: String::from("loop"),
        next: None,
    });
    twin.borrow_mut().next = Some(twin.clone());
    assert_eq!(ring, twin);

    let bytes = encode(&context, |output| {
        output.write_value(&ring)?;
        output.write_value(&twin)
    })
    .unwrap();
    let (first, second) = decode(&context, &bytes, |input| {
        Ok((input.read_value::<Shared<Ring>>()?, input.read_value::<Shared<Ring>>()?))
    })
    .unwrap();

    assert!(first.ptr_eq(&second));
    let next = first.borrow().next.clone();
    assert!(next.is_some_and(|next| next.ptr_eq(&first)));

    for node in [ring, twin, first] {
        node.borrow_mut().next = None;
    }
}

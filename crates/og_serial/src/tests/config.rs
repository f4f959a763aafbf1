use super::model::{Engine, Garage};
use super::{decode, encode};
use crate::{SerialConfig, SerialContext, Shared, SharingMode};

#[test]
fn from_ron() {
    let config: SerialConfig = ron::from_str(
        "(
            sharing: IdentityShared,
            share_class_names: true,
        )",
    )
    .unwrap();

    assert_eq!(
        config,
        SerialConfig {
            sharing: SharingMode::IdentityShared,
            share_class_names: true,
            allow_raw: false,
        }
    );
}

#[test]
fn from_json() {
    let config: SerialConfig = serde_json::from_str(r#"{ "allow_raw": true }"#).unwrap();
    assert_eq!(config.sharing, SharingMode::Unshared);
    assert!(config.allow_raw);

    let text = serde_json::to_string(&SerialConfig {
        sharing: SharingMode::EquivalenceShared,
        ..SerialConfig::default()
    })
    .unwrap();
    let back: SerialConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back.sharing, SharingMode::EquivalenceShared);
}

#[test]
fn unknown_sharing_mode_is_rejected() {
    assert!(ron::from_str::<SerialConfig>("(sharing: Sometimes)").is_err());
}

#[test]
fn loaded_config_drives_the_context() {
    let config: SerialConfig = ron::from_str("(sharing: IdentityShared)").unwrap();
    let context = SerialContext::builder().config(config).build();

    let engine = Shared::new(Engine::new("V8", 450));
    let garage = Garage {
        first: engine.clone(),
        second: engine,
    };
    let bytes = encode(&context, |output| output.write_value(&garage)).unwrap();
    let back: Garage = decode(&context, &bytes, |input| input.read_value()).unwrap();

    assert!(back.first.ptr_eq(&back.second));
}

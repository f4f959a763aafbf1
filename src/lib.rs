#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use og_serial as serial;
pub use og_utils as utils;

pub use og_serial::derive::Serial;
pub use og_serial::{Input, Object, Output, SerialConfig, SerialContext, SerialError, Shared, SharingMode};

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_get_type_meta;
mod trait_object;
mod trait_serial;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_get_type_meta::impl_trait_get_type_meta;
use trait_object::impl_trait_object;
use trait_serial::impl_trait_serial;
use trait_type_path::impl_trait_type_path;
use trait_typed::{construct, impl_enum_typed, impl_struct_typed};

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialDerive;

/// All impls of `#[derive(Serial)]`.
pub(crate) fn impl_serial(derive: &SerialDerive) -> TokenStream {
    let meta = derive.meta();

    let type_path = impl_trait_type_path(meta);
    let typed = match derive {
        SerialDerive::Struct(data) => impl_struct_typed(data),
        SerialDerive::Enum(data) => impl_enum_typed(data),
    };
    let object = impl_trait_object(meta);
    let serial = impl_trait_serial(meta);
    let get_type_meta = impl_trait_get_type_meta(derive);
    let auto_register = get_auto_register_impl(meta);

    quote! {
        const _: () = {
            #type_path
            #typed
            #object
            #serial
            #get_type_meta
            #auto_register
        };
    }
}

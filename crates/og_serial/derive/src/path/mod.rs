//! Paths of the `og_serial` items named by generated code.
//!
//! Kept in one place so generated code follows the runtime crate layout.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The path under which the calling crate reaches `og_serial`.
///
/// `::og_serial` for direct dependents, `::objgraph::serial` for users of the
/// facade. Reading the manifest is not free, so callers resolve it once and
/// pass it down.
pub(crate) fn og_serial() -> syn::Path {
    og_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("og_serial"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! item_path {
    ($($name:ident => $($segment:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $name(og_serial_path: &syn::Path) -> TokenStream {
            quote! { #og_serial_path::$($segment)::+ }
        }
    )*};
}

item_path! {
    macro_exports_ => __macro_exports;
    concat_ => impls::concat;
    object_ => Object;
    serial_ => Serial;
    serial_error_ => SerialError;
    shared_cell_ => object::SharedCell;
    input_ => Input;
    output_ => Output;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    field_info_ => info::FieldInfo;
    enum_info_ => info::EnumInfo;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    generic_type_path_cell_ => impls::GenericTypePathCell;
    type_meta_ => registry::TypeMeta;
    get_type_meta_ => registry::GetTypeMeta;
    type_registry_ => registry::TypeRegistry;
    from_type_ => registry::FromType;
    type_trait_default_ => registry::TypeTraitDefault;
    type_trait_blank_ => registry::TypeTraitBlank;
    type_trait_self_serial_ => registry::TypeTraitSelfSerial;
    type_trait_with_ => registry::TypeTraitWith;
    type_trait_adapter_ => registry::TypeTraitAdapter;
    type_trait_companion_ => registry::TypeTraitCompanion;
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(og_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #og_serial_path::__macro_exports::auto_register
    }
}

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialMeta;

/// Generates `Serial`: the type is a final slot, written untyped and
/// registered on first use.
pub(crate) fn impl_trait_serial(meta: &SerialMeta) -> TokenStream {
    let og_serial_path = meta.og_serial_path();
    let serial_ = crate::path::serial_(og_serial_path);
    let serial_error_ = crate::path::serial_error_(og_serial_path);
    let input_ = crate::path::input_(og_serial_path);
    let output_ = crate::path::output_(og_serial_path);
    let type_registry_ = crate::path::type_registry_(og_serial_path);
    let exports_ = crate::path::macro_exports_(og_serial_path);
    let real_ident = meta.real_ident();

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&serial_);

    quote! {
        impl #impl_generics #serial_ for #real_ident #ty_generics #where_clause {
            fn write_slot(&self, output: &mut #output_<'_>) -> #exports_::Result<(), #serial_error_> {
                output.context().ensure_registered::<Self>();
                output.write_untyped(self)
            }

            #[inline]
            fn read_slot(input: &mut #input_<'_>) -> #exports_::Result<Self, #serial_error_> {
                input.read_untyped::<Self>()
            }

            #[inline]
            fn register_slot(registry: &mut #type_registry_) {
                registry.register::<Self>();
            }
        }
    }
}

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialMeta;
use crate::utils::StringExpr;

fn static_path_cell(og_serial_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(og_serial_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generates `TypePath`.
pub(crate) fn impl_trait_type_path(meta: &SerialMeta) -> TokenStream {
    let og_serial_path = meta.og_serial_path();
    let type_path_ = crate::path::type_path_(og_serial_path);
    let real_ident = meta.real_ident();

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        (
            static_path_cell(og_serial_path, meta.type_path().into_owned()),
            static_path_cell(og_serial_path, meta.type_name().into_owned()),
            crate::utils::empty(),
        )
    } else {
        (
            meta.type_path().into_borrowed(),
            meta.type_name().into_borrowed(),
            quote! { #[inline] },
        )
    };

    let type_ident = meta.type_ident().into_borrowed();
    let module_path = match meta.module_path().map(StringExpr::into_borrowed) {
        Some(module_path) => quote! { ::core::option::Option::Some(#module_path) },
        None => quote! { ::core::option::Option::None },
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&type_path_);

    quote! {
        impl #impl_generics #type_path_ for #real_ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}

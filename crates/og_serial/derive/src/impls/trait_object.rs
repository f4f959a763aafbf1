use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::SerialMeta;

/// Generates `Object`. Equality, hashing and debug output use the standard
/// traits when the matching flags are set.
pub(crate) fn impl_trait_object(meta: &SerialMeta) -> TokenStream {
    let og_serial_path = meta.og_serial_path();
    let object_ = crate::path::object_(og_serial_path);
    let serial_ = crate::path::serial_(og_serial_path);
    let typed_ = crate::path::typed_(og_serial_path);
    let type_info_ = crate::path::type_info_(og_serial_path);
    let shared_cell_ = crate::path::shared_cell_(og_serial_path);
    let exports_ = crate::path::macro_exports_(og_serial_path);
    let real_ident = meta.real_ident();
    let attrs = meta.attrs();

    let object_eq = attrs.partial_eq.map(|span| {
        quote_spanned! { span =>
            fn object_eq(&self, other: &dyn #object_) -> #exports_::Option<bool> {
                let other = other.downcast_ref::<Self>();
                #exports_::Option::Some(other.is_some_and(|other| ::core::cmp::PartialEq::eq(self, other)))
            }
        }
    });

    let object_hash = attrs.hash.map(|span| {
        quote_spanned! { span =>
            fn object_hash(&self) -> #exports_::Option<u64> {
                #exports_::Option::Some(#exports_::fixed_hash(self))
            }
        }
    });

    let object_debug = attrs.debug.map(|span| {
        quote_spanned! { span =>
            fn object_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&serial_);

    quote! {
        impl #impl_generics #object_ for #real_ident #ty_generics #where_clause {
            #[inline]
            fn into_shared(self: #exports_::Box<Self>) -> #shared_cell_ {
                #shared_cell_::new(*self)
            }

            #[inline]
            fn object_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            fn set(
                &mut self,
                value: #exports_::Box<dyn #object_>,
            ) -> #exports_::Result<(), #exports_::Box<dyn #object_>> {
                *self = value.take::<Self>()?;
                #exports_::Result::Ok(())
            }

            #object_eq
            #object_hash
            #object_debug
        }
    }
}

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use super::construct;
use crate::derive_data::{DeclaredStrategy, SerialDerive};

/// Generates `GetTypeMeta`: the type traits selected by the attributes, and
/// registration of every written field type.
pub(crate) fn impl_trait_get_type_meta(derive: &SerialDerive) -> TokenStream {
    let meta = derive.meta();
    let og_serial_path = meta.og_serial_path();
    let get_type_meta_ = crate::path::get_type_meta_(og_serial_path);
    let type_meta_ = crate::path::type_meta_(og_serial_path);
    let type_registry_ = crate::path::type_registry_(og_serial_path);
    let from_type_ = crate::path::from_type_(og_serial_path);
    let serial_ = crate::path::serial_(og_serial_path);
    let object_ = crate::path::object_(og_serial_path);
    let exports_ = crate::path::macro_exports_(og_serial_path);
    let real_ident = meta.real_ident();
    let attrs = meta.attrs();

    let mut inserts = Vec::new();

    if let Some(span) = attrs.default {
        let trait_ = crate::path::type_trait_default_(og_serial_path);
        inserts.push(quote_spanned! { span =>
            meta.insert_trait(<#trait_ as #from_type_<Self>>::from_type());
        });
    }

    if let (Some(span), SerialDerive::Struct(data)) = (attrs.blank, derive) {
        let trait_ = crate::path::type_trait_blank_(og_serial_path);
        let value = construct(data, |_| quote! { #exports_::Default::default() });
        inserts.push(quote_spanned! { span =>
            meta.insert_trait(#trait_::new(|| {
                let value: #exports_::Box<dyn #object_> = #exports_::Box::new(#value);
                value
            }));
        });
    }

    match &attrs.strategy {
        Some(DeclaredStrategy::SelfDescribing(span)) => {
            let trait_ = crate::path::type_trait_self_serial_(og_serial_path);
            inserts.push(quote_spanned! { *span =>
                meta.insert_trait(<#trait_ as #from_type_<Self>>::from_type());
            });
        }
        Some(DeclaredStrategy::With(expr)) => {
            let trait_ = crate::path::type_trait_with_(og_serial_path);
            inserts.push(quote! {
                meta.insert_trait(#trait_::new(|| #expr));
            });
        }
        Some(DeclaredStrategy::Adapter(adapter)) => {
            let trait_ = crate::path::type_trait_adapter_(og_serial_path);
            inserts.push(quote! {
                meta.insert_trait(#trait_::of::<#adapter>());
            });
        }
        Some(DeclaredStrategy::Companion(span)) => {
            let trait_ = crate::path::type_trait_companion_(og_serial_path);
            inserts.push(quote_spanned! { *span =>
                meta.insert_trait(<#trait_ as #from_type_<Self>>::from_type());
            });
        }
        // Carried by `StructInfo`.
        Some(DeclaredStrategy::Data(_)) | None => {}
    }

    let dependencies = match derive {
        SerialDerive::Struct(data) if data.active_fields().next().is_some() => {
            let types = data.active_fields().map(|field| field.ty);
            quote! {
                fn register_dependencies(registry: &mut #type_registry_) {
                    #( <#types as #serial_>::register_slot(registry); )*
                }
            }
        }
        _ => crate::utils::empty(),
    };

    let body = if inserts.is_empty() {
        quote! { #type_meta_::of::<Self>() }
    } else {
        quote! {
            let mut meta = #type_meta_::of::<Self>();
            #(#inserts)*
            meta
        }
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&serial_);

    quote! {
        impl #impl_generics #get_type_meta_ for #real_ident #ty_generics #where_clause {
            fn get_type_meta() -> #type_meta_ {
                #body
            }

            #dependencies
        }
    }
}

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{SerialEnum, SerialMeta, SerialStruct, StructStyle};

/// Wraps the `TypeInfo` expression in the right static cell.
fn impl_trait_typed(meta: &SerialMeta, info: TokenStream) -> TokenStream {
    let og_serial_path = meta.og_serial_path();
    let typed_ = crate::path::typed_(og_serial_path);
    let type_info_ = crate::path::type_info_(og_serial_path);
    let serial_ = crate::path::serial_(og_serial_path);
    let real_ident = meta.real_ident();

    let cell = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_type_info_cell_(og_serial_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| { #info })
        }
    } else {
        let cell_ = crate::path::non_generic_type_info_cell_(og_serial_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| { #info })
        }
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&serial_);

    quote! {
        impl #impl_generics #typed_ for #real_ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #cell
            }
        }
    }
}

/// Builds a value of the struct from one expression per field.
pub(crate) fn construct(data: &SerialStruct, mut field_expr: impl FnMut(bool) -> TokenStream) -> TokenStream {
    match data.style {
        StructStyle::Unit => quote! { Self },
        StructStyle::Tuple => {
            let values = data.fields.iter().map(|field| field_expr(field.is_transient()));
            quote! { Self( #(#values),* ) }
        }
        StructStyle::Named => {
            let values = data.fields.iter().map(|field| {
                let member = &field.member;
                let value = field_expr(field.is_transient());
                quote! { #member: #value }
            });
            quote! { Self { #(#values),* } }
        }
    }
}

/// `Typed` of a struct: a `StructInfo` with one `FieldInfo` per written
/// field, plus the constructor of a data class.
pub(crate) fn impl_struct_typed(data: &SerialStruct) -> TokenStream {
    let meta = &data.meta;
    let og_serial_path = meta.og_serial_path();
    let type_info_ = crate::path::type_info_(og_serial_path);
    let struct_info_ = crate::path::struct_info_(og_serial_path);
    let field_info_ = crate::path::field_info_(og_serial_path);
    let serial_ = crate::path::serial_(og_serial_path);

    let fields = data.active_fields().map(|field| {
        let member = &field.member;
        let ty = field.ty;
        let name = field.name();
        let index = field.index;
        quote! {
            #field_info_::new::<#ty>(
                #name,
                #index,
                |value, output| {
                    <#ty as #serial_>::write_slot(&value.try_downcast_ref::<Self>()?.#member, output)
                },
                |target, input| {
                    <#ty as #serial_>::read_slot_in_place(&mut target.try_downcast_mut::<Self>()?.#member, input)
                },
            )
        }
    });

    let constructor = if meta.attrs().is_data() {
        let exports_ = crate::path::macro_exports_(og_serial_path);
        let object_ = crate::path::object_(og_serial_path);
        let value = construct(data, |transient| {
            if transient {
                quote! { #exports_::Default::default() }
            } else {
                quote! { args.take()? }
            }
        });
        quote! {
            .with_constructor(|mut args| {
                let value: #exports_::Box<dyn #object_> = #exports_::Box::new(#value);
                #exports_::Result::Ok(value)
            })
        }
    } else {
        crate::utils::empty()
    };

    let info = quote! {
        #type_info_::Struct(
            #struct_info_::new::<Self>(&[ #(#fields),* ])
            #constructor
        )
    };
    impl_trait_typed(meta, info)
}

/// `Typed` of a unit-only enum: variant names plus the ordinal mapping.
pub(crate) fn impl_enum_typed(data: &SerialEnum) -> TokenStream {
    let meta = &data.meta;
    let og_serial_path = meta.og_serial_path();
    let type_info_ = crate::path::type_info_(og_serial_path);
    let enum_info_ = crate::path::enum_info_(og_serial_path);
    let object_ = crate::path::object_(og_serial_path);
    let exports_ = crate::path::macro_exports_(og_serial_path);

    let names = data.variants.iter().map(|variant| variant.to_string());
    let variants = &data.variants;
    let ordinals: Vec<usize> = (0..data.variants.len()).collect();

    let info = quote! {
        #type_info_::Enum(#enum_info_::new::<Self>(
            &[ #(#names),* ],
            |value| {
                value.downcast_ref::<Self>().map(|value| match *value {
                    #( Self::#variants => #ordinals, )*
                })
            },
            |ordinal| match ordinal {
                #( #ordinals => {
                    let value: #exports_::Box<dyn #object_> = #exports_::Box::new(Self::#variants);
                    #exports_::Option::Some(value)
                } )*
                _ => #exports_::Option::None,
            },
        ))
    };
    impl_trait_typed(meta, info)
}

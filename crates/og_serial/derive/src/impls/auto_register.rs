use crate::derive_data::SerialMeta;

/// Submits the type to the static registration list.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &SerialMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    // Generic types have no single instantiation to register.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let og_serial_path = meta.og_serial_path();
    let auto_register_ = crate::path::auto_register_(og_serial_path);
    let exports_ = crate::path::macro_exports_(og_serial_path);
    let real_ident = meta.real_ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::__AutoRegisterFunc(#exports_::__register::<#real_ident>)
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &SerialMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}

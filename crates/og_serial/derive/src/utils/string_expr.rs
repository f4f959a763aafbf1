use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::LitStr;
use syn::spanned::Spanned;

/// A string-valued expression in generated code.
#[derive(Clone)]
pub(crate) enum StringExpr {
    /// Known at compile time: a literal, or a macro such as `module_path!()`.
    Const(TokenStream),
    /// A `&'static str` computed at run time.
    Borrowed(TokenStream),
    /// A `String`.
    Owned(TokenStream),
}

impl Default for StringExpr {
    fn default() -> Self {
        Self::Const("".to_token_stream())
    }
}

impl<T: ToString + Spanned> From<T> for StringExpr {
    fn from(value: T) -> Self {
        Self::Const(LitStr::new(&value.to_string(), value.span()).to_token_stream())
    }
}

impl StringExpr {
    pub fn from_lit(lit: &LitStr) -> Self {
        Self::Const(lit.to_token_stream())
    }

    pub fn from_str(string: &str) -> Self {
        Self::Const(string.to_token_stream())
    }

    /// Tokens of a `&'static str`, or of a `&str` borrowed from an owned string.
    pub fn into_borrowed(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => tokens,
            Self::Owned(owned) => quote! {
                &#owned as &str
            },
        }
    }

    /// Tokens of a `String`.
    pub fn into_owned(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => quote! {
                ::core::convert::Into::<::std::string::String>::into(#tokens)
            },
            Self::Owned(owned) => owned,
        }
    }

    fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }

    /// Joins the expressions, with `concat!` when all of them are constant.
    pub fn from_iter<T: IntoIterator<Item = StringExpr>>(iter: T, og_serial_path: &syn::Path) -> Self {
        let exprs: Vec<StringExpr> = iter.into_iter().collect();

        if exprs.is_empty() {
            return Self::default();
        }

        if exprs.iter().all(StringExpr::is_const) {
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);
            Self::Const(quote! {
                ::core::concat!( #(#inner),* )
            })
        } else {
            let concat_ = crate::path::concat_(og_serial_path);
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);
            Self::Owned(quote! {
                #concat_(&[ #(#inner),* ])
            })
        }
    }
}

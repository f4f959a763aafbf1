use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Path, TypeGenerics};

use super::{TypeAttributes, TypeParser};
use crate::utils::StringExpr;

/// What every generated impl needs to know about the type.
pub(crate) struct SerialMeta<'a> {
    og_serial_path: Path,
    attrs: TypeAttributes,
    type_parser: TypeParser<'a>,
}

impl core::fmt::Debug for SerialMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerialMeta")
            .field("og_serial_path", &self.og_serial_path.to_token_stream())
            .field("type_parser", &self.type_parser)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> SerialMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, type_parser: TypeParser<'a>) -> Self {
        Self {
            og_serial_path: crate::path::og_serial(),
            attrs,
            type_parser,
        }
    }

    #[inline]
    pub fn og_serial_path(&self) -> &Path {
        &self.og_serial_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn generics(&self) -> &'a Generics {
        self.type_parser.generics()
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.type_parser.impl_with_generic()
    }

    #[inline]
    pub fn real_ident(&self) -> &'a Ident {
        self.type_parser.real_ident()
    }

    #[inline]
    pub fn module_path(&self) -> Option<StringExpr> {
        self.type_parser.module_path()
    }

    #[inline]
    pub fn type_ident(&self) -> StringExpr {
        self.type_parser.type_ident()
    }

    #[inline]
    pub fn type_name(&self) -> StringExpr {
        self.type_parser.type_name(&self.og_serial_path)
    }

    #[inline]
    pub fn type_path(&self) -> StringExpr {
        self.type_parser.type_path(&self.og_serial_path)
    }

    /// Splits the generics for an impl, bounding every type parameter by
    /// `bound`.
    pub fn split_generics(&self, bound: &TokenStream) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let generics = self.generics();
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let existing = where_clause
            .map(|clause| {
                clause
                    .predicates
                    .iter()
                    .map(ToTokens::to_token_stream)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        let bounded = generics.type_params().map(|param| {
            let ident = &param.ident;
            quote! { #ident: #bound }
        });
        let predicates: Vec<TokenStream> = existing.into_iter().chain(bounded).collect();

        let where_clause = if predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote! { where #(#predicates,)* }
        };
        (impl_generics, ty_generics, where_clause)
    }
}

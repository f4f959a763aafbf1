use quote::quote;
use syn::spanned::Spanned;
use syn::{GenericParam, Generics, Ident, LitStr, Path, TypeParam};

use crate::utils::StringExpr;

/// The path and generics of the derived type.
///
/// The type is local, so [`module_path!()`](module_path) gives its module
/// unless `#[serial(type_path = "...")]` overrides it.
pub(crate) struct TypeParser<'a> {
    ident: &'a Ident,
    custom_path: Option<Path>,
    generics: &'a Generics,
}

impl core::fmt::Debug for TypeParser<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.ident.to_string(), f)
    }
}

impl<'a> TypeParser<'a> {
    pub(crate) fn new(ident: &'a Ident, custom_path: Option<Path>, generics: &'a Generics) -> Self {
        Self {
            ident,
            custom_path,
            generics,
        }
    }

    #[inline]
    pub(crate) fn generics(&self) -> &'a Generics {
        self.generics
    }

    /// Whether there are type or const parameters.
    pub(crate) fn impl_with_generic(&self) -> bool {
        !self
            .generics
            .params
            .iter()
            .all(|param| matches!(param, GenericParam::Lifetime(_)))
    }

    #[inline]
    pub(crate) fn real_ident(&self) -> &'a Ident {
        self.ident
    }

    fn custom_ident(&self) -> &Ident {
        self.custom_path
            .as_ref()
            .and_then(|path| path.segments.last())
            .map_or(self.ident, |segment| &segment.ident)
    }

    /// `None` when a custom path has a single segment.
    pub(crate) fn module_path(&self) -> Option<StringExpr> {
        let Some(path) = &self.custom_path else {
            return Some(StringExpr::Const(quote! { ::core::module_path!() }));
        };

        path.segments
            .iter()
            .take(path.segments.len().saturating_sub(1))
            .map(|segment| segment.ident.to_string())
            .reduce(|path, ident| path + "::" + &ident)
            .map(|module| StringExpr::from_lit(&LitStr::new(&module, path.span())))
    }

    pub(crate) fn type_ident(&self) -> StringExpr {
        StringExpr::from(self.custom_ident())
    }

    /// Type and const parameters, joined by `", "`.
    fn reduce_generics(
        &self,
        mut ty_generic_fn: impl FnMut(&TypeParam) -> StringExpr,
        og_serial_path: &Path,
    ) -> StringExpr {
        let mut params = self.generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(ty_generic_fn(type_param)),
            GenericParam::Const(const_param) => {
                let ident = &const_param.ident;
                Some(StringExpr::Owned(quote! {
                    ::std::string::ToString::to_string(&#ident)
                }))
            }
            GenericParam::Lifetime(_) => None,
        });

        let first = params.next().into_iter();
        StringExpr::from_iter(
            first.chain(params.flat_map(|param| [StringExpr::from_str(", "), param])),
            og_serial_path,
        )
    }

    fn with_generics(&self, head: Vec<StringExpr>, og_serial_path: &Path, method: &Ident) -> StringExpr {
        if !self.impl_with_generic() {
            return StringExpr::from_iter(head, og_serial_path);
        }

        let type_path_ = crate::path::type_path_(og_serial_path);
        let generics = self.reduce_generics(
            |TypeParam { ident, .. }| {
                StringExpr::Borrowed(quote! {
                    <#ident as #type_path_>::#method()
                })
            },
            og_serial_path,
        );

        StringExpr::from_iter(
            head.into_iter().chain([
                StringExpr::from_str("<"),
                generics,
                StringExpr::from_str(">"),
            ]),
            og_serial_path,
        )
    }

    /// `"Pair<i32>"` for `my_crate::Pair<i32>`.
    pub(crate) fn type_name(&self, og_serial_path: &Path) -> StringExpr {
        let method = Ident::new("type_name", self.ident.span());
        self.with_generics(vec![self.type_ident()], og_serial_path, &method)
    }

    /// `"my_crate::Pair<i32>"`.
    pub(crate) fn type_path(&self, og_serial_path: &Path) -> StringExpr {
        let method = Ident::new("type_path", self.ident.span());
        let mut head = Vec::with_capacity(3);
        if let Some(module) = self.module_path() {
            head.extend([module, StringExpr::from_str("::")]);
        }
        head.push(self.type_ident());
        self.with_generics(head, og_serial_path, &method)
    }
}

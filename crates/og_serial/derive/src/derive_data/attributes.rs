use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, LitStr, Path};

use crate::SERIAL_ATTRIBUTE_NAME;

/// How a type is encoded, when the type says so itself.
///
/// At most one may be declared.
#[derive(Debug)]
pub(crate) enum DeclaredStrategy {
    /// `#[serial(self_describing)]`: the type implements `SelfSerial`.
    SelfDescribing(Span),
    /// `#[serial(with = expr)]`: `expr` evaluates to a `Strategy`.
    With(Box<Expr>),
    /// `#[serial(adapter = Path)]`.
    Adapter(Path),
    /// `#[serial(companion)]`: the type implements `Companion`.
    Companion(Span),
    /// `#[serial(data)]`: built from all field values at once.
    Data(Span),
}

/// Type-level `#[serial(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<Path>,
    pub strategy: Option<DeclaredStrategy>,
    pub default: Option<Span>,
    pub blank: Option<Span>,
    pub partial_eq: Option<Span>,
    pub hash: Option<Span>,
    pub debug: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(SERIAL_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                let mut declare = |strategy: DeclaredStrategy| {
                    if this.strategy.is_some() {
                        return Err(syn::Error::new(span, "a serialization strategy is already declared"));
                    }
                    this.strategy = Some(strategy);
                    Ok(())
                };

                if meta.path.is_ident("self_describing") {
                    declare(DeclaredStrategy::SelfDescribing(span))
                } else if meta.path.is_ident("with") {
                    let expr: Expr = meta.value()?.parse()?;
                    declare(DeclaredStrategy::With(Box::new(expr)))
                } else if meta.path.is_ident("adapter") {
                    let path: Path = meta.value()?.parse()?;
                    declare(DeclaredStrategy::Adapter(path))
                } else if meta.path.is_ident("companion") {
                    declare(DeclaredStrategy::Companion(span))
                } else if meta.path.is_ident("data") {
                    declare(DeclaredStrategy::Data(span))
                } else if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    this.type_path = Some(lit.parse()?);
                    Ok(())
                } else {
                    let flag = if meta.path.is_ident("default") {
                        &mut this.default
                    } else if meta.path.is_ident("blank") {
                        &mut this.blank
                    } else if meta.path.is_ident("partial_eq") {
                        &mut this.partial_eq
                    } else if meta.path.is_ident("hash") {
                        &mut this.hash
                    } else if meta.path.is_ident("debug") {
                        &mut this.debug
                    } else if meta.path.is_ident("auto_register") {
                        &mut this.auto_register
                    } else {
                        return Err(meta.error("unsupported `serial` attribute"));
                    };
                    *flag = Some(span);
                    Ok(())
                }
            })?;
        }
        Ok(this)
    }

    #[inline]
    pub fn is_data(&self) -> bool {
        matches!(self.strategy, Some(DeclaredStrategy::Data(_)))
    }
}

/// Field-level `#[serial(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// Not written. Rebuilt with `Default` by data classes.
    pub transient: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(SERIAL_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("transient") {
                    this.transient = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("unsupported `serial` field attribute"))
                }
            })?;
        }
        Ok(this)
    }
}

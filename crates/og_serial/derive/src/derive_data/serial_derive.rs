use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Member, Type};

use super::{DeclaredStrategy, FieldAttributes, SerialMeta, TypeAttributes, TypeParser};

/// A field of the derived struct.
pub(crate) struct StructField<'a> {
    pub attrs: FieldAttributes,
    /// `self.name` or `self.0`.
    pub member: Member,
    pub ty: &'a Type,
    /// Declaration index, counting transient fields.
    pub index: usize,
}

impl StructField<'_> {
    #[inline]
    pub fn is_transient(&self) -> bool {
        self.attrs.transient.is_some()
    }

    /// The name written in `FieldInfo`; tuple fields use their index.
    pub fn name(&self) -> String {
        match &self.member {
            Member::Named(ident) => ident.to_string(),
            Member::Unnamed(index) => index.index.to_string(),
        }
    }
}

/// The shape of a struct, for building a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StructStyle {
    Named,
    Tuple,
    Unit,
}

pub(crate) struct SerialStruct<'a> {
    pub meta: SerialMeta<'a>,
    pub style: StructStyle,
    pub fields: Vec<StructField<'a>>,
}

impl SerialStruct<'_> {
    /// Fields that are written, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'_>> {
        self.fields.iter().filter(|field| !field.is_transient())
    }
}

/// A unit-only enum.
pub(crate) struct SerialEnum<'a> {
    pub meta: SerialMeta<'a>,
    pub variants: Vec<&'a Ident>,
}

pub(crate) enum SerialDerive<'a> {
    Struct(SerialStruct<'a>),
    Enum(SerialEnum<'a>),
}

impl<'a> SerialDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let type_parser = TypeParser::new(&input.ident, attrs.type_path.clone(), &input.generics);

        match &input.data {
            Data::Struct(data) => {
                let style = match &data.fields {
                    Fields::Named(_) => StructStyle::Named,
                    Fields::Unnamed(_) => StructStyle::Tuple,
                    Fields::Unit => StructStyle::Unit,
                };
                let fields = data
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(index, field)| {
                        let member = match &field.ident {
                            Some(ident) => Member::Named(ident.clone()),
                            None => Member::Unnamed(syn::Index {
                                index: index as u32,
                                span: field.span(),
                            }),
                        };
                        Ok(StructField {
                            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                            member,
                            ty: &field.ty,
                            index,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                Ok(Self::Struct(SerialStruct {
                    meta: SerialMeta::new(attrs, type_parser),
                    style,
                    fields,
                }))
            }
            Data::Enum(data) => {
                if let Some(DeclaredStrategy::Data(span)) = &attrs.strategy {
                    return Err(syn::Error::new(*span, "`data` only applies to structs"));
                }
                if let Some(span) = attrs.blank {
                    return Err(syn::Error::new(span, "`blank` only applies to structs"));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| match &variant.fields {
                        Fields::Unit => Ok(&variant.ident),
                        _ => Err(syn::Error::new(
                            variant.span(),
                            "`Serial` enums must be unit-only; they are encoded by ordinal",
                        )),
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                Ok(Self::Enum(SerialEnum {
                    meta: SerialMeta::new(attrs, type_parser),
                    variants,
                }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "`Serial` cannot be derived for unions",
            )),
        }
    }

    #[inline]
    pub fn meta(&self) -> &SerialMeta<'a> {
        match self {
            Self::Struct(data) => &data.meta,
            Self::Enum(data) => &data.meta,
        }
    }
}

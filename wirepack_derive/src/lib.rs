use darling::{ast, Error, FromDeriveInput, FromField, FromVariant};
use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, parse_quote, DeriveInput};

#[proc_macro_derive(Encode, attributes(wirepack))]
pub fn derive_encode(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ContainerReceiver::from_derive_input(&input)
        .and_then(|receiver| receiver.validate())
        .map(|data| data.encode_impl().into_token_stream())
        .unwrap_or_else(|error| error.write_errors())
        .into()
}

#[derive(FromDeriveInput)]
#[darling(attributes(wirepack))]
struct ContainerReceiver {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<VariantReceiver, FieldReceiver>,

    #[darling(default)]
    crate_path: Option<syn::Path>,

    #[darling(default)]
    repr: Option<syn::LitStr>,
}

struct ContainerData {
    ident: syn::Ident,
    generics: syn::Generics,
    crate_path: syn::Path,
    repr: Option<syn::Type>,
    variants: Vec<VariantData>,
}

impl ContainerReceiver {
    fn validate(&self) -> Result<ContainerData, Error> {
        let mut errors = Vec::new();

        let ident = self.ident.clone();
        let generics = self.generics.clone();
        let crate_path = self
            .crate_path
            .clone()
            .unwrap_or_else(|| parse_quote!(wirepack));

        let repr = match &self.repr {
            None => None,
            Some(lit) => match lit.parse::<syn::Type>() {
                Ok(ty) => Some(ty),
                Err(error) => {
                    errors.push(from_syn_error(error));
                    None
                }
            },
        };

        if self.data.is_struct() && self.repr.is_some() {
            errors.push(Error::unknown_field("repr"));
        }
        if self.data.is_enum() && self.repr.is_none() {
            errors.push(Error::custom(
                "`repr` is required for enums, like `#[wirepack(repr = \"u8\")]`",
            ));
        }

        let variants = match &self.data {
            ast::Data::Enum(variants) => {
                if variants.is_empty() {
                    errors.push(Error::custom("enums without variants cannot be encoded"));
                }
                let fieldless = variants
                    .iter()
                    .all(|variant| matches!(variant.fields.style, ast::Style::Unit));
                variants
                    .iter()
                    .flat_map(
                        |variant| match variant.validate(repr.as_ref(), fieldless) {
                            Ok(data) => Some(data),
                            Err(error) => {
                                errors.push(error);
                                None
                            }
                        },
                    )
                    .collect()
            }
            ast::Data::Struct(fields) => match VariantData::from_struct(fields) {
                Ok(data) => vec![data],
                Err(error) => {
                    errors.push(error);
                    vec![]
                }
            },
        };

        if errors.is_empty() {
            Ok(ContainerData {
                ident,
                generics,
                crate_path,
                repr,
                variants,
            })
        } else {
            Err(Error::multiple(errors))
        }
    }
}

impl ContainerData {
    fn encode_impl(&self) -> TokenStream {
        let Self {
            ident, crate_path, ..
        } = self;
        let (impl_generics, ident_generics, where_clause) = self.generics.split_for_impl();
        let sink_binding = quote!(__wirepack_sink);

        let category = match &self.repr {
            Some(_) => quote!(#crate_path::Category::Enumeration),
            None => quote!(#crate_path::Category::Aggregate),
        };

        let variant_arm = self.variants.iter().map(|variant| {
            variant.encode_arm(self.repr.as_ref(), crate_path, &sink_binding)
        });

        let encoded_len = self.encoded_len();
        let id_check = self.id_check();

        quote! {
            #[allow(non_shorthand_field_patterns, unused_variables)]
            impl #impl_generics #crate_path::Encode for #ident #ident_generics
                #where_clause
            {
                const CATEGORY: #crate_path::Category = #category;
                const ENCODED_LEN: ::core::option::Option<usize> = #encoded_len;

                fn encode<S>(&self, #sink_binding: &mut S)
                    -> ::core::result::Result<(), #crate_path::Error>
                where
                    S: #crate_path::Sink + ?::core::marker::Sized,
                {
                    match self {
                        #( #variant_arm, )*
                    }
                }
            }

            #id_check
        }
    }

    fn encoded_len(&self) -> TokenStream {
        let crate_path = &self.crate_path;
        match &self.repr {
            // Structs: the sum of the fields, if they are all fixed.
            None => {
                let field_len = self
                    .variants
                    .iter()
                    .flat_map(|variant| &variant.fields)
                    .map(|field| field.encoded_len(crate_path));
                quote!(#crate_path::export::sum_lens(&[ #( #field_len ),* ]))
            }
            Some(repr) if self.variants.iter().all(|variant| variant.fields.is_empty()) => {
                quote!(<#repr as #crate_path::Encode>::ENCODED_LEN)
            }
            Some(_) => quote!(::core::option::Option::None),
        }
    }

    // Discriminants of a fieldless enum must survive the cast to `repr`.
    fn id_check(&self) -> Option<TokenStream> {
        let repr = self.repr.as_ref()?;
        if !self.generics.params.is_empty() {
            return None;
        }
        let ident = &self.ident;
        let checks = self
            .variants
            .iter()
            .filter(|variant| !variant.explicit_id)
            .filter_map(|variant| variant.ident.as_ref())
            .map(|variant| {
                let message = format!(
                    "the discriminant of `{}::{}` does not fit in the `repr` type",
                    ident, variant
                );
                quote! {
                    assert!((#ident::#variant as #repr) as i128 == #ident::#variant as i128, #message);
                }
            })
            .collect::<Vec<_>>();
        if checks.is_empty() {
            return None;
        }
        Some(quote! {
            const _: () = {
                #( #checks )*
            };
        })
    }
}

#[derive(FromVariant)]
#[darling(attributes(wirepack))]
struct VariantReceiver {
    ident: syn::Ident,
    fields: ast::Fields<FieldReceiver>,

    #[darling(default)]
    id: Option<syn::LitStr>,
}

struct VariantData {
    ident: Option<syn::Ident>,
    id_expr: Option<TokenStream>,
    explicit_id: bool,
    style: ast::Style,
    fields: Vec<FieldData>,
}

impl VariantReceiver {
    fn validate(&self, repr: Option<&syn::Type>, fieldless: bool) -> Result<VariantData, Error> {
        let mut errors = Vec::new();

        let ident = self.ident.clone();

        let id_expr = match (&self.id, repr) {
            (Some(lit), _) => match lit.parse::<TokenStream>() {
                Ok(expr) => Some(expr),
                Err(error) => {
                    errors.push(from_syn_error(error));
                    None
                }
            },
            (None, Some(repr)) if fieldless => Some(quote!(Self::#ident as #repr)),
            (None, Some(_)) => {
                errors.push(
                    Error::custom(
                        "variants need an explicit `id` unless every variant of the enum is a unit variant",
                    )
                    .with_span(&self.ident),
                );
                None
            }
            (None, None) => None,
        };

        let style = self.fields.style;

        let fields = self
            .fields
            .iter()
            .enumerate()
            .flat_map(|(index, field)| match field.validate(index) {
                Ok(field) => Some(field),
                Err(error) => {
                    errors.push(error);
                    None
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(VariantData {
                ident: Some(ident),
                id_expr,
                explicit_id: self.id.is_some(),
                style,
                fields,
            })
        } else {
            Err(Error::multiple(errors))
        }
    }
}

impl VariantData {
    fn from_struct(fields: &ast::Fields<FieldReceiver>) -> Result<VariantData, Error> {
        let mut errors = Vec::new();

        let style = fields.style;

        let fields = fields
            .iter()
            .enumerate()
            .flat_map(|(index, field)| match field.validate(index) {
                Ok(field) => Some(field),
                Err(error) => {
                    errors.push(error);
                    None
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(VariantData {
                ident: None,
                id_expr: None,
                explicit_id: false,
                style,
                fields,
            })
        } else {
            Err(Error::multiple(errors))
        }
    }

    fn encode_arm(
        &self,
        repr: Option<&syn::Type>,
        crate_path: &syn::Path,
        sink_binding: &TokenStream,
    ) -> TokenStream {
        let path = match &self.ident {
            Some(ident) => quote!(Self::#ident),
            None => quote!(Self),
        };

        let field_pat = self.fields.iter().map(|field| {
            let FieldData {
                stored_ident,
                public_ref_ident,
                ..
            } = field;
            match stored_ident {
                Some(stored_ident) => quote!(#stored_ident: #public_ref_ident),
                None => quote!(#public_ref_ident),
            }
        });
        let pat_fields = match self.style {
            ast::Style::Tuple => quote!( ( #( #field_pat, )* ) ),
            ast::Style::Struct => quote!( { #( #field_pat, )* } ),
            ast::Style::Unit => quote!(),
        };

        let id_encode_stmt = match (repr, &self.id_expr) {
            (Some(repr), Some(id_expr)) => Some(quote! {
                <#repr as #crate_path::Encode>::encode(&(#id_expr), #sink_binding)
                    .map_err(|e| #crate_path::Error::with_context("error encoding enum id", e))?;
            }),
            _ => None,
        };

        let field_encode_stmt = self
            .fields
            .iter()
            .filter_map(|field| field.encode_stmt(crate_path, sink_binding));

        quote! {
            #path #pat_fields => {
                #id_encode_stmt
                #( #field_encode_stmt )*
                ::core::result::Result::Ok(())
            }
        }
    }
}

#[derive(FromField)]
#[darling(attributes(wirepack))]
struct FieldReceiver {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    skip_if: Option<syn::LitStr>,

    #[darling(default)]
    with: Option<syn::Path>,

    #[darling(default)]
    encode_with: Option<syn::Path>,
}

struct FieldData {
    stored_ident: Option<syn::Ident>,
    public_ref_ident: syn::Ident,
    ty: syn::Type,
    encoder: Option<TokenStream>,
    skip: bool,
    skip_if: Option<TokenStream>,
}

impl FieldReceiver {
    fn validate(&self, index: usize) -> Result<FieldData, Error> {
        let mut errors = Vec::new();

        let stored_ident = self.ident.clone();
        let public_ref_ident = match &self.ident {
            Some(ident) => ident.clone(),
            None => format_ident!("field_{}", index),
        };

        let encoder = match (&self.encode_with, &self.with) {
            (None, None) => None,
            (Some(encode_with), None) => Some(quote!(#encode_with)),
            (None, Some(with)) => Some(quote!(#with::encode)),
            _ => {
                errors.push(Error::custom(
                    "`encode_with` and `with` are incompatible with each other",
                ));
                None
            }
        };

        let skip_if = match &self.skip_if {
            Some(lit) => match lit.parse::<TokenStream>() {
                Ok(expr) => Some(expr),
                Err(error) => {
                    errors.push(from_syn_error(error));
                    None
                }
            },
            None => None,
        };

        if self.skip && self.skip_if.is_some() {
            errors.push(Error::custom(
                "`skip` and `skip_if` are incompatible with each other",
            ));
        }

        if errors.is_empty() {
            Ok(FieldData {
                stored_ident,
                public_ref_ident,
                ty: self.ty.clone(),
                encoder,
                skip: self.skip,
                skip_if,
            })
        } else {
            Err(Error::multiple(errors))
        }
    }
}

impl FieldData {
    fn encoded_len(&self, crate_path: &syn::Path) -> TokenStream {
        let Self { ty, .. } = self;
        if self.skip {
            quote!(::core::option::Option::Some(0))
        } else if self.skip_if.is_some() || self.encoder.is_some() {
            quote!(::core::option::Option::None)
        } else {
            quote!(<#ty as #crate_path::Encode>::ENCODED_LEN)
        }
    }

    fn encode_stmt(
        &self,
        crate_path: &syn::Path,
        sink_binding: &TokenStream,
    ) -> Option<TokenStream> {
        if self.skip {
            return None;
        }
        let Self {
            public_ref_ident,
            ty,
            ..
        } = self;
        let encoder = match &self.encoder {
            Some(encoder) => encoder.clone(),
            None => quote!(<#ty as #crate_path::Encode>::encode),
        };
        let error_context = format!("error encoding field {}", public_ref_ident);
        let raw_encoder = quote! {
            #encoder(#public_ref_ident, #sink_binding)
                .map_err(|e| #crate_path::Error::with_context(#error_context, e))?;
        };
        Some(match &self.skip_if {
            Some(skip_if) => quote! {
                if !(#skip_if) {
                    #raw_encoder
                }
            },
            None => raw_encoder,
        })
    }
}

fn from_syn_error(err: syn::Error) -> Error {
    Error::custom(&err).with_span(&err.span())
}

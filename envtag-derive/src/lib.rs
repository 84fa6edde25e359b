//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// `EnvTag` derive macro
///
/// Implements `envtag::Record` and `envtag::EnvValue` for a struct with named
/// fields, so it can be passed to `envtag::bind` or nested inside another record.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to every variable name on this struct
///
/// **Field-level**:
/// - `#[env(name = "VAR")]` or `#[env("VAR")]`: Bind the field to `VAR`
/// - `#[env(skip)]`: Leave the field out of the record
///
/// Every field that is not skipped must implement `envtag::EnvValue`. Generic type
/// parameters get that bound added automatically.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(EnvTag, attributes(env))]
pub fn derive_envtag(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_input(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "EnvTag only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "EnvTag only supports structs with named fields",
            ));
        }
    };

    // One `Field::new(...)` per bindable field, in declaration order
    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.skip {
            continue;
        }

        let field_name = field_ident.unraw().to_string();
        let env_name = match struct_attrs.env_name(&attrs) {
            Some(name) => quote! { ::std::option::Option::Some(#name) },
            None => quote! { ::std::option::Option::None },
        };

        entries.push(quote! {
            ::envtag::Field::new(#field_name, #env_name, &mut self.#field_ident)
        });
    }

    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::envtag::EnvValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::envtag::Record for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envtag::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics ::envtag::EnvValue for #struct_name #ty_generics #where_clause {
            fn target(&mut self) -> ::envtag::Target<'_> {
                ::envtag::Target::Record(self)
            }
        }
    };

    Ok(expanded)
}

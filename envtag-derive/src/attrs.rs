//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from structs and their
//! fields during macro expansion.

use syn::{Attribute, DeriveInput, Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment variable bound to the field, before the struct prefix is applied.
    ///
    /// `None` or an empty string means the field is not bound.
    pub name: Option<String>,

    /// Leave the field out of the generated field list.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Accepts `#[env("VAR")]`, `#[env(name = "VAR")]` and `#[env(skip)]`.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&field.attrs) {
            // #[env("VAR")] shorthand
            if let Ok(name) = attr.parse_args::<LitStr>() {
                if attrs.name.is_some() {
                    return Err(syn::Error::new_spanned(name, "duplicate env attribute `name`"));
                }
                attrs.name = Some(name.value());
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    if attrs.name.is_some() {
                        return Err(meta.error("duplicate env attribute `name`"));
                    }
                    let name: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(name.value());
                    return Ok(());
                }

                // skip
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[env(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prepended to every non-empty variable name declared on the struct.
    pub prefix: Option<String>,
}

impl StructAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&input.attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    if attrs.prefix.is_some() {
                        return Err(meta.error("duplicate env attribute `prefix`"));
                    }
                    let prefix: LitStr = meta.value()?.parse()?;
                    attrs.prefix = Some(prefix.value());
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(attrs)
    }

    /// Full environment variable name for a field, or `None` if it is unbound.
    pub fn env_name(&self, field: &FieldAttrs) -> Option<String> {
        match field.name.as_deref() {
            None | Some("") => None,
            Some(name) => Some(format!("{}{}", self.prefix.as_deref().unwrap_or(""), name)),
        }
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}

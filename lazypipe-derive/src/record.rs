//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module contains the procedural macro implementation that generates
//! name-based field lookup for struct fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input, parse_quote};

/// Main implementation of the Record derive macro.
pub fn derive_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    TokenStream::from(expand(&input).unwrap_or_else(syn::Error::into_compile_error))
}

/// A field as it is exposed to lookups.
struct RecordField<'a> {
    field: &'a Field,
    name: String,
}

/// Reads the `#[record(...)]` attributes of a field.
///
/// Returns `None` for skipped fields.
fn record_field(field: &Field) -> syn::Result<Option<RecordField<'_>>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record fields must be named"))?;

    let mut name = ident.to_string();
    let mut skip = false;

    for attribute in field.attrs.iter().filter(|attribute| attribute.path().is_ident("record")) {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let renamed: LitStr = meta.value()?.parse()?;
                name = renamed.value();
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `skip` or `rename`"))
            }
        })?;
    }

    Ok((!skip).then_some(RecordField { field, name }))
}

/// Generates the `Record` implementation for a derive input.
fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named_fields) => &named_fields.named,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields, not tuple structs.",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record cannot be derived for unit structs (structs with no fields).",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs, not enums.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(name, "Record cannot be derived for unions."));
        }
    };

    let record_fields = fields
        .iter()
        .map(record_field)
        .collect::<syn::Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    let mut seen = std::collections::HashSet::new();
    for record_field in &record_fields {
        if !seen.insert(record_field.name.as_str()) {
            return Err(syn::Error::new_spanned(
                record_field.field,
                format!("duplicate record field name `{}`", record_field.name),
            ));
        }
    }

    let arms = record_fields.iter().map(|record_field| {
        let ident = &record_field.field.ident;
        let field_name = &record_field.name;
        quote! {
            #field_name => ::lazypipe::record::encode_field(name, &self.#ident),
        }
    });

    let mut generics = input.generics.clone();
    {
        let where_clause = generics.make_where_clause();
        for record_field in &record_fields {
            let field_type = &record_field.field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#field_type: ::lazypipe::__private::Serialize));
        }
    }
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::lazypipe::record::Record for #name #type_generics #where_clause {
            fn field(
                &self,
                name: &str,
            ) -> ::lazypipe::Result<::lazypipe::record::Value> {
                match name {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::lazypipe::PipelineError::missing_field::<Self>(name),
                    ),
                }
            }
        }
    })
}

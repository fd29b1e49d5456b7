//! Derive macro for the default structured representation of a type.
//!
//! `#[derive(LogFields)]` implements `funclog::loggable::LogFields` by adding every field of a
//! struct to a `Builder`, in declaration order. Named fields are keyed by their name, tuple
//! fields by their index.
//!
//! ```rust,ignore
//! use funclog::prelude::*;
//!
//! #[derive(LogFields)]
//! struct Endpoint {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Loggable for Endpoint {}
//! // logs as {host=localhost, port=8080}
//! ```
//!
//! Every field type must convert through `funclog::arg::IntoArg` when borrowed. For generic
//! structs the derive adds a `for<'x> &'x F: IntoArg<'x>` bound for each field type `F` that
//! names a type parameter.

// crate-specific lint exceptions:
//#![allow()]

use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Index, Type, parse_macro_input, parse_quote, spanned::Spanned};

#[proc_macro_derive(LogFields)]
pub fn derive_log_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "LogFields can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "LogFields can only be derived for structs",
            ));
        }
    };

    let entries: Vec<TokenStream2> = match &data.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .map(|ident| {
                let key = ident.to_string();
                quote! { .with(#key, &self.#ident) }
            })
            .collect(),
        Fields::Unnamed(fields) => (0..fields.unnamed.len())
            .map(|idx| {
                let key = idx.to_string();
                let index = Index::from(idx);
                quote! { .with(#key, &self.#index) }
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let type_params: Vec<&Ident> = input.generics.type_params().map(|p| &p.ident).collect();
    let mut generics = input.generics.clone();
    if !type_params.is_empty() {
        let where_clause = generics.make_where_clause();
        for field in &data.fields {
            if mentions_any(&field.ty, &type_params) {
                let ty = &field.ty;
                where_clause
                    .predicates
                    .push(parse_quote!(for<'__x> &'__x #ty: ::funclog::arg::IntoArg<'__x>));
            }
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::funclog::loggable::LogFields for #name #ty_generics #where_clause {
            fn log_fields(&self) -> ::funclog::loggable::Builder {
                ::funclog::loggable::Builder::new() #(#entries)*
            }
        }
    })
}

// true when `ty` names one of the struct's type parameters
fn mentions_any(ty: &Type, params: &[&Ident]) -> bool {
    fn walk(tokens: TokenStream2, params: &[&Ident]) -> bool {
        tokens.into_iter().any(|tt| match tt {
            TokenTree::Ident(ident) => params.iter().any(|p| **p == ident),
            TokenTree::Group(group) => walk(group.stream(), params),
            _ => false,
        })
    }
    walk(ty.to_token_stream(), params)
}

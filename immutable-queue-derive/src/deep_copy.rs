//! Implementation of the `#[derive(DeepCopy)]` macro.
//!
//! This module contains the procedural macro implementation that generates
//! field-by-field `DeepCopy` implementations for structs and enums.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Data, DataEnum, DeriveInput, Fields, GenericParam, Generics, Ident, Index, parse_macro_input,
    parse_quote,
};

/// Main implementation of the `DeepCopy` derive macro.
pub fn derive_deep_copy_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let body = match &input.data {
        Data::Struct(data_struct) => copy_struct_body(&data_struct.fields),
        Data::Enum(data_enum) => copy_enum_body(data_enum),
        Data::Union(_) => {
            return TokenStream::from(
                syn::Error::new_spanned(&input.ident, "DeepCopy cannot be derived for unions.")
                    .to_compile_error(),
            );
        }
    };

    let generics = add_deep_copy_bounds(input.generics.clone());
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::immutable_queue::copy::DeepCopy for #name #type_generics #where_clause {
            fn deep_copy(
                &self,
            ) -> ::core::result::Result<Self, ::immutable_queue::copy::CopyError> {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Adds a `DeepCopy` bound to every type parameter.
fn add_deep_copy_bounds(mut generics: Generics) -> Generics {
    for parameter in &mut generics.params {
        if let GenericParam::Type(type_parameter) = parameter {
            type_parameter
                .bounds
                .push(parse_quote!(::immutable_queue::copy::DeepCopy));
        }
    }
    generics
}

/// Generates the body copying a struct's fields.
fn copy_struct_body(fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named_fields) => {
            let copies = named_fields.named.iter().map(|field| {
                let field_name = &field.ident;
                quote! {
                    #field_name: ::immutable_queue::copy::DeepCopy::deep_copy(&self.#field_name)?
                }
            });
            quote! { ::core::result::Result::Ok(Self { #(#copies),* }) }
        }
        Fields::Unnamed(unnamed_fields) => {
            let copies = (0..unnamed_fields.unnamed.len()).map(|position| {
                let index = Index::from(position);
                quote! { ::immutable_queue::copy::DeepCopy::deep_copy(&self.#index)? }
            });
            quote! { ::core::result::Result::Ok(Self(#(#copies),*)) }
        }
        Fields::Unit => quote! { ::core::result::Result::Ok(Self) },
    }
}

/// Generates the body copying whichever variant `self` holds.
fn copy_enum_body(data_enum: &DataEnum) -> TokenStream2 {
    if data_enum.variants.is_empty() {
        return quote! { match *self {} };
    }

    let arms = data_enum
        .variants
        .iter()
        .map(|variant| copy_variant_arm(&variant.ident, &variant.fields));

    quote! {
        match self {
            #(#arms)*
        }
    }
}

/// Generates the match arm for a single enum variant.
fn copy_variant_arm(variant_name: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        // Unit variant: e.g., `Empty`
        Fields::Unit => quote! {
            Self::#variant_name => ::core::result::Result::Ok(Self::#variant_name),
        },

        // Tuple variant: e.g., `Pair(A, B)`
        Fields::Unnamed(unnamed_fields) => {
            let bindings: Vec<Ident> = (0..unnamed_fields.unnamed.len())
                .map(|position| format_ident!("field_{}", position))
                .collect();
            quote! {
                Self::#variant_name(#(#bindings),*) => ::core::result::Result::Ok(
                    Self::#variant_name(
                        #(::immutable_queue::copy::DeepCopy::deep_copy(#bindings)?),*
                    )
                ),
            }
        }

        // Struct variant: e.g., `Moved { from: A, to: B }`
        Fields::Named(named_fields) => {
            let field_names: Vec<&Ident> = named_fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .collect();
            quote! {
                Self::#variant_name { #(#field_names),* } => ::core::result::Result::Ok(
                    Self::#variant_name {
                        #(#field_names: ::immutable_queue::copy::DeepCopy::deep_copy(#field_names)?),*
                    }
                ),
            }
        }
    }
}

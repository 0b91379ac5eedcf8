use crate::derives::{merge_derives, parse_bool, parse_key_values};
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{Fields, Item, ItemStruct, parse_macro_input};

/// #[entity_id] 宏实现
///
/// 仅支持单字段元组结构体，生成的类型满足 `Identifier`：
/// - 派生 Clone、PartialEq、Eq、PartialOrd、Ord、Hash、Serialize、Deserialize，
///   以及 Debug（`debug = false` 时跳过）
/// - `new(value)`、Display、FromStr（委托内部类型）、AsRef 与双向 From
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityIdConfig);
    let input = parse_macro_input!(item as Item);

    let st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] only on struct")
                .to_compile_error()
                .into();
        }
    };

    match build(cfg, st) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn build(cfg: EntityIdConfig, mut st: ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let inner_ty = match &st.fields {
        Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        other => {
            return Err(syn::Error::new(
                other.span(),
                "#[entity_id] requires a tuple struct with exactly one field, e.g. struct X(String);",
            ));
        }
    };

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(PartialOrd),
        syn::parse_quote!(Ord),
        syn::parse_quote!(Hash),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.debug {
        required.insert(0, syn::parse_quote!(Debug));
    }
    merge_derives(&mut st.attrs, required)?;

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new(value: #inner_ty) -> Self {
                Self(value)
            }

            pub fn into_inner(self) -> #inner_ty {
                self.0
            }
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                s.parse::<#inner_ty>().map(Self)
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::core::convert::AsRef<#inner_ty> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner_ty {
                &self.0
            }
        }

        impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
            fn from(value: #inner_ty) -> Self {
                Self(value)
            }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: #ident #ty_generics) -> Self {
                value.0
            }
        }
    })
}

struct EntityIdConfig {
    debug: bool,
}

impl Parse for EntityIdConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut cfg = Self { debug: true };
        for kv in parse_key_values(input)? {
            if kv.key != "debug" {
                return Err(syn::Error::new(
                    kv.key.span(),
                    "unknown key in attribute; expected 'debug'",
                ));
            }
            cfg.debug = parse_bool(&kv.key, &kv.value)?;
        }
        Ok(cfg)
    }
}

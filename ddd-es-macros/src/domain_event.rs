use crate::derives::{merge_derives, parse_key_values};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{Attribute, Fields, Ident, Item, ItemEnum, LitInt, LitStr, Variant, parse_macro_input};

/// #[domain_event] 宏实现
/// - 仅支持具名字段变体与单元变体，不注入任何字段
/// - 派生 Debug、Clone、PartialEq、Serialize、Deserialize
/// - 生成 `::ddd_es_domain::domain_event::DomainEvent` 实现
///   （event_type 默认 `Enum.Variant`，event_version 默认取枚举级 `version`）
/// - 变体覆写：`#[event(event_type = "...", event_version = N)]`
/// - 字段标记：`#[event(entity_id)]`，每个变体至多一个
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventConfig);
    let input = parse_macro_input!(item as Item);

    let enum_item = match input {
        Item::Enum(e) => e,
        other => {
            return syn::Error::new(
                other.span(),
                "#[domain_event] can only be used on enum types",
            )
            .to_compile_error()
            .into();
        }
    };

    match build(cfg, enum_item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// 单个变体解析出的事件信息
struct VariantSpec {
    ident: Ident,
    event_type: LitStr,
    event_version: LitInt,
    entity_field: Option<Ident>,
}

fn build(cfg: EventConfig, mut enum_item: ItemEnum) -> syn::Result<TokenStream2> {
    merge_derives(
        &mut enum_item.attrs,
        vec![
            syn::parse_quote!(Debug),
            syn::parse_quote!(Clone),
            syn::parse_quote!(PartialEq),
            syn::parse_quote!(serde::Serialize),
            syn::parse_quote!(serde::Deserialize),
        ],
    )?;

    let enum_name = enum_item.ident.to_string();
    let default_version = cfg
        .version
        .unwrap_or_else(|| LitInt::new("1", proc_macro2::Span::call_site()));

    let specs = enum_item
        .variants
        .iter_mut()
        .map(|v| variant_spec(&enum_name, &default_version, v))
        .collect::<syn::Result<Vec<_>>>()?;

    let type_arms = specs.iter().map(|s| {
        let (ident, lit) = (&s.ident, &s.event_type);
        quote! { Self::#ident { .. } => #lit }
    });
    let version_arms = specs.iter().map(|s| {
        let (ident, lit) = (&s.ident, &s.event_version);
        quote! { Self::#ident { .. } => #lit }
    });
    let entity_arms = specs.iter().map(|s| {
        let ident = &s.ident;
        match &s.entity_field {
            Some(field) => quote! {
                Self::#ident { #field, .. } => ::std::option::Option::Some(::std::string::ToString::to_string(#field))
            },
            None => quote! { Self::#ident { .. } => ::std::option::Option::None },
        }
    });

    let enum_ident = &enum_item.ident;
    let (impl_generics, ty_generics, where_clause) = enum_item.generics.split_for_impl();

    Ok(quote! {
        #enum_item

        impl #impl_generics ::ddd_es_domain::domain_event::DomainEvent for #enum_ident #ty_generics #where_clause {
            fn event_type(&self) -> &'static str {
                match self { #( #type_arms, )* }
            }

            fn event_version(&self) -> usize {
                match self { #( #version_arms, )* }
            }

            fn entity_id(&self) -> ::std::option::Option<::std::string::String> {
                match self { #( #entity_arms, )* }
            }
        }
    })
}

fn variant_spec(enum_name: &str, default_version: &LitInt, v: &mut Variant) -> syn::Result<VariantSpec> {
    let mut event_type = None;
    let mut event_version = None;

    let mut retained = Vec::with_capacity(v.attrs.len());
    for attr in v.attrs.drain(..) {
        if !attr.path().is_ident("event") {
            retained.push(attr);
            continue;
        }
        for kv in attr.parse_args_with(parse_key_values)? {
            match kv.key.to_string().as_str() {
                "event_type" if event_type.is_none() => {
                    event_type = Some(syn::parse2::<LitStr>(quote_expr(&kv.value))?);
                }
                "event_version" if event_version.is_none() => {
                    event_version = Some(syn::parse2::<LitInt>(quote_expr(&kv.value))?);
                }
                "event_type" | "event_version" => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        format!("duplicate '{}' specified for this variant", kv.key),
                    ));
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key; expected 'event_type' | 'event_version'",
                    ));
                }
            }
        }
    }
    v.attrs = retained;

    let entity_field = match &mut v.fields {
        Fields::Named(named) => {
            let mut marked = None;
            for field in named.named.iter_mut() {
                if take_entity_marker(&mut field.attrs)? {
                    if marked.is_some() {
                        return Err(syn::Error::new(
                            field.span(),
                            "only one field per variant may be marked #[event(entity_id)]",
                        ));
                    }
                    marked = field.ident.clone();
                }
            }
            marked
        }
        Fields::Unit => None,
        Fields::Unnamed(f) => {
            return Err(syn::Error::new(
                f.span(),
                "#[domain_event] supports only named-field or unit variants",
            ));
        }
    };

    let ident = v.ident.clone();
    Ok(VariantSpec {
        event_type: event_type
            .unwrap_or_else(|| LitStr::new(&format!("{enum_name}.{ident}"), ident.span())),
        event_version: event_version.unwrap_or_else(|| default_version.clone()),
        entity_field,
        ident,
    })
}

/// 移除字段上的 `#[event(entity_id)]`，返回是否存在该标记
fn take_entity_marker(attrs: &mut Vec<Attribute>) -> syn::Result<bool> {
    let mut found = false;
    let mut retained = Vec::with_capacity(attrs.len());
    for attr in attrs.drain(..) {
        if !attr.path().is_ident("event") {
            retained.push(attr);
            continue;
        }
        let marker: Ident = attr.parse_args()?;
        if marker != "entity_id" {
            return Err(syn::Error::new(
                marker.span(),
                "unknown field marker; expected #[event(entity_id)]",
            ));
        }
        found = true;
    }
    *attrs = retained;
    Ok(found)
}

fn quote_expr(expr: &syn::Expr) -> TokenStream2 {
    quote!(#expr)
}

struct EventConfig {
    version: Option<LitInt>,
}

impl Parse for EventConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut version = None;
        for kv in parse_key_values(input)? {
            if kv.key != "version" {
                return Err(syn::Error::new(
                    kv.key.span(),
                    "unknown key; expected 'version'",
                ));
            }
            version = Some(syn::parse2::<LitInt>(quote_expr(&kv.value))?);
        }
        Ok(Self { version })
    }
}

use crate::derives::{merge_derives, parse_bool};
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Field, Fields, Item, ItemStruct, Token, Type, parse_macro_input};

/// #[entity] 宏实现
/// - 注入私有的 `id: IdType` 字段并置于最前；已声明 `id` 时沿用其类型，可见性同样改为私有
/// - 默认派生 Debug、Clone，`debug = false` 时不派生 Debug
/// - 实现 `::ddd_es_domain::entity::Entity`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EntityConfig);
    let input = parse_macro_input!(item as Item);

    let st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    match build(cfg, st) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn build(cfg: EntityConfig, mut st: ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let id_ty = cfg.id_ty.unwrap_or_else(|| syn::parse_quote!(String));

    let fields = match &mut st.fields {
        Fields::Named(named) => named,
        other => {
            return Err(syn::Error::new(
                other.span(),
                "#[entity] only supports named-field structs",
            ));
        }
    };

    // id 放在最前，其余字段保持原有相对顺序
    let mut reordered: Punctuated<Field, Token![,]> = Punctuated::new();
    let mut rest = Vec::new();
    let mut declared_id = None;
    for field in fields.named.iter().cloned() {
        if field.ident.as_ref().is_some_and(|i| i == "id") {
            declared_id = Some(field);
        } else {
            rest.push(field);
        }
    }
    // 标识只在实体所在模块内可写，外部只能经 `Entity::id` 读取
    let id_field = match declared_id {
        Some(mut field) => {
            field.vis = syn::Visibility::Inherited;
            field
        }
        None => syn::parse_quote!(id: #id_ty),
    };
    let entity_id_ty = id_field.ty.clone();
    reordered.push(id_field);
    reordered.extend(rest);
    fields.named = reordered;

    let mut required = vec![syn::parse_quote!(Clone)];
    if cfg.debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    merge_derives(&mut st.attrs, required)?;

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    Ok(quote! {
        #st

        impl #impl_generics ::ddd_es_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #entity_id_ty;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    })
}

struct EntityConfig {
    id_ty: Option<Type>,
    debug: Option<bool>,
}

impl Parse for EntityConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut cfg = Self {
            id_ty: None,
            debug: None,
        };

        // id 的取值是类型（可能带泛型参数），单独解析
        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            let _: Token![=] = input.parse()?;
            match key.to_string().as_str() {
                "id" if cfg.id_ty.is_none() => cfg.id_ty = Some(input.parse()?),
                "debug" if cfg.debug.is_none() => {
                    let value: syn::Expr = input.parse()?;
                    cfg.debug = Some(parse_bool(&key, &value)?);
                }
                "id" | "debug" => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("duplicate key '{key}' in attribute"),
                    ));
                }
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "unknown key in attribute; expected 'id' or 'debug'",
                    ));
                }
            }
            if input.is_empty() {
                break;
            }
            let _: Token![,] = input.parse()?;
        }

        Ok(cfg)
    }
}

use quote::ToTokens;
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token};

/// 将宏要求的派生与用户已写的 `#[derive(..)]` 合并为一个属性，放在最前。
///
/// 去重按末段名比较，`Serialize` 与 `serde::Serialize` 视为同一项；
/// 其余属性保持原有顺序。
pub(crate) fn merge_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) -> syn::Result<()> {
    let mut others = Vec::with_capacity(attrs.len());
    let mut user_derives = Vec::new();

    for attr in attrs.drain(..) {
        if attr.path().is_ident("derive") {
            let list = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
            user_derives.extend(list);
        } else {
            others.push(attr);
        }
    }

    let mut seen = HashSet::new();
    let merged: Vec<Path> = required
        .into_iter()
        .chain(user_derives)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    attrs.push(syn::parse_quote!(#[derive(#(#merged),*)]));
    attrs.extend(others);
    Ok(())
}

fn derive_key(path: &Path) -> String {
    match path.segments.last() {
        Some(last) => last.ident.to_string(),
        None => path.to_token_stream().to_string(),
    }
}

/// 解析 `key = true|false`
pub(crate) fn parse_bool(key: &syn::Ident, value: &syn::Expr) -> syn::Result<bool> {
    match value {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Bool(b),
            ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("expected boolean literal for '{key}'"),
        )),
    }
}

/// `key = value` 形式的宏参数
pub(crate) struct KeyValue {
    pub(crate) key: syn::Ident,
    pub(crate) value: syn::Expr,
}

impl syn::parse::Parse for KeyValue {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let key = input.parse()?;
        let _: Token![=] = input.parse()?;
        let value = input.parse()?;
        Ok(Self { key, value })
    }
}

/// 解析逗号分隔的 `key = value` 列表，拒绝重复的键
pub(crate) fn parse_key_values(input: syn::parse::ParseStream) -> syn::Result<Vec<KeyValue>> {
    let pairs = Punctuated::<KeyValue, Token![,]>::parse_terminated(input)?;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(pairs.len());
    for kv in pairs {
        if !seen.insert(kv.key.to_string()) {
            return Err(syn::Error::new(
                kv.key.span(),
                format!("duplicate key '{}' in attribute", kv.key),
            ));
        }
        out.push(kv);
    }
    Ok(out)
}

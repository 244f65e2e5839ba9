use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Expr, ExprLit, Fields,
    GenericParam, Generics, Lit, LitStr, Meta, Visibility,
};

/// Derive macro for structure field descriptors.
///
/// Implements `structure::Structure` (the field table) and `structure::Reflect`
/// (so the type can be converted, or nested inside another structure).
///
/// Only `pub` fields are exported. Other fields are listed in the table but
/// never read, so their types need not implement `Reflect`.
///
/// # Example
///
/// ```ignore
/// #[derive(Structure)]
/// pub struct Server {
///     #[structure = "server_name"]
///     pub name: String,
///
///     #[structure(flatten)]
///     pub limits: Limits,
///
///     #[structure(skip)]
///     pub password: String,
///
///     secret: u64,
/// }
/// ```
///
/// Supported field options: `key = "..."` (same as `#[structure = "..."]`),
/// `flatten`, `skip`. The attribute is only accepted on fields.
///
/// Exported field types must implement `structure::Reflect`: `bool`, integers
/// up to 128 bits, `f32`, `f64`, `char`, `str`/`String`, `Vec<T>`, `[T]`,
/// `[T; N]`, `Option<T>`, `HashMap<String, T>`, `BTreeMap<String, T>`,
/// `&T`/`&mut T`/`Box<T>`/`Rc<T>`/`Arc<T>`, and other derived structures.
/// Tuples and `()` are not supported; keep such fields non-`pub` or
/// `#[structure(skip)]`.
#[proc_macro_derive(Structure, attributes(structure))]
pub fn derive_structure(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    if let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("structure")) {
        return Err(syn::Error::new_spanned(
            attr,
            "#[structure] is a field attribute, not allowed on the struct",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Structure only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Structure only supports structs",
            ))
        }
    };

    let mut field_tokens: Vec<proc_macro2::TokenStream> = Vec::with_capacity(fields.len());

    for field in fields {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = field_name.unraw().to_string();
        let opts = parse_field_options(&field.attrs)?;

        let key_expr = match &opts.key {
            Some(key) => quote! { ::core::option::Option::Some(#key) },
            None => quote! { ::core::option::Option::None },
        };

        let exported = matches!(field.vis, Visibility::Public(_)) && !opts.skip;
        let flatten = opts.flatten;

        if exported {
            field_tokens.push(quote! {
                ::structure::Field::exported(#field_name_str, #key_expr, #flatten, &self.#field_name)
            });
        } else {
            field_tokens.push(quote! {
                ::structure::Field::hidden(#field_name_str, #key_expr)
            });
        }
    }

    let generics = add_reflect_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::structure::Structure for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #name_str
            }

            fn fields(&self) -> ::std::vec::Vec<::structure::Field<'_>> {
                ::std::vec![
                    #(#field_tokens),*
                ]
            }
        }

        impl #impl_generics ::structure::Reflect for #name #ty_generics #where_clause {
            fn kind(&self) -> ::structure::Kind {
                ::structure::Kind::Struct
            }

            fn as_structure(&self) -> ::core::option::Option<&dyn ::structure::Structure> {
                ::core::option::Option::Some(self)
            }

            fn to_value(&self) -> ::structure::Value<'_> {
                ::structure::Value::Map(::structure::convert::structure_map(self))
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

#[derive(Default)]
struct FieldOptions {
    key: Option<String>,
    flatten: bool,
    skip: bool,
}

/// Parse `#[structure = "..."]` and `#[structure(...)]` on a single field.
fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions, syn::Error> {
    let mut opts = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("structure") {
            continue;
        }
        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => {
                    opts.key = Some(s.value());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected string literal, e.g. #[structure = \"key\"]",
                    ))
                }
            },
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("key") {
                        let value: LitStr = meta.value()?.parse()?;
                        opts.key = Some(value.value());
                    } else if meta.path.is_ident("flatten") {
                        opts.flatten = true;
                    } else if meta.path.is_ident("skip") {
                        opts.skip = true;
                    } else {
                        return Err(meta.error(
                            "unknown structure option (expected 'key', 'flatten' or 'skip')",
                        ));
                    }
                    Ok(())
                })?;
            }
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected #[structure = \"key\"] or #[structure(...)]",
                ))
            }
        }
    }

    Ok(opts)
}

fn add_reflect_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::structure::Reflect));
        }
    }
    generics
}

//! Procedural macros for interactable

use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Event types a fixed `#[event(kind = "...")]` may name
const KNOWN_KINDS: &[&str] = &["click", "keydown", "keyup", "touchstart", "touchend"];

/// Container-level attributes for #[derive(InteractionEvent)]
#[derive(FromDeriveInput)]
#[darling(attributes(event), supports(struct_named))]
struct EventOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), EventField>,

    /// Fixed event type for every value of the struct
    #[darling(default)]
    kind: Option<String>,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(event))]
struct EventField {
    ident: Option<syn::Ident>,

    /// Holds the DOM event type (`AsRef<str>`)
    #[darling(default)]
    kind: bool,

    /// Holds the key value (see `AsEventKey`)
    #[darling(default)]
    key: bool,

    #[darling(default)]
    ctrl: bool,

    #[darling(default)]
    meta: bool,

    #[darling(default)]
    shift: bool,
}

/// Fields picked for each role, at most one per role
#[derive(Default)]
struct Roles<'a> {
    kind: Option<&'a syn::Ident>,
    key: Option<&'a syn::Ident>,
    ctrl: Option<&'a syn::Ident>,
    meta: Option<&'a syn::Ident>,
    shift: Option<&'a syn::Ident>,
}

fn assign<'a>(
    slot: &mut Option<&'a syn::Ident>,
    ident: &'a syn::Ident,
    role: &str,
) -> Result<(), syn::Error> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(
            ident,
            format!("more than one field marked #[event({role})]"),
        ));
    }
    *slot = Some(ident);
    Ok(())
}

fn collect_roles(fields: &[EventField]) -> Result<Roles<'_>, syn::Error> {
    let mut roles = Roles::default();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if field.kind {
            assign(&mut roles.kind, ident, "kind")?;
        }
        if field.key {
            assign(&mut roles.key, ident, "key")?;
        }
        if field.ctrl {
            assign(&mut roles.ctrl, ident, "ctrl")?;
        }
        if field.meta {
            assign(&mut roles.meta, ident, "meta")?;
        }
        if field.shift {
            assign(&mut roles.shift, ident, "shift")?;
        }
    }
    Ok(roles)
}

fn flag_method(name: TokenStream2, field: Option<&syn::Ident>) -> TokenStream2 {
    match field {
        Some(field) => quote! {
            fn #name(&self) -> bool {
                self.#field
            }
        },
        None => TokenStream2::new(),
    }
}

/// Derive macro for the InteractionEvent trait
///
/// Marks which fields of a struct carry the event type, key and modifier state.
/// Unmarked roles fall back to the trait defaults (no key, no modifiers).
///
/// - `#[event(kind)]`: the event type, any `AsRef<str>` field
/// - `#[event(key)]`: the key, a `String`, `&str`, `char` or an `Option` of those
/// - `#[event(ctrl)]`, `#[event(meta)]`, `#[event(shift)]`: `bool` modifier flags
///
/// A struct that always represents one event type can name it on the container
/// instead of carrying a kind field.
///
/// # Example
/// ```ignore
/// #[derive(InteractionEvent)]
/// struct KeyPress {
///     #[event(kind)]
///     kind: String,
///     #[event(key)]
///     key: Option<String>,
///     #[event(ctrl)]
///     ctrl: bool,
///     #[event(shift)]
///     shift: bool,
///     timestamp: u64,
/// }
///
/// #[derive(InteractionEvent)]
/// #[event(kind = "click")]
/// struct Tap {
///     x: u16,
///     y: u16,
/// }
/// ```
#[proc_macro_derive(InteractionEvent, attributes(event))]
pub fn derive_interaction_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand_interaction_event(&input))
}

/// Expansion of #[derive(InteractionEvent)], errors rendered as `compile_error!`
fn expand_interaction_event(input: &DeriveInput) -> TokenStream2 {
    let opts = match EventOpts::from_derive_input(input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors(),
    };

    match impl_interaction_event(input, &opts) {
        Ok(expanded) => expanded,
        Err(e) => e.to_compile_error(),
    }
}

fn impl_interaction_event(
    input: &DeriveInput,
    opts: &EventOpts,
) -> Result<TokenStream2, syn::Error> {
    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "InteractionEvent can only be derived for structs with named fields",
            ));
        }
    };

    let roles = collect_roles(fields)?;

    let event_type = match (&opts.kind, roles.kind) {
        (Some(_), Some(field)) => {
            return Err(syn::Error::new_spanned(
                field,
                "#[event(kind)] field conflicts with #[event(kind = \"...\")] on the struct",
            ));
        }
        (Some(kind), None) => {
            if !KNOWN_KINDS.contains(&kind.as_str()) {
                return Err(syn::Error::new_spanned(
                    input,
                    format!(
                        "unknown event kind {kind:?}, expected one of {}",
                        KNOWN_KINDS.join(", ")
                    ),
                ));
            }
            quote! { #kind }
        }
        (None, Some(field)) => quote! {
            ::core::convert::AsRef::<str>::as_ref(&self.#field)
        },
        (None, None) => {
            return Err(syn::Error::new_spanned(
                input,
                "InteractionEvent needs a field marked #[event(kind)] \
                 or #[event(kind = \"...\")] on the struct",
            ));
        }
    };

    let key_method = match roles.key {
        Some(field) => quote! {
            fn key(&self) -> ::core::option::Option<::std::borrow::Cow<'_, str>> {
                ::interactable::AsEventKey::as_event_key(&self.#field)
            }
        },
        None => TokenStream2::new(),
    };
    let ctrl_method = flag_method(quote!(ctrl_key), roles.ctrl);
    let meta_method = flag_method(quote!(meta_key), roles.meta);
    let shift_method = flag_method(quote!(shift_key), roles.shift);

    Ok(quote! {
        impl #impl_generics ::interactable::InteractionEvent for #name #ty_generics #where_clause {
            fn event_type(&self) -> &str {
                #event_type
            }

            #key_method
            #ctrl_method
            #meta_method
            #shift_method
        }
    })
}

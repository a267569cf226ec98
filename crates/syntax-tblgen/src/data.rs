//! Emits the validating data type of each node kind.
//!
//! The constructor checks the raw layout against the schema and panics on a
//! mismatch. Such a tree can only come from a buggy producer or from code
//! generated for a different schema.

use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};

use crate::layout::{NodeLayout, SlotShape};

/// Check that `raw` is a token of `kind`, spelled `spelling` when it has one.
pub fn token_check(raw: TokenStream, kind: &str, spelling: Option<&str>) -> TokenStream {
    match spelling {
        Some(spelling) => quote! {
            syntax_assert_token_is(#raw, TokenKind::new(#kind), #spelling);
        },
        None => quote! {
            syntax_assert_token_kind(#raw, TokenKind::new(#kind));
        },
    }
}

pub fn generate_data_interface(layout: &NodeLayout) -> TokenStream {
    data_interface(layout.name(), &layout.view_ident(), &layout.data_ident())
}

/// The data struct wrapping validated storage for the view `view`.
pub fn data_interface(name: &str, view: &Ident, data: &Ident) -> TokenStream {
    let doc = format!("Validated backing data of [`{name}`].");

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        pub struct #data(Arc<SyntaxData>);

        impl #data {
            pub fn data(&self) -> &Arc<SyntaxData> {
                &self.0
            }

            pub fn into_data(self) -> Arc<SyntaxData> {
                self.0
            }
        }

        impl From<#data> for #view {
            fn from(data: #data) -> Self {
                Self {
                    syntax: Syntax::from_data(data.0),
                }
            }
        }
    }
}

pub fn generate_data_implementation(layout: &NodeLayout) -> TokenStream {
    let view = layout.view_ident();
    let data = layout.data_ident();
    let cursor = layout.cursor_ident();
    let arity = Literal::usize_unsuffixed(layout.children().len());

    let checks = layout.children().iter().map(|slot| {
        let variant = slot.variant_ident();
        let child = quote!(raw.child(#cursor::#variant.index()));
        match slot.shape() {
            SlotShape::Token { kind, spelling } => token_check(child, kind, spelling.as_deref()),
            SlotShape::Node {
                kind,
                category,
                missing,
            } => {
                let nested = format_ident!("{}", kind);
                let category = format_ident!("{}", category.name());
                quote! {
                    syntax_assert_child_is::<#nested>(#child, SyntaxKind::new(#missing, Category::#category));
                }
            }
        }
    });

    let blanks = layout.children().iter().map(|slot| match slot.shape() {
        SlotShape::Token { kind, spelling } => {
            let text = spelling.as_deref().unwrap_or_default();
            quote!(RawSyntax::missing_token(TokenKind::new(#kind), #text))
        }
        SlotShape::Node {
            category, missing, ..
        } => {
            let category = format_ident!("{}", category.name());
            quote!(RawSyntax::missing(SyntaxKind::new(#missing, Category::#category)))
        }
    });

    let blank = quote! {
        RawSyntax::make(
            #view::KIND,
            vec![#(#blanks),*],
            SourcePresence::Present,
        )
    };
    constructors(
        &data,
        quote! {
            assert!(
                raw.kind() == #view::KIND,
                "expected {} node, found {}",
                #view::KIND,
                raw.kind(),
            );
            assert!(
                raw.layout().len() == #arity,
                "{} expects {} children, found {}",
                #view::KIND,
                #arity,
                raw.layout().len(),
            );
            #(#checks)*
        },
        blank,
    )
}

/// `validate`, the private constructor running it, `make` and `make_blank`.
pub fn constructors(data: &Ident, checks: TokenStream, blank: TokenStream) -> TokenStream {
    quote! {
        impl #data {
            /// Panics unless `raw` has the layout this type stands for.
            pub fn validate(raw: &RawSyntax) {
                #checks
            }

            fn new(
                raw: Arc<RawSyntax>,
                parent: Option<&Arc<SyntaxData>>,
                index_in_parent: CursorIndex,
            ) -> Self {
                Self::validate(&raw);
                Self(SyntaxData::make(raw, parent, index_in_parent))
            }

            /// Wraps already built storage, optionally as the child at
            /// `index_in_parent` of `parent`.
            pub fn make(
                raw: Arc<RawSyntax>,
                parent: Option<&Arc<SyntaxData>>,
                index_in_parent: CursorIndex,
            ) -> Self {
                Self::new(raw, parent, index_in_parent)
            }

            /// A detached blank instance built from missing placeholders.
            pub fn make_blank() -> Self {
                let raw = #blank;
                Self::make(raw, None, 0)
            }
        }
    }
}

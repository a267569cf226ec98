//! Emits the view and data type of each token definition.
//!
//! Every token shares `SyntaxKind::TOKEN` at runtime, so token views tell
//! themselves apart by token kind. A token has no children. Its data type
//! checks the kind and, unless it is an identifier, the exact spelling.

use proc_macro2::TokenStream;
use quote::quote;

use crate::data::{constructors, data_interface, token_check};
use crate::layout::TokenLayout;

/// View struct, token kind constants, cast predicates and upcast to `Token`.
pub fn generate_token_view_interface(token: &TokenLayout) -> TokenStream {
    let view = token.view_ident();
    let data = token.data_ident();
    let kind = token.kind();
    let doc = format!("A `{}` token.", token.name());
    let spelling = token.spelling().map(|spelling| {
        quote! {
            pub const SPELLING: &str = #spelling;
        }
    });

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        pub struct #view {
            syntax: Syntax,
        }

        impl #view {
            pub const KIND: SyntaxKind = SyntaxKind::TOKEN;
            pub const TOKEN_KIND: TokenKind = TokenKind::new(#kind);
            #spelling
        }

        impl SyntaxView for #view {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == Self::KIND
            }

            fn can_cast_raw(raw: &RawSyntax) -> bool {
                raw.token_kind() == Some(Self::TOKEN_KIND)
            }

            fn validate(raw: &RawSyntax) {
                #data::validate(raw)
            }

            fn cast_unchecked(syntax: Syntax) -> Self {
                Self { syntax }
            }

            fn syntax(&self) -> &Syntax {
                &self.syntax
            }

            fn into_syntax(self) -> Syntax {
                self.syntax
            }
        }

        impl From<#view> for Token {
            fn from(node: #view) -> Self {
                Token::cast_unchecked(node.syntax)
            }
        }
    }
}

pub fn generate_token_data_interface(token: &TokenLayout) -> TokenStream {
    data_interface(token.name(), &token.view_ident(), &token.data_ident())
}

pub fn generate_token_view_implementation(token: &TokenLayout) -> TokenStream {
    let view = token.view_ident();
    quote! {
        impl #view {
            pub fn text(&self) -> &str {
                self.syntax.raw().token_text().unwrap_or_default()
            }

            pub fn is_missing(&self) -> bool {
                self.syntax.is_missing()
            }
        }
    }
}

/// Zero-arity data: the token kind and spelling are the whole layout.
pub fn generate_token_data_implementation(token: &TokenLayout) -> TokenStream {
    let kind = token.kind();
    let text = token.spelling().unwrap_or_default();
    constructors(
        &token.data_ident(),
        token_check(quote!(raw), kind, token.spelling()),
        quote!(RawSyntax::missing_token(TokenKind::new(#kind), #text)),
    )
}

//! Emits the public view type of each node kind.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::data::token_check;
use crate::layout::{ChildSlot, NodeLayout, SlotShape};

/// Cursor enum, view struct, kind tag and upcast.
pub fn generate_view_interface(layout: &NodeLayout) -> TokenStream {
    let name = layout.name();
    let view = layout.view_ident();
    let cursor = layout.cursor_ident();
    let data = layout.data_ident();
    let superclass = layout.superclass_ident();
    let category = format_ident!("{}", layout.category().name());
    let child_count = Literal::usize_unsuffixed(layout.children().len());

    let variants = layout.children().iter().map(ChildSlot::variant_ident);
    let all = layout.children().iter().map(|slot| {
        let variant = slot.variant_ident();
        quote!(Self::#variant)
    });
    let indices = layout.children().iter().map(|slot| {
        let variant = slot.variant_ident();
        let index = Literal::usize_unsuffixed(slot.cursor());
        quote!(Self::#variant => #index)
    });

    let cursor_doc = format!("Child slots of [`{name}`], in layout order.");
    let view_doc = format!("A `{name}` node.");

    quote! {
        #[doc = #cursor_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #cursor {
            #(#variants),*
        }

        impl #cursor {
            pub const ALL: [#cursor; #child_count] = [#(#all),*];

            pub const fn index(self) -> CursorIndex {
                match self {
                    #(#indices,)*
                }
            }
        }

        #[doc = #view_doc]
        #[derive(Debug, Clone)]
        pub struct #view {
            syntax: Syntax,
        }

        impl #view {
            pub const KIND: SyntaxKind = SyntaxKind::new(#name, Category::#category);
            pub const CHILD_COUNT: usize = #child_count;
        }

        impl SyntaxView for #view {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == Self::KIND
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

        impl From<#view> for #superclass {
            fn from(node: #view) -> Self {
                #superclass::cast_unchecked(node.syntax)
            }
        }
    }
}

/// Accessors and `with_*` builders, one pair per child slot.
pub fn generate_view_implementation(layout: &NodeLayout) -> TokenStream {
    let view = layout.view_ident();
    let cursor = layout.cursor_ident();
    let methods = layout.children().iter().map(|slot| {
        let accessor = slot.accessor_ident();
        let builder = slot.builder_ident();
        let variant = slot.variant_ident();
        let index = quote!(#cursor::#variant.index());
        match slot.shape() {
            SlotShape::Token { kind, spelling } => {
                let check = token_check(quote!(child.raw()), kind, spelling.as_deref());
                quote! {
                    pub fn #accessor(&self) -> Token {
                        Token::cast_unchecked(self.syntax.child(#index))
                    }

                    pub fn #builder(&self, child: Token) -> #view {
                        #check
                        Self {
                            syntax: self.syntax.replace_child(child.raw().clone(), #index),
                        }
                    }
                }
            }
            SlotShape::Node { kind, missing, category } => {
                let nested = format_ident!("{}", kind);
                let missing_category = format_ident!("{}", category.name());
                let getter = if slot.shape().is_concrete_node() {
                    let nested_data = format_ident!("{}Data", kind);
                    quote! {
                        pub fn #accessor(&self) -> Option<#nested> {
                            let child = self.syntax.child_with(#index, |raw, parent, index| {
                                if raw.is_missing() {
                                    SyntaxData::make(raw, Some(parent), index)
                                } else {
                                    #nested_data::make(raw, Some(parent), index).into_data()
                                }
                            });
                            if child.is_missing() {
                                None
                            } else {
                                Some(#nested::cast_unchecked(child))
                            }
                        }
                    }
                } else {
                    quote! {
                        pub fn #accessor(&self) -> Option<#nested> {
                            let child = self.syntax.child(#index);
                            if child.is_missing() {
                                None
                            } else {
                                #nested::cast(child)
                            }
                        }
                    }
                };
                quote! {
                    #getter

                    pub fn #builder(&self, child: #nested) -> #view {
                        syntax_assert_child_is::<#nested>(
                            child.raw(),
                            SyntaxKind::new(#missing, Category::#missing_category),
                        );
                        Self {
                            syntax: self.syntax.replace_child(child.raw().clone(), #index),
                        }
                    }
                }
            }
        }
    });

    quote! {
        impl #view {
            #(#methods)*
        }
    }
}

//! Persistent, immutable syntax trees - runtime library
//!
//! This crate provides the runtime types that code emitted by `syntax-tblgen` is
//! written against. A tree has two layers:
//!
//! - [`RawSyntax`]: immutable, reference counted storage. Every node carries a
//!   [`SyntaxKind`] and either a positional child layout or token text.
//! - [`SyntaxData`]: parent-aware nodes realized lazily on top of the raw
//!   layer. Each child slot is a [`ChildCell`], so concurrent first access to a
//!   slot publishes exactly one node.
//!
//! Typed access goes through views implementing [`SyntaxView`]. The category
//! views ([`Decl`], [`Stmt`], [`Expr`], [`Type`], [`Pattern`],
//! [`SyntaxCollection`], [`Token`]) live here, concrete node views are
//! generated.

mod assert;
mod cell;
mod data;
mod kind;
mod raw;
mod view;

pub use assert::{syntax_assert_child_is, syntax_assert_token_is, syntax_assert_token_kind};
pub use cell::ChildCell;
pub use data::SyntaxData;
pub use kind::{Category, SyntaxKind, TokenKind};
pub use raw::{RawSyntax, SourcePresence};
pub use view::{Decl, Expr, Pattern, Stmt, Syntax, SyntaxCollection, SyntaxView, Token, Type};

/// Zero-based position of a child within its parent's layout.
pub type CursorIndex = usize;

/// Everything generated code refers to by name.
pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::{
        Category, CursorIndex, Decl, Expr, Pattern, RawSyntax, SourcePresence, Stmt, Syntax,
        SyntaxCollection, SyntaxData, SyntaxKind, SyntaxView, Token, TokenKind, Type,
        syntax_assert_child_is, syntax_assert_token_is, syntax_assert_token_kind,
    };
}

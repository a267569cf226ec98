use std::sync::Arc;

use crate::CursorIndex;
use crate::data::SyntaxData;
use crate::kind::{Category, SyntaxKind, TokenKind};
use crate::raw::RawSyntax;

/// An untyped handle to a node within a tree.
///
/// Holding a handle keeps the whole tree alive: the root owns every realized
/// node on the path down to this one.
#[derive(Debug, Clone)]
pub struct Syntax {
    root: Arc<SyntaxData>,
    data: Arc<SyntaxData>,
}

impl Syntax {
    pub fn new_root(raw: Arc<RawSyntax>) -> Self {
        Self::from_data(SyntaxData::make(raw, None, 0))
    }

    /// Wraps realized data, walking up to find its root.
    pub fn from_data(data: Arc<SyntaxData>) -> Self {
        Self {
            root: data.root(),
            data,
        }
    }

    pub fn root(&self) -> &Arc<SyntaxData> {
        &self.root
    }

    pub fn data(&self) -> &Arc<SyntaxData> {
        &self.data
    }

    pub fn raw(&self) -> &Arc<RawSyntax> {
        self.data.raw()
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind()
    }

    pub fn is_missing(&self) -> bool {
        self.raw().is_missing()
    }

    /// The child at `index`, realized on first access.
    pub fn child(&self, index: CursorIndex) -> Syntax {
        Syntax {
            root: self.root.clone(),
            data: self.data.realize_child(index),
        }
    }

    /// The child at `index`, realized through `make` on first access.
    ///
    /// See [`SyntaxData::realize_child_with`].
    pub fn child_with(
        &self,
        index: CursorIndex,
        make: impl FnOnce(Arc<RawSyntax>, &Arc<SyntaxData>, CursorIndex) -> Arc<SyntaxData>,
    ) -> Syntax {
        Syntax {
            root: self.root.clone(),
            data: self.data.realize_child_with(index, make),
        }
    }

    /// A handle to this node's replacement in a new tree where the child at
    /// `index` is `new_child`. `self` is unchanged.
    pub fn replace_child(&self, new_child: Arc<RawSyntax>, index: CursorIndex) -> Syntax {
        let (root, data) = self.data.replace_child(new_child, index);
        Syntax { root, data }
    }

    /// Whether both handles point at the same realized node.
    pub fn ptr_eq(&self, other: &Syntax) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// A typed view over a [`Syntax`] handle.
///
/// Implemented by the category views in this crate and by every generated
/// node view.
pub trait SyntaxView: Sized {
    /// Whether a node of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// Whether `raw` can be viewed as `Self`. Token views also look at the
    /// token kind here, which [`SyntaxKind`] does not carry.
    fn can_cast_raw(raw: &RawSyntax) -> bool {
        Self::can_cast(raw.kind())
    }

    /// Checks the layout of `raw`, already known to be castable.
    ///
    /// Category views accept any layout. Generated views run their data
    /// type's checks, which panic on a mismatch.
    fn validate(_raw: &RawSyntax) {}

    /// Wraps `syntax` without checking its kind or layout.
    fn cast_unchecked(syntax: Syntax) -> Self;

    fn syntax(&self) -> &Syntax;

    fn into_syntax(self) -> Syntax;

    /// Views `syntax` as `Self`, or `None` if its kind does not fit.
    ///
    /// # Panics
    ///
    /// Panics if the kind fits but the layout does not, see
    /// [`SyntaxView::validate`].
    fn cast(syntax: Syntax) -> Option<Self> {
        if Self::can_cast_raw(syntax.raw()) {
            Self::validate(syntax.raw());
            Some(Self::cast_unchecked(syntax))
        } else {
            None
        }
    }

    fn raw(&self) -> &Arc<RawSyntax> {
        self.syntax().raw()
    }

    fn kind(&self) -> SyntaxKind {
        self.syntax().kind()
    }
}

macro_rules! category_views {
    ($($(#[$meta:meta])* $name:ident => $category:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name(Syntax);

            impl SyntaxView for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind.category() == Category::$category
                }

                fn cast_unchecked(syntax: Syntax) -> Self {
                    Self(syntax)
                }

                fn syntax(&self) -> &Syntax {
                    &self.0
                }

                fn into_syntax(self) -> Syntax {
                    self.0
                }
            }
        )*
    };
}

category_views! {
    /// Any declaration node.
    Decl => Decl;
    /// Any statement node.
    Stmt => Stmt;
    /// Any expression node.
    Expr => Expr;
    /// Any type node.
    Type => Type;
    /// Any pattern node.
    Pattern => Pattern;
    /// Any collection of syntax nodes.
    SyntaxCollection => SyntaxCollection;
    /// A token, present or missing.
    Token => Token;
}

impl Token {
    /// A present token as the root of its own tree.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self(Syntax::new_root(RawSyntax::token(kind, text)))
    }

    /// A missing token as the root of its own tree.
    pub fn missing(kind: TokenKind, text: impl Into<String>) -> Self {
        Self(Syntax::new_root(RawSyntax::missing_token(kind, text)))
    }

    pub fn token_kind(&self) -> Option<TokenKind> {
        self.raw().token_kind()
    }

    pub fn text(&self) -> &str {
        self.raw().token_text().unwrap_or_default()
    }

    pub fn is_missing(&self) -> bool {
        self.raw().is_missing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::SourcePresence;

    const RETURN_STMT: SyntaxKind = SyntaxKind::new("ReturnStmt", Category::Stmt);

    fn return_stmt() -> Arc<RawSyntax> {
        RawSyntax::make(
            RETURN_STMT,
            vec![
                RawSyntax::token(TokenKind::new("kw_return"), "return"),
                RawSyntax::missing(SyntaxKind::new("MissingExpr", Category::Expr)),
            ],
            SourcePresence::Present,
        )
    }

    struct ReturnStmtView(Syntax);

    impl SyntaxView for ReturnStmtView {
        fn can_cast(kind: SyntaxKind) -> bool {
            kind == RETURN_STMT
        }

        fn validate(raw: &RawSyntax) {
            assert!(
                raw.layout().len() == 2,
                "ReturnStmt expects 2 children, found {}",
                raw.layout().len()
            );
        }

        fn cast_unchecked(syntax: Syntax) -> Self {
            Self(syntax)
        }

        fn syntax(&self) -> &Syntax {
            &self.0
        }

        fn into_syntax(self) -> Syntax {
            self.0
        }
    }

    #[test]
    fn cast_runs_the_layout_check() {
        assert!(ReturnStmtView::cast(Syntax::new_root(return_stmt())).is_some());
        let other = RawSyntax::missing(SyntaxKind::new("MissingStmt", Category::Stmt));
        assert!(ReturnStmtView::cast(Syntax::new_root(other)).is_none());
    }

    #[test]
    #[should_panic(expected = "ReturnStmt expects 2 children, found 0")]
    fn cast_rejects_a_malformed_layout() {
        let empty = RawSyntax::make(RETURN_STMT, Vec::new(), SourcePresence::Present);
        ReturnStmtView::cast(Syntax::new_root(empty));
    }

    #[test]
    fn child_with_realizes_through_the_constructor() {
        let root = Syntax::new_root(return_stmt());
        let keyword = root.child_with(0, |raw, parent, index| {
            assert!(raw.is_token());
            SyntaxData::make(raw, Some(parent), index)
        });
        assert!(keyword.ptr_eq(&root.child(0)));
        assert_eq!(keyword.data().index_in_parent(), 0);
    }

    #[test]
    fn category_views_cast_by_category() {
        let root = Syntax::new_root(return_stmt());
        assert!(Stmt::cast(root.clone()).is_some());
        assert!(Expr::cast(root.clone()).is_none());

        let value = root.child(1);
        assert!(value.is_missing());
        assert!(Expr::cast(value).is_some());

        let keyword = Token::cast(root.child(0)).expect("token child");
        assert_eq!(keyword.text(), "return");
        assert_eq!(keyword.token_kind(), Some(TokenKind::new("kw_return")));
    }

    #[test]
    fn child_handles_share_the_root() {
        let root = Syntax::new_root(return_stmt());
        let first = root.child(0);
        let again = root.child(0);
        assert!(first.ptr_eq(&again));
        assert!(Arc::ptr_eq(first.root(), root.data()));
    }

    #[test]
    fn replace_child_keeps_the_old_view() {
        let root = Syntax::new_root(return_stmt());
        let value = RawSyntax::make(
            SyntaxKind::new("NilLiteralExpr", Category::Expr),
            vec![RawSyntax::token(TokenKind::new("kw_nil"), "nil")],
            SourcePresence::Present,
        );
        let updated = root.replace_child(value.clone(), 1);

        assert!(root.child(1).is_missing());
        assert!(Arc::ptr_eq(updated.child(1).raw(), &value));
        assert!(Arc::ptr_eq(updated.raw().child(0), root.raw().child(0)));
    }
}

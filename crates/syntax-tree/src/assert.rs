//! Layout checks used by generated data constructors and builders.
//!
//! A failed check means the tree was built wrong or the generated code does
//! not match the schema the tree came from, so every check panics instead of
//! returning an error.

use crate::kind::{SyntaxKind, TokenKind};
use crate::raw::RawSyntax;
use crate::view::SyntaxView;

/// Asserts that `raw` is a token of `kind`, whatever its text.
#[track_caller]
pub fn syntax_assert_token_kind(raw: &RawSyntax, kind: TokenKind) {
    match raw.token_kind() {
        Some(found) => assert!(
            found == kind,
            "expected `{kind}` token, found `{found}` token"
        ),
        None => panic!("expected `{kind}` token, found {} node", raw.kind()),
    }
}

/// Asserts that `raw` is a token of `kind` spelled exactly `spelling`.
#[track_caller]
pub fn syntax_assert_token_is(raw: &RawSyntax, kind: TokenKind, spelling: &str) {
    syntax_assert_token_kind(raw, kind);
    let text = raw.token_text().unwrap_or_default();
    assert!(
        text == spelling,
        "expected `{kind}` token spelled {spelling:?}, found {text:?}"
    );
}

/// Asserts that `raw` can be viewed as `V`, or is the `missing` placeholder
/// standing in for it.
#[track_caller]
pub fn syntax_assert_child_is<V: SyntaxView>(raw: &RawSyntax, missing: SyntaxKind) {
    let kind = raw.kind();
    assert!(
        V::can_cast_raw(raw) || (raw.is_missing() && kind == missing),
        "unexpected {kind} child (placeholder would be {missing})"
    );
}

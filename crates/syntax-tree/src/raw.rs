use std::sync::Arc;

use crate::CursorIndex;
use crate::kind::{SyntaxKind, TokenKind};

/// Whether a node was present in the source or synthesized as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourcePresence {
    Present,
    Missing,
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum RawData {
    Layout(Vec<Arc<RawSyntax>>),
    Token { kind: TokenKind, text: String },
}

/// Immutable storage for one node and, transitively, its subtree.
///
/// Equality is structural: two independently built trees with the same
/// kinds, layouts and token texts compare equal.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RawSyntax {
    kind: SyntaxKind,
    data: RawData,
    presence: SourcePresence,
}

impl RawSyntax {
    pub fn make(
        kind: SyntaxKind,
        layout: Vec<Arc<RawSyntax>>,
        presence: SourcePresence,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            data: RawData::Layout(layout),
            presence,
        })
    }

    /// A childless placeholder of the given kind.
    pub fn missing(kind: SyntaxKind) -> Arc<Self> {
        Self::make(kind, Vec::new(), SourcePresence::Missing)
    }

    pub fn token(kind: TokenKind, text: impl Into<String>) -> Arc<Self> {
        Self::make_token(kind, text.into(), SourcePresence::Present)
    }

    /// A token that was expected but not written, keeping its expected text.
    pub fn missing_token(kind: TokenKind, text: impl Into<String>) -> Arc<Self> {
        Self::make_token(kind, text.into(), SourcePresence::Missing)
    }

    fn make_token(kind: TokenKind, text: String, presence: SourcePresence) -> Arc<Self> {
        Arc::new(Self {
            kind: SyntaxKind::TOKEN,
            data: RawData::Token { kind, text },
            presence,
        })
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn presence(&self) -> SourcePresence {
        self.presence
    }

    pub fn is_missing(&self) -> bool {
        self.presence == SourcePresence::Missing
    }

    pub fn is_token(&self) -> bool {
        matches!(self.data, RawData::Token { .. })
    }

    /// Children in cursor order. Empty for tokens.
    pub fn layout(&self) -> &[Arc<RawSyntax>] {
        match &self.data {
            RawData::Layout(layout) => layout.as_slice(),
            RawData::Token { .. } => &[],
        }
    }

    /// The child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the layout.
    pub fn child(&self, index: CursorIndex) -> &Arc<RawSyntax> {
        let layout = self.layout();
        assert!(
            index < layout.len(),
            "cursor {index} out of range for {} with {} children",
            self.kind,
            layout.len()
        );
        &layout[index]
    }

    pub fn token_kind(&self) -> Option<TokenKind> {
        match &self.data {
            RawData::Token { kind, .. } => Some(*kind),
            RawData::Layout(_) => None,
        }
    }

    pub fn token_text(&self) -> Option<&str> {
        match &self.data {
            RawData::Token { text, .. } => Some(text.as_str()),
            RawData::Layout(_) => None,
        }
    }

    /// New storage with the child at `index` replaced. Every other child is
    /// shared with `self`.
    pub fn replace_child(&self, index: CursorIndex, new_child: Arc<RawSyntax>) -> Arc<RawSyntax> {
        let mut layout = self.layout().to_vec();
        assert!(
            index < layout.len(),
            "cannot replace cursor {index} of {} with {} children",
            self.kind,
            layout.len()
        );
        layout[index] = new_child;
        Self::make(self.kind, layout, self.presence)
    }
}

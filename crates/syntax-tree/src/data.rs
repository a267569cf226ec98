use std::fmt;
use std::sync::{Arc, Weak};

use crate::CursorIndex;
use crate::cell::ChildCell;
use crate::kind::SyntaxKind;
use crate::raw::RawSyntax;

/// A node realized on top of [`RawSyntax`], aware of its position in a tree.
///
/// Children are realized on first access and cached, one [`ChildCell`] per
/// layout slot. A parent keeps its realized children alive; children only hold
/// a weak reference back.
pub struct SyntaxData {
    raw: Arc<RawSyntax>,
    parent: Option<Weak<SyntaxData>>,
    index_in_parent: CursorIndex,
    children: Box<[ChildCell<Arc<SyntaxData>>]>,
}

impl SyntaxData {
    /// Wraps `raw`, optionally as the child at `index_in_parent` of `parent`.
    ///
    /// No validation happens here; generated `*Data` types check their layout
    /// before calling this.
    pub fn make(
        raw: Arc<RawSyntax>,
        parent: Option<&Arc<SyntaxData>>,
        index_in_parent: CursorIndex,
    ) -> Arc<Self> {
        let children = raw.layout().iter().map(|_| ChildCell::new()).collect();
        Arc::new(Self {
            raw,
            parent: parent.map(Arc::downgrade),
            index_in_parent,
            children,
        })
    }

    pub fn raw(&self) -> &Arc<RawSyntax> {
        &self.raw
    }

    pub fn kind(&self) -> SyntaxKind {
        self.raw.kind()
    }

    pub fn parent(&self) -> Option<Arc<SyntaxData>> {
        self.parent.as_ref()?.upgrade()
    }

    pub fn index_in_parent(&self) -> CursorIndex {
        self.index_in_parent
    }

    /// The topmost ancestor still alive, or `self` for a root.
    pub fn root(self: &Arc<Self>) -> Arc<SyntaxData> {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// The child at `index` if it has already been realized.
    pub fn cached_child(&self, index: CursorIndex) -> Option<&Arc<SyntaxData>> {
        self.children.get(index)?.get()
    }

    /// Realizes the child at `index` without checking its layout, or reuses
    /// the cached one.
    ///
    /// Safe to call from several threads at once: every caller gets the same
    /// node.
    pub fn realize_child(self: &Arc<Self>, index: CursorIndex) -> Arc<SyntaxData> {
        self.realize_child_with(index, |raw, parent, index| {
            SyntaxData::make(raw, Some(parent), index)
        })
    }

    /// Realizes the child at `index` through `make`, or reuses the cached
    /// one. Generated accessors pass the nested kind's validating
    /// constructor here.
    ///
    /// `make` receives the child's storage, `self` and `index`. It only runs
    /// while the slot is empty and may run on several racing threads; one
    /// result is published.
    pub fn realize_child_with(
        self: &Arc<Self>,
        index: CursorIndex,
        make: impl FnOnce(Arc<RawSyntax>, &Arc<SyntaxData>, CursorIndex) -> Arc<SyntaxData>,
    ) -> Arc<SyntaxData> {
        let raw_child = self.raw.child(index);
        self.children[index]
            .get_or_realize(|| make(raw_child.clone(), self, index))
            .clone()
    }

    /// Replaces the child at `index` with `new_child`, rebuilding every
    /// ancestor up to a new root. `self` and its tree are left untouched.
    ///
    /// Returns the new root and the node that replaces `self` in it.
    pub fn replace_child(
        self: &Arc<Self>,
        new_child: Arc<RawSyntax>,
        index: CursorIndex,
    ) -> (Arc<SyntaxData>, Arc<SyntaxData>) {
        let new_raw = self.raw.replace_child(index, new_child);
        match self.parent() {
            Some(parent) => {
                let (root, new_parent) = parent.replace_child(new_raw, self.index_in_parent);
                let node = new_parent.realize_child(self.index_in_parent);
                (root, node)
            }
            None => {
                let node = SyntaxData::make(new_raw, None, 0);
                (node.clone(), node)
            }
        }
    }
}

impl fmt::Debug for SyntaxData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxData")
            .field("kind", &self.kind())
            .field("index_in_parent", &self.index_in_parent)
            .field("raw", &self.raw)
            .finish()
    }
}

use std::fmt;

/// The syntactic category every node kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Decl,
    Stmt,
    Expr,
    Type,
    Pattern,
    SyntaxCollection,
    Token,
}

impl Category {
    pub const fn name(self) -> &'static str {
        match self {
            Category::Decl => "Decl",
            Category::Stmt => "Stmt",
            Category::Expr => "Expr",
            Category::Type => "Type",
            Category::Pattern => "Pattern",
            Category::SyntaxCollection => "SyntaxCollection",
            Category::Token => "Token",
        }
    }

    /// Kind of the placeholder that stands in for an absent child of this
    /// category. Tokens have none: a missing token keeps its own kind and
    /// spelling.
    pub const fn missing_kind(self) -> Option<SyntaxKind> {
        let name = match self {
            Category::Decl => "MissingDecl",
            Category::Stmt => "MissingStmt",
            Category::Expr => "MissingExpr",
            Category::Type => "MissingType",
            Category::Pattern => "MissingPattern",
            Category::SyntaxCollection => "MissingSyntaxCollection",
            Category::Token => return None,
        };
        Some(SyntaxKind::new(name, self))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a syntax node, named after its schema definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxKind {
    name: &'static str,
    category: Category,
}

impl SyntaxKind {
    /// Kind shared by every token node. The token's own kind lives in
    /// [`TokenKind`].
    pub const TOKEN: SyntaxKind = SyntaxKind::new("Token", Category::Token);

    pub const fn new(name: &'static str, category: Category) -> Self {
        Self { name, category }
    }

    pub const fn name(self) -> &'static str {
        self.name
    }

    pub const fn category(self) -> Category {
        self.category
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Kind of a token, e.g. `kw_if` or `identifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenKind(&'static str);

impl TokenKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

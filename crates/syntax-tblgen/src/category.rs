use std::fmt;

use crate::error::SchemaError;
use crate::records::Record;

/// The syntactic categories a definition can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    pub const ALL: [Category; 7] = [
        Category::Decl,
        Category::Stmt,
        Category::Expr,
        Category::Type,
        Category::Pattern,
        Category::SyntaxCollection,
        Category::Token,
    ];

    /// The class name in the schema, which is also the name of the runtime
    /// view for the category.
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

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    /// Name of the catch-all definition anchoring the category, e.g. `AnyExpr`.
    pub fn umbrella_name(self) -> String {
        format!("Any{}", self.name())
    }

    /// Kind of the placeholder standing in for an absent child of this
    /// category. Tokens synthesize missing tokens from their own kind instead.
    pub const fn missing_kind(self) -> Option<&'static str> {
        match self {
            Category::Decl => Some("MissingDecl"),
            Category::Stmt => Some("MissingStmt"),
            Category::Expr => Some("MissingExpr"),
            Category::Type => Some("MissingType"),
            Category::Pattern => Some("MissingPattern"),
            Category::SyntaxCollection => Some("MissingSyntaxCollection"),
            Category::Token => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The first superclass of `def` that names a category.
///
/// Superclass lists are flattened, so the category appears among them even
/// when the definition derives from it through intermediate classes.
pub fn classify(def: &Record) -> Result<Category, SchemaError> {
    def.superclasses()
        .iter()
        .find_map(|class| Category::from_name(class))
        .ok_or_else(|| SchemaError::Uncategorized {
            record: def.name().to_string(),
        })
}

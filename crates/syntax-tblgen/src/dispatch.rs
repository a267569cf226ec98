//! Picks the node kinds of one category and drives the emitters over them.

use std::fmt;
use std::str::FromStr;

use proc_macro2::TokenStream;
use quote::quote;
use tracing::{debug, info};

use crate::category::Category;
use crate::config::{GeneratorConfig, Language};
use crate::data::{generate_data_implementation, generate_data_interface};
use crate::error::{GenError, SchemaError};
use crate::layout::{NodeLayout, TokenLayout};
use crate::records::RecordKeeper;
use crate::token::{
    generate_token_data_implementation, generate_token_data_interface,
    generate_token_view_implementation, generate_token_view_interface,
};
use crate::view::{generate_view_implementation, generate_view_interface};

/// Which half of the generated code to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Action {
    /// Cursor enums, view and data type declarations.
    Interface,
    /// Accessors, builders, constructors and factories.
    Implementation,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Interface => f.write_str("interface"),
            Action::Implementation => f.write_str("implementation"),
        }
    }
}

/// What to generate code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Syntax(Category),
    SyntaxFactory,
    SyntaxRewriter,
}

impl FromStr for Target {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SyntaxFactory" => Ok(Target::SyntaxFactory),
            "SyntaxRewriter" => Ok(Target::SyntaxRewriter),
            _ => Category::from_name(s)
                .map(Target::Syntax)
                .ok_or_else(|| GenError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Syntax(category) => write!(f, "{category}"),
            Target::SyntaxFactory => f.write_str("SyntaxFactory"),
            Target::SyntaxRewriter => f.write_str("SyntaxRewriter"),
        }
    }
}

pub struct Generator<'a> {
    records: &'a RecordKeeper,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(records: &'a RecordKeeper, config: GeneratorConfig) -> Self {
        Self { records, config }
    }

    /// Layouts of every node kind in `category`, in schema order, without
    /// the category's umbrella.
    pub fn layouts(&self, category: Category) -> Result<Vec<NodeLayout>, SchemaError> {
        let umbrella = category.umbrella_name();
        self.records
            .all_derived_definitions(category.name())
            .filter(|def| def.name() != umbrella)
            .map(|def| NodeLayout::extract(self.records, def))
            .collect()
    }

    /// Layouts of every token definition, in schema order, without
    /// `AnyToken`.
    pub fn token_layouts(&self) -> Result<Vec<TokenLayout>, SchemaError> {
        let category = Category::Token;
        let umbrella = category.umbrella_name();
        self.records
            .all_derived_definitions(category.name())
            .filter(|def| def.name() != umbrella)
            .map(|def| TokenLayout::extract(self.records, def))
            .collect()
    }

    /// The complete output for `target`. Nothing is produced unless every
    /// definition of the category could be laid out.
    pub fn generate(&self, action: Action, target: Target) -> Result<String, GenError> {
        let category = match target {
            Target::SyntaxFactory | Target::SyntaxRewriter => {
                return Err(GenError::NotImplemented { target, action });
            }
            Target::Syntax(category) => category,
        };
        let emitted = match category {
            Category::Token => self
                .token_layouts()?
                .iter()
                .map(Emitted::token)
                .collect::<Vec<_>>(),
            _ => self.layouts(category)?.iter().map(Emitted::node).collect(),
        };
        info!(%category, %action, definitions = emitted.len(), "generating");

        match self.config.language {
            Language::Rust => self.generate_rust(action, category, &emitted),
        }
    }

    fn generate_rust(
        &self,
        action: Action,
        category: Category,
        emitted: &[Emitted],
    ) -> Result<String, GenError> {
        let mut out = generate_header_comment(action, category);
        match action {
            Action::Interface => {
                out.push('\n');
                out.push_str(&unparse("prelude import", &self.generate_imports()?)?);
                for definition in emitted {
                    debug!(name = definition.name.as_str(), "emitting interface");
                    out.push('\n');
                    out.push_str(&unparse(&definition.name, &definition.interface)?);
                }
            }
            Action::Implementation => {
                for definition in emitted {
                    debug!(name = definition.name.as_str(), "emitting implementation");
                    let name = &definition.name;
                    out.push_str(&format!("\n// {name} API\n\n"));
                    out.push_str(&unparse(name, &definition.view_implementation)?);
                    out.push_str(&format!("\n// {name} Data\n\n"));
                    out.push_str(&unparse(name, &definition.data_implementation)?);
                }
            }
        }
        Ok(out)
    }

    fn generate_imports(&self) -> Result<TokenStream, GenError> {
        let runtime = &self.config.runtime_crate;
        let path = syn::parse_str::<syn::Path>(runtime).map_err(|source| GenError::RuntimePath {
            path: runtime.clone(),
            source,
        })?;
        Ok(quote! {
            #[allow(unused_imports)]
            use #path::prelude::*;
        })
    }
}

/// Token streams emitted for one definition.
struct Emitted {
    name: String,
    interface: TokenStream,
    view_implementation: TokenStream,
    data_implementation: TokenStream,
}

impl Emitted {
    fn node(layout: &NodeLayout) -> Self {
        let view = generate_view_interface(layout);
        let data = generate_data_interface(layout);
        Self {
            name: layout.name().to_string(),
            interface: quote!(#view #data),
            view_implementation: generate_view_implementation(layout),
            data_implementation: generate_data_implementation(layout),
        }
    }

    fn token(token: &TokenLayout) -> Self {
        let view = generate_token_view_interface(token);
        let data = generate_token_data_interface(token);
        Self {
            name: token.name().to_string(),
            interface: quote!(#view #data),
            view_implementation: generate_token_view_implementation(token),
            data_implementation: generate_token_data_implementation(token),
        }
    }
}

fn generate_header_comment(action: Action, category: Category) -> String {
    format!(
        "// @generated by syntax-tblgen ({category} {action}). Do not edit by hand.\n\
         // Include the interface and implementation outputs in the same module.\n"
    )
}

fn unparse(node: &str, tokens: &TokenStream) -> Result<String, GenError> {
    let file = syn::parse_file(&tokens.to_string()).map_err(|source| GenError::Unparsable {
        node: node.to_string(),
        source,
    })?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/syntax.json");

    #[test]
    fn parses_every_known_target() {
        for category in Category::ALL {
            assert_eq!(
                category.name().parse::<Target>().expect("known"),
                Target::Syntax(category)
            );
        }
        assert_eq!(
            "SyntaxFactory".parse::<Target>().expect("known"),
            Target::SyntaxFactory
        );
        assert_eq!(
            "SyntaxRewriter".parse::<Target>().expect("known"),
            Target::SyntaxRewriter
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        for name in ["Nonsense", "stmt", "AnyStmt", ""] {
            assert!(matches!(
                name.parse::<Target>(),
                Err(GenError::UnknownCategory(found)) if found == name
            ));
        }
    }

    #[test]
    fn layouts_skip_the_umbrella() {
        let records = RecordKeeper::from_json(FIXTURE).expect("valid fixture");
        let generator = Generator::new(&records, GeneratorConfig::default());
        let names: Vec<_> = generator
            .layouts(Category::Expr)
            .expect("extractable")
            .iter()
            .map(|layout| layout.name().to_string())
            .collect();
        assert_eq!(names, ["ParenExpr", "IdentifierExpr"]);
    }

    #[test]
    fn token_layouts_skip_the_umbrella() {
        let records = RecordKeeper::from_json(FIXTURE).expect("valid fixture");
        let generator = Generator::new(&records, GeneratorConfig::default());
        let names: Vec<_> = generator
            .token_layouts()
            .expect("extractable")
            .iter()
            .map(|token| token.name().to_string())
            .collect();
        assert_eq!(
            names,
            ["KwIf", "KwReturn", "KwLet", "LParen", "RParen", "Equal", "Ident"]
        );
    }

    #[test]
    fn token_category_emits_token_views() {
        let records = RecordKeeper::from_json(FIXTURE).expect("valid fixture");
        let generator = Generator::new(&records, GeneratorConfig::default());
        let target = Target::Syntax(Category::Token);

        let interface = generator
            .generate(Action::Interface, target)
            .expect("generates");
        assert!(interface.contains("pub struct KwIf {"), "{interface}");
        assert!(interface.contains("pub struct IdentData("), "{interface}");
        assert!(!interface.contains("AnyToken"), "{interface}");

        let implementation = generator
            .generate(Action::Implementation, target)
            .expect("generates");
        let api = implementation.find("// KwIf API").expect("api section");
        let data = implementation.find("// KwIf Data").expect("data section");
        assert!(api < data);
        assert!(implementation.contains("// Ident Data"), "{implementation}");
    }

    #[test]
    fn placeholder_targets_are_not_implemented() {
        let records = RecordKeeper::from_json(FIXTURE).expect("valid fixture");
        let generator = Generator::new(&records, GeneratorConfig::default());
        for target in [Target::SyntaxFactory, Target::SyntaxRewriter] {
            for action in [Action::Interface, Action::Implementation] {
                assert!(matches!(
                    generator.generate(action, target),
                    Err(GenError::NotImplemented { target: t, action: a }) if t == target && a == action
                ));
            }
        }
    }

    #[test]
    fn invalid_runtime_path_is_reported() {
        let records = RecordKeeper::from_json(FIXTURE).expect("valid fixture");
        let config = GeneratorConfig::builder().runtime_crate("not a path").build();
        let generator = Generator::new(&records, config);
        assert!(matches!(
            generator.generate(Action::Interface, Target::Syntax(Category::Stmt)),
            Err(GenError::RuntimePath { path, .. }) if path == "not a path"
        ));
    }
}

//! Child layouts extracted from node definitions.
//!
//! A structural child is a field whose type derives from `Layout`. Its value
//! names a wrapper definition whose `Node` field names the child's node
//! definition. Every other field is bookkeeping and is skipped.

use std::collections::HashSet;

use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span};
use quote::format_ident;

use crate::category::{Category, classify};
use crate::error::SchemaError;
use crate::records::{Record, RecordKeeper};

const LAYOUT_CLASS: &str = "Layout";
const TOKEN_CLASS: &str = "Token";
const IDENTIFIER_CLASS: &str = "Identifier";

/// The view and data shape of one node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLayout {
    name: String,
    category: Category,
    children: Vec<ChildSlot>,
}

/// One cursor-addressed child of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSlot {
    name: String,
    cursor: usize,
    shape: SlotShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotShape {
    /// A token of `kind`. `spelling` is `None` for identifier tokens, whose
    /// text is open-ended.
    Token {
        kind: String,
        spelling: Option<String>,
    },
    /// A nested node. `kind` is a concrete node kind, or a category name when
    /// any node of that category fits.
    Node {
        kind: String,
        category: Category,
        missing: &'static str,
    },
}

impl NodeLayout {
    pub fn extract(records: &RecordKeeper, def: &Record) -> Result<Self, SchemaError> {
        check_type_name(def.name())?;
        let category = classify(def)?;
        let children = def
            .values()
            .iter()
            .filter(|value| records.is_subclass_of(value.ty(), LAYOUT_CLASS))
            .enumerate()
            .map(|(cursor, value)| -> Result<ChildSlot, SchemaError> {
                check_field_name(def.name(), value.name())?;
                let wrapper = records.resolve(def, value.name())?;
                let node = records.resolve(wrapper, "Node")?;
                Ok(ChildSlot {
                    name: value.name().to_string(),
                    cursor,
                    shape: SlotShape::of(records, node)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_distinct_names(def.name(), &children)?;
        Ok(Self {
            name: def.name().to_string(),
            category,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The view every node of this kind converts into.
    pub fn superclass(&self) -> &'static str {
        self.category.name()
    }

    pub fn children(&self) -> &[ChildSlot] {
        &self.children
    }

    pub fn view_ident(&self) -> Ident {
        format_ident!("{}", self.name)
    }

    pub fn data_ident(&self) -> Ident {
        format_ident!("{}Data", self.name)
    }

    pub fn cursor_ident(&self) -> Ident {
        format_ident!("{}Cursor", self.name)
    }

    pub fn superclass_ident(&self) -> Ident {
        format_ident!("{}", self.superclass())
    }
}

/// The view and data shape of one token definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLayout {
    name: String,
    kind: String,
    spelling: Option<String>,
}

impl TokenLayout {
    pub fn extract(records: &RecordKeeper, def: &Record) -> Result<Self, SchemaError> {
        check_type_name(def.name())?;
        let (kind, spelling) = token_kind_and_spelling(records, def)?;
        Ok(Self {
            name: def.name().to_string(),
            kind,
            spelling,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// `None` for identifier tokens.
    pub fn spelling(&self) -> Option<&str> {
        self.spelling.as_deref()
    }

    pub fn view_ident(&self) -> Ident {
        format_ident!("{}", self.name)
    }

    pub fn data_ident(&self) -> Ident {
        format_ident!("{}Data", self.name)
    }
}

fn token_kind_and_spelling(
    records: &RecordKeeper,
    token: &Record,
) -> Result<(String, Option<String>), SchemaError> {
    let kind = token.value_as_string("Kind")?.to_string();
    let spelling = if records.is_a(token, IDENTIFIER_CLASS) {
        None
    } else {
        Some(token.value_as_string("Spelling")?.to_string())
    };
    Ok((kind, spelling))
}

impl SlotShape {
    fn of(records: &RecordKeeper, node: &Record) -> Result<Self, SchemaError> {
        if records.is_a(node, TOKEN_CLASS) {
            let (kind, spelling) = token_kind_and_spelling(records, node)?;
            return Ok(SlotShape::Token { kind, spelling });
        }

        let category = classify(node)?;
        let missing = category
            .missing_kind()
            .ok_or_else(|| SchemaError::Uncategorized {
                record: node.name().to_string(),
            })?;
        let kind = if node.name() == category.umbrella_name() {
            category.name().to_string()
        } else {
            check_type_name(node.name())?;
            node.name().to_string()
        };
        Ok(SlotShape::Node {
            kind,
            category,
            missing,
        })
    }

    /// Whether a nested slot names a single node kind rather than a whole
    /// category.
    pub fn is_concrete_node(&self) -> bool {
        match self {
            SlotShape::Node { kind, category, .. } => kind != category.name(),
            SlotShape::Token { .. } => false,
        }
    }
}

impl ChildSlot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn shape(&self) -> &SlotShape {
        &self.shape
    }

    /// `IfStmtCursor::Condition` style variant name.
    pub fn variant_ident(&self) -> Ident {
        let name = self.name.to_case(Case::Pascal);
        if name == "Self" {
            format_ident!("{}_", name)
        } else {
            format_ident!("{}", name)
        }
    }

    pub fn accessor_ident(&self) -> Ident {
        snake_ident(&self.name)
    }

    pub fn builder_ident(&self) -> Ident {
        format_ident!("with_{}", format_snake_case(&self.name))
    }
}

pub fn format_snake_case(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// Snake-case identifier for `name`, escaping keywords.
fn snake_ident(name: &str) -> Ident {
    let snake = format_snake_case(name);
    match snake.as_str() {
        "self" | "super" | "crate" | "_" => format_ident!("{}_", snake),
        _ if syn::parse_str::<Ident>(&snake).is_err() => Ident::new_raw(&snake, Span::call_site()),
        _ => format_ident!("{}", snake),
    }
}

fn check_type_name(name: &str) -> Result<(), SchemaError> {
    match syn::parse_str::<Ident>(name) {
        Ok(_) => Ok(()),
        Err(_) => Err(SchemaError::InvalidName {
            record: name.to_string(),
            name: name.to_string(),
        }),
    }
}

fn check_field_name(record: &str, name: &str) -> Result<(), SchemaError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            record: record.to_string(),
            name: name.to_string(),
        })
    }
}

/// Field names differing only in case or underscores would emit the same
/// cursor variant or accessor.
fn check_distinct_names(record: &str, children: &[ChildSlot]) -> Result<(), SchemaError> {
    let mut variants = HashSet::new();
    let mut accessors = HashSet::new();
    for slot in children {
        let fresh_variant = variants.insert(slot.variant_ident().to_string());
        let fresh_accessor = accessors.insert(slot.accessor_ident().to_string());
        if !(fresh_variant && fresh_accessor) {
            return Err(SchemaError::InvalidName {
                record: record.to_string(),
                name: slot.name.clone(),
            });
        }
    }
    Ok(())
}

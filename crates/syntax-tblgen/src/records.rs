//! The record store the generator reads the schema from.
//!
//! Records are already evaluated: every definition lists its superclasses
//! (most derived last) and its fields in declaration order. The store is
//! loaded once and never mutated.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SchemaError;

/// Field types that are not classes.
const PRIMITIVE_TYPES: &[&str] = &["string", "int", "bit", "code"];

/// A field value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Init {
    /// Reference to another definition.
    Def { def: String },
    String(String),
    Int(i64),
    Bit(bool),
}

/// One named, typed field of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordVal {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    value: Init,
}

impl RecordVal {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type: a class name or one of the primitive types.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn value(&self) -> &Init {
        &self.value
    }
}

/// A named definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    superclasses: Vec<String>,
    values: Vec<RecordVal>,
}

impl Record {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclasses(&self) -> &[String] {
        &self.superclasses
    }

    /// The most derived superclass.
    pub fn direct_superclass(&self) -> Option<&str> {
        self.superclasses.last().map(String::as_str)
    }

    pub fn values(&self) -> &[RecordVal] {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&RecordVal> {
        self.values.iter().find(|value| value.name == field)
    }

    pub fn value_as_string(&self, field: &str) -> Result<&str, SchemaError> {
        match self.required_value(field)? {
            Init::String(value) => Ok(value),
            _ => Err(self.field_type_error(field, "string")),
        }
    }

    pub fn value_as_def(&self, field: &str) -> Result<&str, SchemaError> {
        match self.required_value(field)? {
            Init::Def { def } => Ok(def),
            _ => Err(self.field_type_error(field, "definition reference")),
        }
    }

    fn required_value(&self, field: &str) -> Result<&Init, SchemaError> {
        self.value(field)
            .map(RecordVal::value)
            .ok_or_else(|| SchemaError::MissingField {
                record: self.name.clone(),
                field: field.to_string(),
            })
    }

    fn field_type_error(&self, field: &str, expected: &'static str) -> SchemaError {
        SchemaError::FieldType {
            record: self.name.clone(),
            field: field.to_string(),
            expected,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordBody {
    #[serde(default)]
    superclasses: Vec<String>,
    #[serde(default)]
    fields: Vec<RecordVal>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordsFile {
    #[serde(default)]
    classes: IndexMap<String, Vec<String>>,
    #[serde(default)]
    defs: IndexMap<String, RecordBody>,
}

/// Classes and definitions of one schema, in schema order.
#[derive(Debug, Clone, Default)]
pub struct RecordKeeper {
    classes: IndexMap<String, Vec<String>>,
    defs: IndexMap<String, Record>,
}

impl RecordKeeper {
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let file: RecordsFile = serde_json::from_str(text)?;
        let defs = file
            .defs
            .into_iter()
            .map(|(name, body)| {
                let record = Record {
                    name: name.clone(),
                    superclasses: body.superclasses,
                    values: body.fields,
                };
                (name, record)
            })
            .collect();
        let keeper = Self {
            classes: file.classes,
            defs,
        };
        keeper.validate()?;
        Ok(keeper)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for (class, superclasses) in &self.classes {
            self.check_classes(class, superclasses)?;
        }
        for record in self.defs.values() {
            self.check_classes(&record.name, &record.superclasses)?;
            for value in &record.values {
                if !PRIMITIVE_TYPES.contains(&value.ty.as_str())
                    && !self.classes.contains_key(&value.ty)
                {
                    return Err(SchemaError::UnknownClass {
                        referenced_by: format!("{}.{}", record.name, value.name),
                        class: value.ty.clone(),
                    });
                }
                if let Init::Def { def } = &value.value {
                    if !self.defs.contains_key(def) {
                        return Err(SchemaError::UnknownDef {
                            record: record.name.clone(),
                            field: value.name.clone(),
                            def: def.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_classes(&self, referenced_by: &str, classes: &[String]) -> Result<(), SchemaError> {
        match classes.iter().find(|class| !self.classes.contains_key(*class)) {
            Some(class) => Err(SchemaError::UnknownClass {
                referenced_by: referenced_by.to_string(),
                class: class.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn def(&self, name: &str) -> Option<&Record> {
        self.defs.get(name)
    }

    pub fn defs(&self) -> impl Iterator<Item = &Record> {
        self.defs.values()
    }

    /// Whether `class` is `base` or transitively derives from it.
    pub fn is_subclass_of(&self, class: &str, base: &str) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![class];
        while let Some(current) = pending.pop() {
            if current == base {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(superclasses) = self.classes.get(current) {
                pending.extend(superclasses.iter().map(String::as_str));
            }
        }
        false
    }

    /// Whether `record` derives from `base`.
    pub fn is_a(&self, record: &Record, base: &str) -> bool {
        record
            .superclasses
            .iter()
            .any(|class| self.is_subclass_of(class, base))
    }

    /// Every definition deriving from `class`, in schema order.
    pub fn all_derived_definitions<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.defs
            .values()
            .filter(move |record| self.is_a(record, class))
    }

    /// The definition `record.field` refers to.
    pub fn resolve(&self, record: &Record, field: &str) -> Result<&Record, SchemaError> {
        let name = record.value_as_def(field)?;
        self.def(name).ok_or_else(|| SchemaError::UnknownDef {
            record: record.name.clone(),
            field: field.to_string(),
            def: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "classes": {
            "Syntax": [],
            "Expr": ["Syntax"],
            "Token": ["Syntax"],
            "Identifier": ["Token"],
            "Layout": [],
            "Child": ["Layout"]
        },
        "defs": {
            "Ident": {
                "superclasses": ["Syntax", "Token", "Identifier"],
                "fields": [{ "name": "Kind", "type": "string", "value": "identifier" }]
            },
            "NameChild": {
                "superclasses": ["Layout", "Child"],
                "fields": [{ "name": "Node", "type": "Syntax", "value": { "def": "Ident" } }]
            },
            "IdentifierExpr": {
                "superclasses": ["Syntax", "Expr"],
                "fields": [
                    { "name": "Name", "type": "Child", "value": { "def": "NameChild" } },
                    { "name": "IsRequired", "type": "bit", "value": true }
                ]
            }
        }
    }"#;

    #[test]
    fn loads_in_schema_order() {
        let records = RecordKeeper::from_json(SCHEMA).expect("valid schema");
        let names: Vec<_> = records.defs().map(Record::name).collect();
        assert_eq!(names, ["Ident", "NameChild", "IdentifierExpr"]);

        let expr = records.def("IdentifierExpr").expect("defined");
        assert_eq!(expr.direct_superclass(), Some("Expr"));
        assert_eq!(expr.values()[1].value(), &Init::Bit(true));
        assert_eq!(
            records.resolve(expr, "Name").expect("resolves").name(),
            "NameChild"
        );
    }

    #[test]
    fn subclass_queries_are_transitive() {
        let records = RecordKeeper::from_json(SCHEMA).expect("valid schema");
        assert!(records.is_subclass_of("Identifier", "Syntax"));
        assert!(records.is_subclass_of("Child", "Layout"));
        assert!(!records.is_subclass_of("Expr", "Token"));

        let ident = records.def("Ident").expect("defined");
        assert!(records.is_a(ident, "Token"));
        let tokens: Vec<_> = records
            .all_derived_definitions("Token")
            .map(Record::name)
            .collect();
        assert_eq!(tokens, ["Ident"]);
    }

    #[test]
    fn typed_value_access() {
        let records = RecordKeeper::from_json(SCHEMA).expect("valid schema");
        let ident = records.def("Ident").expect("defined");
        assert_eq!(ident.value_as_string("Kind").expect("string"), "identifier");
        assert!(matches!(
            ident.value_as_string("Spelling"),
            Err(SchemaError::MissingField { field, .. }) if field == "Spelling"
        ));
        assert!(matches!(
            ident.value_as_def("Kind"),
            Err(SchemaError::FieldType { expected: "definition reference", .. })
        ));
    }

    #[test]
    fn rejects_unknown_superclass() {
        let error = RecordKeeper::from_json(
            r#"{ "classes": {}, "defs": { "IfStmt": { "superclasses": ["Stmt"] } } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            SchemaError::UnknownClass { referenced_by, class } if referenced_by == "IfStmt" && class == "Stmt"
        ));
    }

    #[test]
    fn rejects_dangling_reference() {
        let error = RecordKeeper::from_json(
            r#"{
                "classes": { "Layout": [] },
                "defs": {
                    "Wrapper": {
                        "superclasses": ["Layout"],
                        "fields": [{ "name": "Node", "type": "string", "value": { "def": "Nowhere" } }]
                    }
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(error, SchemaError::UnknownDef { def, .. } if def == "Nowhere"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            RecordKeeper::from_json("{ \"defs\": [] }"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn cyclic_classes_terminate() {
        let records = RecordKeeper::from_json(r#"{ "classes": { "A": ["B"], "B": ["A"] } }"#)
            .expect("cycles are not rejected at load");
        assert!(!records.is_subclass_of("A", "C"));
        assert!(records.is_subclass_of("A", "B"));
    }
}

//! Element catalog: the closed registry of element kinds.
//!
//! A catalog maps kind names to [`ElementDef`] entries (prop schema, display
//! tag, containment and definition flags, optional custom serializer). It is
//! built once via [`CatalogBuilder`] and read-only afterward.

/// Stock catalog covering the standard SVG vocabulary.
pub mod defaults;
/// Prop schema types and validation.
pub mod schema;

use schema::{PropSchema, SchemaViolation, ValidatedProps};
use serde_json::Value;
use std::collections::BTreeMap;
use svgflow_core::Document;
use thiserror::Error;

/// Custom serialization hook: receives validated props and the concatenated
/// child markup, returns the element's markup verbatim.
pub type SerializerFn = fn(&ValidatedProps, &str) -> String;

/// Static definition of one element kind.
#[derive(Debug, Clone)]
pub struct ElementDef {
    /// Display tag; when `None`, the lower-cased kind name is used.
    pub tag: Option<&'static str>,
    /// Human-readable description, surfaced by [`Catalog::describe`].
    pub description: String,
    /// Prop schema for this kind.
    pub schema: PropSchema,
    /// Whether containment is semantically meaningful for this kind.
    pub has_children: bool,
    /// Whether this kind belongs in the definitions section rather than the
    /// visible tree.
    pub is_def: bool,
    /// Whether a prop literally named `text` becomes inner text content.
    pub text_content: bool,
    /// Optional custom serializer overriding generic attribute emission.
    pub serializer: Option<SerializerFn>,
}

impl ElementDef {
    /// Creates a definition with the given description and schema; all flags
    /// off, default tag.
    pub fn new(description: impl Into<String>, schema: PropSchema) -> Self {
        Self {
            tag: None,
            description: description.into(),
            schema,
            has_children: false,
            is_def: false,
            text_content: false,
            serializer: None,
        }
    }

    /// Sets an explicit display tag.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Marks containment as meaningful.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    /// Marks this kind as a definition (rendered in the defs section only).
    pub fn definition(mut self) -> Self {
        self.is_def = true;
        self
    }

    /// Marks this kind as text-bearing.
    pub fn text_bearing(mut self) -> Self {
        self.text_content = true;
        self
    }

    /// Installs a custom serializer.
    pub fn serializer(mut self, serializer: SerializerFn) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// Display tag for this kind.
    pub fn display_tag(&self, kind: &str) -> String {
        match self.tag {
            Some(tag) => tag.to_string(),
            None => kind.to_lowercase(),
        }
    }
}

/// Builds a [`Catalog`]; registration is only possible here, the built
/// catalog is immutable.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: BTreeMap<String, ElementDef>,
}

impl CatalogBuilder {
    /// Registers a kind. A repeated name overwrites the earlier entry.
    pub fn register(mut self, kind: impl Into<String>, def: ElementDef) -> Self {
        self.entries.insert(kind.into(), def);
        self
    }

    /// Finalizes the registry.
    pub fn build(self) -> Catalog {
        Catalog {
            entries: self.entries,
        }
    }
}

/// Closed registry of element kinds.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, ElementDef>,
}

impl Catalog {
    /// Starts building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Looks up a kind. Absence is not an error at this level; callers
    /// decide whether it is fatal.
    pub fn lookup(&self, kind: &str) -> Option<&ElementDef> {
        self.entries.get(kind)
    }

    /// Iterates registered kind names in deterministic order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Validates a raw property bag against the named kind's schema.
    pub fn validate_props(
        &self,
        kind: &str,
        props: &serde_json::Map<String, Value>,
    ) -> Result<ValidatedProps, SchemaViolation> {
        let def = self
            .lookup(kind)
            .ok_or_else(|| SchemaViolation::UnknownKind {
                kind: kind.to_string(),
            })?;
        def.schema.validate(props)
    }

    /// Produces a deterministic human-readable manifest of every kind, its
    /// description, and its prop names (optionals suffixed with `?`).
    ///
    /// Consumed by external prompt construction; no side effects.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (kind, def) in &self.entries {
            let props: Vec<String> = def
                .schema
                .fields()
                .iter()
                .map(|field| {
                    if field.required {
                        field.name.to_string()
                    } else {
                        format!("{}?", field.name)
                    }
                })
                .collect();
            out.push_str(&format!(
                "- {}: {}. Props: {}\n",
                kind,
                def.description,
                props.join(", ")
            ));
        }
        out
    }

    /// Strict whole-document validation, used only for final acceptance.
    ///
    /// Unlike per-element render validation (lenient, skip-on-failure), this
    /// fails on a missing root, on the first malformed element value, the
    /// first unregistered kind, or the first schema violation. The failure is
    /// returned, never raised, so callers can choose to accept a partial
    /// document anyway.
    pub fn validate_document(&self, doc: &Document) -> Result<(), DocumentError> {
        if doc.root.is_none() {
            return Err(DocumentError::MissingRoot);
        }
        for key in doc.elements.keys() {
            let Some(element) = doc.element(key) else {
                return Err(DocumentError::MalformedElement { key: key.clone() });
            };
            match self.validate_props(&element.kind, &element.props) {
                Ok(_) => {}
                Err(SchemaViolation::UnknownKind { kind }) => {
                    return Err(DocumentError::UnknownKind {
                        key: key.clone(),
                        kind,
                    });
                }
                Err(violation) => {
                    return Err(DocumentError::InvalidProps {
                        key: key.clone(),
                        kind: element.kind,
                        violation,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Why a document failed strict validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// No root element has been declared.
    #[error("document has no root")]
    MissingRoot,
    /// An element value does not have the element shape.
    #[error("element `{key}` is not a well-formed element")]
    MalformedElement {
        /// Key of the malformed element.
        key: String,
    },
    /// An element names a kind with no catalog entry.
    #[error("element `{key}` has unregistered kind `{kind}`")]
    UnknownKind {
        /// Key of the offending element.
        key: String,
        /// The unregistered kind name.
        kind: String,
    },
    /// An element's props fail its kind's schema.
    #[error("element `{key}` ({kind}): {violation}")]
    InvalidProps {
        /// Key of the offending element.
        key: String,
        /// Kind of the offending element.
        kind: String,
        /// The underlying schema violation.
        #[source]
        violation: SchemaViolation,
    },
}

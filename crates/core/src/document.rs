//! Document data model shared by the compiler and the renderer.
//!
//! A [`Document`] is the single artifact under construction while a patch
//! stream arrives. It may be structurally incomplete at any point: the root
//! may name an element that has not arrived yet, and `children` arrays may
//! reference keys that are still missing. That is expected during streaming
//! and never treated as an error here; completeness is asserted only by the
//! renderer crate's strict document validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default edge length used when the viewport omits width or height.
pub const DEFAULT_VIEWPORT_SIZE: f64 = 500.0;

/// Declared drawing surface of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Surface width in user units.
    pub width: f64,
    /// Surface height in user units.
    pub height: f64,
    /// Optional explicit `viewBox` attribute value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
}

/// One node of the document tree.
///
/// `props` is an untyped bag; it is validated lazily against the element
/// kind's schema by the renderer, never at compile time. `children` holds
/// keys into the document's element map and may dangle while streaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique key of this element within the document.
    pub key: String,
    /// Catalog kind name (e.g. "Rect", "LinearGradient").
    pub kind: String,
    /// Untyped property bag, validated lazily per kind.
    #[serde(default)]
    pub props: serde_json::Map<String, Value>,
    /// Ordered child keys; entries may reference keys not yet present.
    #[serde(default)]
    pub children: Vec<String>,
    /// Optional back-reference to the containing element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
}

/// The in-progress or final document produced by the patch compiler.
///
/// Element values are kept as raw JSON so that deep patches can walk and
/// create intermediate mappings without committing to a shape; the typed
/// [`Element`] view is obtained on demand via [`Document::element`]. The map
/// is a `BTreeMap` so every iteration-order-dependent consumer (definitions
/// pass, fallback root selection, first-failure validation) is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Key of the top-level element, once declared by the stream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Raw viewport value; resolved (with defaults) at render time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Value>,
    /// All elements received so far, keyed by element key.
    pub elements: BTreeMap<String, Value>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the typed view of the element at `key`.
    ///
    /// Returns `None` when the key is absent or the stored value does not
    /// deserialize to an [`Element`]; malformed values are tolerated in the
    /// map and simply have no typed view.
    pub fn element(&self, key: &str) -> Option<Element> {
        let value = self.elements.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Returns the typed viewport, if one was declared and is well-formed.
    pub fn typed_viewport(&self) -> Option<Viewport> {
        let value = self.viewport.as_ref()?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Returns true when the declared root resolves to a present element.
    pub fn has_resolved_root(&self) -> bool {
        self.root
            .as_deref()
            .is_some_and(|key| self.elements.contains_key(key))
    }
}

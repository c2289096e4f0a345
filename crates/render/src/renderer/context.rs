//! Rendering context: catalog handle, options, and collected warnings.

use super::{RenderOptions, RenderWarning};
use crate::catalog::Catalog;
use crate::catalog::schema::SchemaViolation;

/// State threaded through a single render pass.
pub(crate) struct RenderContext<'a> {
    /// The element catalog consulted for every node.
    pub catalog: &'a Catalog,
    /// Caller-supplied options.
    pub options: &'a RenderOptions,
    /// Warnings collected while skipping invalid elements.
    pub warnings: Vec<RenderWarning>,
}

impl<'a> RenderContext<'a> {
    pub fn new(catalog: &'a Catalog, options: &'a RenderOptions) -> Self {
        Self {
            catalog,
            options,
            warnings: Vec::new(),
        }
    }

    /// Records that an element was skipped for a schema violation.
    pub fn warn_invalid(&mut self, key: &str, kind: &str, violation: &SchemaViolation) {
        log::warn!("skipping element `{key}` ({kind}): {violation}");
        self.warnings.push(RenderWarning {
            key: key.to_string(),
            kind: kind.to_string(),
            reason: violation.to_string(),
        });
    }
}

/// Appends an attribute value, escaping `<`, `>`, `&`, `"`, and `'`.
pub(crate) fn push_attr_value(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Appends text content, escaping `<`, `>`, and `&`.
pub(crate) fn push_text(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

//! Per-element rendering: validation, recursion, and serialization.

use super::context::{RenderContext, push_attr_value, push_text};
use serde_json::Value;
use svgflow_core::Document;

/// Renders one element (and its subtree) to markup.
///
/// Failure isolation: a missing element, an unregistered kind, or a schema
/// violation yields empty output for this element only; siblings and
/// ancestors are unaffected. Definition kinds render only in defs context so
/// they never appear twice.
pub(crate) fn render_element(
    key: &str,
    doc: &Document,
    ctx: &mut RenderContext<'_>,
    defs_context: bool,
) -> String {
    let Some(element) = doc.element(key) else {
        return String::new();
    };
    let Some(def) = ctx.catalog.lookup(&element.kind) else {
        return String::new();
    };
    if def.is_def && !defs_context {
        return String::new();
    }

    let props = match def.schema.validate(&element.props) {
        Ok(props) => props,
        Err(violation) => {
            ctx.warn_invalid(key, &element.kind, &violation);
            return String::new();
        }
    };

    let mut children_markup = String::new();
    for child in &element.children {
        children_markup.push_str(&render_element(child, doc, ctx, defs_context));
    }

    if let Some(serializer) = def.serializer {
        return serializer(&props, &children_markup);
    }

    let tag = def.display_tag(&element.kind);
    let mut attrs = String::new();
    let mut content = String::new();

    for (name, value) in props.iter() {
        if name == "text" && def.text_content {
            if let Some(text) = value.as_str() {
                push_text(&mut content, text);
            }
            continue;
        }
        let Some(raw) = scalar_to_string(value) else {
            continue;
        };
        let attr_name = camel_to_kebab(name);
        let rewritten = apply_id_prefix(&attr_name, raw, ctx.options.id_prefix.as_deref());

        attrs.push(' ');
        attrs.push_str(&attr_name);
        attrs.push_str("=\"");
        push_attr_value(&mut attrs, &rewritten);
        attrs.push('"');
    }

    if content.is_empty() && children_markup.is_empty() {
        format!("<{tag}{attrs}/>")
    } else {
        format!("<{tag}{attrs}>{content}{children_markup}</{tag}>")
    }
}

/// Converts a camelCase prop name to a kebab-case attribute name.
pub(crate) fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rewrites identifier-bearing values so concurrently rendered documents do
/// not collide on `id`-addressed definitions.
fn apply_id_prefix(attr_name: &str, value: String, prefix: Option<&str>) -> String {
    let Some(prefix) = prefix else {
        return value;
    };
    if attr_name == "id" {
        return format!("{prefix}-{value}");
    }
    if let Some(rest) = value.strip_prefix("url(#") {
        return format!("url(#{prefix}-{rest}");
    }
    value
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

//! Document-to-SVG rendering.
//!
//! Rendering is lenient by design: an element that fails its kind's schema
//! is skipped (with a warning) without affecting siblings or ancestors, so a
//! half-streamed document always yields well-formed markup. Strict
//! whole-document acceptance lives in the catalog module instead.

mod context;
mod element;

use context::RenderContext;
use element::render_element;
use std::collections::HashSet;
use svgflow_core::{DEFAULT_VIEWPORT_SIZE, Document};

use crate::catalog::Catalog;

/// Caller-tunable rendering options.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix applied to every `id` attribute and `url(#...)` reference so
    /// several rendered documents can coexist in one page.
    pub id_prefix: Option<String>,
}

/// One element skipped during a lenient render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    /// Key of the skipped element.
    pub key: String,
    /// Kind of the skipped element.
    pub kind: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Markup plus the warnings accumulated while producing it.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// The complete `<svg>` document.
    pub markup: String,
    /// Elements skipped for schema violations, in render order.
    pub warnings: Vec<RenderWarning>,
}

/// Renders a document to SVG markup, discarding warnings.
pub fn render(doc: &Document, catalog: &Catalog, options: &RenderOptions) -> String {
    render_with_diagnostics(doc, catalog, options).markup
}

/// Renders a document to SVG markup, returning skipped-element warnings
/// alongside it.
pub fn render_with_diagnostics(
    doc: &Document,
    catalog: &Catalog,
    options: &RenderOptions,
) -> RenderOutcome {
    let mut ctx = RenderContext::new(catalog, options);

    // Definitions render first, exactly once, regardless of tree position.
    let mut defs = String::new();
    for key in def_keys(doc, catalog) {
        defs.push_str(&render_element(&key, doc, &mut ctx, true));
    }

    let mut body = String::new();
    if doc.has_resolved_root() {
        if let Some(root) = doc.root.as_deref() {
            body.push_str(&render_element(root, doc, &mut ctx, false));
        }
    } else {
        // No usable root yet: render every top-level non-definition element
        // so partial documents still produce something visible.
        let referenced = referenced_keys(doc);
        for key in doc.elements.keys() {
            if referenced.contains(key.as_str()) {
                continue;
            }
            body.push_str(&render_element(key, doc, &mut ctx, false));
        }
    }

    let (width, height, view_box) = resolve_viewport(doc);
    let mut markup = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"{view_box}\">"
    );
    if !defs.is_empty() {
        markup.push_str("<defs>");
        markup.push_str(&defs);
        markup.push_str("</defs>");
    }
    markup.push_str(&body);
    markup.push_str("</svg>");

    RenderOutcome {
        markup,
        warnings: ctx.warnings,
    }
}

/// Keys of all elements whose kind is a registered definition kind, in map
/// order. Judged from the raw value so malformed siblings never interfere.
fn def_keys(doc: &Document, catalog: &Catalog) -> Vec<String> {
    doc.elements
        .iter()
        .filter(|(_, value)| {
            value
                .get("kind")
                .and_then(|kind| kind.as_str())
                .and_then(|kind| catalog.lookup(kind))
                .is_some_and(|def| def.is_def)
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Every key that appears in some element's `children` array.
fn referenced_keys(doc: &Document) -> HashSet<String> {
    let mut referenced = HashSet::new();
    for key in doc.elements.keys() {
        if let Some(element) = doc.element(key) {
            referenced.extend(element.children);
        }
    }
    referenced
}

/// Resolves the envelope dimensions from the raw viewport value.
///
/// Numbers and non-empty strings pass through as written; anything else
/// (including an absent or garbage viewport) falls back to the default edge
/// length. The `viewBox` defaults to `0 0 {width} {height}`.
fn resolve_viewport(doc: &Document) -> (String, String, String) {
    let dimension = |name: &str| -> String {
        doc.viewport
            .as_ref()
            .and_then(|viewport| viewport.get(name))
            .and_then(|value| match value {
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                _ => None,
            })
            .unwrap_or_else(|| format!("{}", DEFAULT_VIEWPORT_SIZE as i64))
    };

    let width = dimension("width");
    let height = dimension("height");
    let view_box = doc
        .viewport
        .as_ref()
        .and_then(|viewport| viewport.get("viewBox"))
        .and_then(|value| value.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("0 0 {width} {height}"));

    (width, height, view_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::default_catalog;
    use crate::catalog::schema::{PropSchema, PropType, ValidatedProps};
    use crate::catalog::ElementDef;
    use svgflow_core::compile_str;

    fn plain_render(doc: &Document) -> String {
        render(doc, &default_catalog(), &RenderOptions::default())
    }

    #[test]
    fn renders_single_rect_document() {
        let stream = concat!(
            "{\"op\":\"set\",\"path\":\"/viewport\",\"value\":{\"width\":500,\"height\":500}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/bg\",\"value\":",
            "{\"key\":\"bg\",\"kind\":\"Rect\",\"props\":",
            "{\"x\":0,\"y\":0,\"width\":500,\"height\":500,\"fill\":\"#f0f0f0\"}}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"bg\"}\n",
        );
        let doc = compile_str(stream);
        assert_eq!(
            plain_render(&doc),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"500\" height=\"500\" viewBox=\"0 0 500 500\"><rect x=\"0\" y=\"0\" width=\"500\" height=\"500\" fill=\"#f0f0f0\"/></svg>"
        );
    }

    #[test]
    fn missing_viewport_defaults_to_500() {
        let doc = Document::new();
        assert_eq!(
            plain_render(&doc),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"500\" height=\"500\" viewBox=\"0 0 500 500\"></svg>"
        );
    }

    #[test]
    fn string_dimensions_pass_through() {
        let doc = compile_str(
            r#"{"op":"set","path":"/viewport","value":{"width":"100%","height":"300","viewBox":"0 0 800 600"}}"#,
        );
        assert!(plain_render(&doc).starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"300\" viewBox=\"0 0 800 600\">"
        ));
    }

    #[test]
    fn garbage_viewport_falls_back_to_defaults() {
        let doc = compile_str(r#"{"op":"set","path":"/viewport","value":"nonsense"}"#);
        assert!(plain_render(&doc).starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"500\" height=\"500\" viewBox=\"0 0 500 500\">"
        ));
    }

    #[test]
    fn fallback_renders_unreferenced_elements_without_root() {
        let stream = concat!(
            "{\"op\":\"add\",\"path\":\"/elements/g\",\"value\":",
            "{\"key\":\"g\",\"kind\":\"Group\",\"props\":{},\"children\":[\"c\"]}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/c\",\"value\":",
            "{\"key\":\"c\",\"kind\":\"Circle\",\"props\":{\"cx\":1,\"cy\":2,\"r\":3}}}\n",
        );
        let doc = compile_str(stream);
        let markup = plain_render(&doc);

        // "g" is top-level, "c" is referenced and must not render twice.
        assert!(markup.contains("<g><circle cx=\"1\" cy=\"2\" r=\"3\"/></g>"));
        assert_eq!(markup.matches("<circle").count(), 1);
    }

    #[test]
    fn dangling_root_uses_fallback() {
        let stream = concat!(
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"ghost\"}\n",
            "{\"op\":\"add\",\"path\":\"/elements/dot\",\"value\":",
            "{\"key\":\"dot\",\"kind\":\"Circle\",\"props\":{\"cx\":5,\"cy\":5,\"r\":1}}}\n",
        );
        let doc = compile_str(stream);
        assert!(plain_render(&doc).contains("<circle cx=\"5\" cy=\"5\" r=\"1\"/>"));
    }

    #[test]
    fn definitions_render_once_inside_defs() {
        let stream = concat!(
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"bg\"}\n",
            "{\"op\":\"add\",\"path\":\"/elements/grad\",\"value\":",
            "{\"key\":\"grad\",\"kind\":\"LinearGradient\",\"props\":{\"id\":\"glow\"},\"children\":[\"s1\"]}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/s1\",\"value\":",
            "{\"key\":\"s1\",\"kind\":\"Stop\",\"props\":{\"offset\":\"0%\",\"stopColor\":\"#fff\"}}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/bg\",\"value\":",
            "{\"key\":\"bg\",\"kind\":\"Rect\",\"props\":",
            "{\"x\":0,\"y\":0,\"width\":10,\"height\":10,\"fill\":\"url(#glow)\"}}}\n",
        );
        let doc = compile_str(stream);
        let markup = plain_render(&doc);

        assert!(markup.contains(
            "<defs><linearGradient id=\"glow\"><stop offset=\"0%\" stop-color=\"#fff\"/></linearGradient></defs>"
        ));
        assert_eq!(markup.matches("<linearGradient").count(), 1);
    }

    #[test]
    fn defs_wrapper_is_omitted_when_empty() {
        let doc = compile_str(r#"{"op":"set","path":"/root","value":"nothing"}"#);
        assert!(!plain_render(&doc).contains("<defs>"));
    }

    #[test]
    fn id_prefix_scopes_ids_and_references() {
        let stream = concat!(
            "{\"op\":\"add\",\"path\":\"/elements/grad\",\"value\":",
            "{\"key\":\"grad\",\"kind\":\"LinearGradient\",\"props\":{\"id\":\"glow\"}}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/bg\",\"value\":",
            "{\"key\":\"bg\",\"kind\":\"Rect\",\"props\":",
            "{\"x\":0,\"y\":0,\"width\":10,\"height\":10,\"fill\":\"url(#glow)\"}}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"bg\"}\n",
        );
        let doc = compile_str(stream);
        let options = RenderOptions {
            id_prefix: Some("inst1".into()),
        };
        let markup = render(&doc, &default_catalog(), &options);

        assert!(markup.contains("id=\"inst1-glow\""));
        assert!(markup.contains("fill=\"url(#inst1-glow)\""));
    }

    #[test]
    fn invalid_element_is_skipped_with_warning_but_siblings_survive() {
        let stream = concat!(
            "{\"op\":\"add\",\"path\":\"/elements/g\",\"value\":",
            "{\"key\":\"g\",\"kind\":\"Group\",\"props\":{},\"children\":[\"bad\",\"good\"]}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/bad\",\"value\":",
            "{\"key\":\"bad\",\"kind\":\"Rect\",\"props\":{\"x\":0}}}\n",
            "{\"op\":\"add\",\"path\":\"/elements/good\",\"value\":",
            "{\"key\":\"good\",\"kind\":\"Circle\",\"props\":{\"cx\":1,\"cy\":1,\"r\":1}}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"g\"}\n",
        );
        let doc = compile_str(stream);
        let outcome =
            render_with_diagnostics(&doc, &default_catalog(), &RenderOptions::default());

        assert!(outcome.markup.contains("<circle"));
        assert!(!outcome.markup.contains("<rect"));
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].key, "bad");
        assert_eq!(outcome.warnings[0].kind, "Rect");
    }

    #[test]
    fn dangling_child_renders_nothing() {
        let stream = concat!(
            "{\"op\":\"add\",\"path\":\"/elements/g\",\"value\":",
            "{\"key\":\"g\",\"kind\":\"Group\",\"props\":{},\"children\":[\"later\"]}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"g\"}\n",
        );
        let doc = compile_str(stream);
        assert!(plain_render(&doc).contains("<g/>"));
    }

    #[test]
    fn text_kind_emits_escaped_content() {
        let stream = concat!(
            "{\"op\":\"add\",\"path\":\"/elements/t\",\"value\":",
            "{\"key\":\"t\",\"kind\":\"Text\",\"props\":",
            "{\"x\":10,\"y\":20,\"text\":\"a < b\",\"fontSize\":14}}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"t\"}\n",
        );
        let doc = compile_str(stream);
        let markup = plain_render(&doc);

        assert!(markup.contains("<text x=\"10\" y=\"20\" font-size=\"14\">a &lt; b</text>"));
        assert!(!markup.contains("text=\""));
    }

    #[test]
    fn custom_serializer_overrides_generic_emission() {
        fn marker(props: &ValidatedProps, children: &str) -> String {
            let label = props.get("label").and_then(|v| v.as_str()).unwrap_or("");
            format!("<!--{label}-->{children}")
        }

        let catalog = Catalog::builder()
            .register(
                "Marker",
                ElementDef::new(
                    "Test marker",
                    PropSchema::new().required("label", PropType::Text),
                )
                .serializer(marker),
            )
            .build();
        let doc = compile_str(concat!(
            "{\"op\":\"add\",\"path\":\"/elements/m\",\"value\":",
            "{\"key\":\"m\",\"kind\":\"Marker\",\"props\":{\"label\":\"here\"}}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"m\"}\n",
        ));
        let markup = render(&doc, &catalog, &RenderOptions::default());
        assert!(markup.contains("<!--here-->"));
    }

    #[test]
    fn unregistered_kind_renders_nothing_without_warning() {
        let doc = compile_str(concat!(
            "{\"op\":\"add\",\"path\":\"/elements/x\",\"value\":",
            "{\"key\":\"x\",\"kind\":\"Sparkle\",\"props\":{}}}\n",
            "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"x\"}\n",
        ));
        let outcome =
            render_with_diagnostics(&doc, &default_catalog(), &RenderOptions::default());
        assert!(!outcome.markup.contains("sparkle"));
        assert!(outcome.warnings.is_empty());
    }
}

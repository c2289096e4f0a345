//! Stock element catalog.
//!
//! Covers the standard drawing vocabulary: basic shapes, text, grouping,
//! and the identifier-addressed definition kinds (gradients and filters).
//! Numeric props accept numbers or numeric strings throughout, since
//! generators emit either form.

use super::schema::{PropSchema, PropType};
use super::{Catalog, ElementDef};

/// Creates the default catalog.
///
/// # Example
///
/// ```
/// use svgflow_render::catalog::defaults::default_catalog;
///
/// let catalog = default_catalog();
/// assert!(catalog.lookup("Rect").is_some());
/// assert!(catalog.lookup("LinearGradient").unwrap().is_def);
/// ```
pub fn default_catalog() -> Catalog {
    Catalog::builder()
        .register(
            "Rect",
            ElementDef::new(
                "Rectangle",
                PropSchema::new()
                    .required("x", PropType::Numeric)
                    .required("y", PropType::Numeric)
                    .required("width", PropType::Numeric)
                    .required("height", PropType::Numeric)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric)
                    .optional("rx", PropType::Numeric)
                    .optional("ry", PropType::Numeric),
            ),
        )
        .register(
            "Circle",
            ElementDef::new(
                "Circle",
                PropSchema::new()
                    .required("cx", PropType::Numeric)
                    .required("cy", PropType::Numeric)
                    .required("r", PropType::Numeric)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric),
            ),
        )
        .register(
            "Ellipse",
            ElementDef::new(
                "Ellipse",
                PropSchema::new()
                    .required("cx", PropType::Numeric)
                    .required("cy", PropType::Numeric)
                    .required("rx", PropType::Numeric)
                    .required("ry", PropType::Numeric)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric),
            ),
        )
        .register(
            "Line",
            ElementDef::new(
                "Line",
                PropSchema::new()
                    .required("x1", PropType::Numeric)
                    .required("y1", PropType::Numeric)
                    .required("x2", PropType::Numeric)
                    .required("y2", PropType::Numeric)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric)
                    .optional("strokeDasharray", PropType::Text),
            ),
        )
        .register(
            "Path",
            ElementDef::new(
                "Path",
                PropSchema::new()
                    .required("d", PropType::Text)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric),
            ),
        )
        .register(
            "Polyline",
            ElementDef::new(
                "Polyline",
                PropSchema::new()
                    .required("points", PropType::Text)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric),
            ),
        )
        .register(
            "Polygon",
            ElementDef::new(
                "Polygon",
                PropSchema::new()
                    .required("points", PropType::Text)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric),
            ),
        )
        .register(
            "Text",
            ElementDef::new(
                "Text",
                PropSchema::new()
                    .required("x", PropType::Numeric)
                    .required("y", PropType::Numeric)
                    .required("text", PropType::Text)
                    .optional("fontSize", PropType::Numeric)
                    .optional("fill", PropType::Text)
                    .optional("fontFamily", PropType::Text)
                    .optional("textAnchor", PropType::Text),
            )
            .with_children()
            .text_bearing(),
        )
        .register(
            "Group",
            ElementDef::new(
                "Group container for multiple elements",
                PropSchema::new()
                    .optional("transform", PropType::Text)
                    .optional("fill", PropType::Text)
                    .optional("stroke", PropType::Text)
                    .optional("strokeWidth", PropType::Numeric),
            )
            .tag("g")
            .with_children(),
        )
        .register(
            "LinearGradient",
            ElementDef::new(
                "Linear gradient definition. Must have an id. Children should be Stop elements.",
                PropSchema::new()
                    .required("id", PropType::Text)
                    .optional("x1", PropType::Text)
                    .optional("y1", PropType::Text)
                    .optional("x2", PropType::Text)
                    .optional("y2", PropType::Text),
            )
            .tag("linearGradient")
            .definition()
            .with_children(),
        )
        .register(
            "RadialGradient",
            ElementDef::new(
                "Radial gradient definition. Must have an id. Children should be Stop elements.",
                PropSchema::new()
                    .required("id", PropType::Text)
                    .optional("cx", PropType::Text)
                    .optional("cy", PropType::Text)
                    .optional("r", PropType::Text)
                    .optional("fx", PropType::Text)
                    .optional("fy", PropType::Text),
            )
            .tag("radialGradient")
            .definition()
            .with_children(),
        )
        .register(
            "Stop",
            ElementDef::new(
                "Gradient stop. Used inside LinearGradient or RadialGradient.",
                PropSchema::new()
                    .required("offset", PropType::Text)
                    .required("stopColor", PropType::Text)
                    .optional("stopOpacity", PropType::Numeric),
            ),
        )
        .register(
            "Filter",
            ElementDef::new(
                "Filter definition. Must have an id. Children should be filter primitives like FeGaussianBlur.",
                PropSchema::new()
                    .required("id", PropType::Text)
                    .optional("x", PropType::Text)
                    .optional("y", PropType::Text)
                    .optional("width", PropType::Text)
                    .optional("height", PropType::Text),
            )
            .definition()
            .with_children(),
        )
        .register(
            "FeGaussianBlur",
            ElementDef::new(
                "Gaussian blur filter primitive.",
                PropSchema::new()
                    .optional("in", PropType::Text)
                    .required("stdDeviation", PropType::Numeric)
                    .optional("result", PropType::Text),
            )
            .tag("feGaussianBlur"),
        )
        .register(
            "FeDropShadow",
            ElementDef::new(
                "Drop shadow filter primitive.",
                PropSchema::new()
                    .optional("dx", PropType::Numeric)
                    .optional("dy", PropType::Numeric)
                    .optional("stdDeviation", PropType::Numeric)
                    .optional("floodColor", PropType::Text)
                    .optional("floodOpacity", PropType::Numeric),
            )
            .tag("feDropShadow"),
        )
        .build()
}

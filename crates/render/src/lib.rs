//! Catalog-validated SVG rendering for streamed documents.
//!
//! This crate turns a [`svgflow_core::Document`] into SVG markup. Every
//! element is checked against a [`Catalog`] of registered kinds; elements
//! that fail validation are skipped leniently during rendering, while
//! [`Catalog::validate_document`] offers a strict all-or-nothing check for
//! final acceptance.

#![deny(missing_docs)]

pub mod catalog;
pub mod renderer;

pub use catalog::defaults::default_catalog;
pub use catalog::schema::{PropField, PropSchema, PropType, SchemaViolation, ValidatedProps};
pub use catalog::{Catalog, CatalogBuilder, DocumentError, ElementDef, SerializerFn};
pub use renderer::{RenderOptions, RenderOutcome, RenderWarning, render, render_with_diagnostics};

#![deny(missing_docs)]
//! svgflow core: document model, patch wire format, and streaming compiler.

/// Streaming patch compiler.
pub mod compiler;
/// Document, element, and viewport types.
pub mod document;
/// Core error types.
pub mod error;
/// Patch wire format and path classification.
pub mod patch;

pub use compiler::{PushOutcome, StreamCompiler, compile_str};
pub use document::{DEFAULT_VIEWPORT_SIZE, Document, Element, Viewport};
pub use error::PatchParseError;
pub use patch::{Patch, PatchOp, PatchTarget};

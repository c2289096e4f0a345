//! Streaming patch compiler.
//!
//! Converts a possibly-fragmented stream of patch lines into a live
//! [`Document`] snapshot. Chunk boundaries are arbitrary: the compiler
//! buffers the unterminated tail of each push and only processes complete
//! lines, so a line split across two transport chunks is applied exactly
//! once, when its newline arrives.
//!
//! Applying the same ordered sequence of lines to a fresh compiler always
//! yields a bit-identical final document regardless of chunking; replaying
//! stored raw text is therefore a supported recovery mechanism.

use crate::document::Document;
use crate::error::PatchParseError;
use crate::patch::{Patch, PatchTarget};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Result of one [`StreamCompiler::push`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct PushOutcome {
    /// Snapshot of the document after applying this call's patches.
    pub document: Document,
    /// Patches applied this call, in arrival order.
    pub patches: Vec<Patch>,
}

/// Incremental compiler for a newline-delimited patch stream.
///
/// One compiler instance serves one logical stream; it has no reentrancy
/// guard and must not be shared across concurrent feeds.
#[derive(Debug, Default)]
pub struct StreamCompiler {
    buffer: String,
    root: Option<String>,
    viewport: Option<Value>,
    elements: BTreeMap<String, Value>,
}

impl StreamCompiler {
    /// Creates a compiler with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one transport chunk and applies every complete line in it.
    ///
    /// Unparsable lines are dropped without affecting the document or
    /// aborting the stream; blank lines are skipped. The trailing fragment
    /// after the last newline is buffered for the next call.
    pub fn push(&mut self, chunk: &str) -> PushOutcome {
        self.buffer.push_str(chunk);

        let buffered = std::mem::take(&mut self.buffer);
        let (complete, tail) = match buffered.rfind('\n') {
            Some(idx) => (&buffered[..idx], &buffered[idx + 1..]),
            None => ("", buffered.as_str()),
        };
        self.buffer = tail.to_string();

        let mut patches = Vec::new();
        for line in complete.split('\n') {
            match Patch::from_line(line) {
                Ok(patch) => {
                    self.apply(&patch);
                    patches.push(patch);
                }
                Err(PatchParseError::BlankLine) => {}
                Err(err) => log::debug!("dropping unparsable patch line: {err}"),
            }
        }

        PushOutcome {
            document: self.snapshot(),
            patches,
        }
    }

    /// Processes any buffered unterminated tail as a final line and returns
    /// the resulting document.
    ///
    /// Useful when a stream ends without a trailing newline.
    pub fn finish(mut self) -> Document {
        if !self.buffer.trim().is_empty() {
            let tail = std::mem::take(&mut self.buffer);
            match Patch::from_line(&tail) {
                Ok(patch) => self.apply(&patch),
                Err(err) => log::debug!("dropping unparsable patch line: {err}"),
            }
        }
        self.snapshot()
    }

    /// Returns the merged document snapshot.
    pub fn snapshot(&self) -> Document {
        Document {
            root: self.root.clone(),
            viewport: self.viewport.clone(),
            elements: self.elements.clone(),
        }
    }

    fn apply(&mut self, patch: &Patch) {
        match patch.target() {
            PatchTarget::Root => {
                if patch.op.is_write() {
                    // Only element-key strings are meaningful roots.
                    if let Some(key) = patch.value.as_ref().and_then(Value::as_str) {
                        self.root = Some(key.to_string());
                    }
                } else {
                    self.root = None;
                }
            }
            PatchTarget::Viewport => {
                // Whole-value replacement; no partial merge of width/height.
                if patch.op.is_write() {
                    self.viewport = patch.value.clone();
                } else {
                    self.viewport = None;
                }
            }
            PatchTarget::Element(key) => {
                if patch.op.is_write() {
                    if let Some(value) = &patch.value {
                        self.elements.insert(key.to_string(), value.clone());
                    }
                } else {
                    // Dangling references from other children arrays are
                    // tolerated, not repaired.
                    self.elements.remove(key);
                }
            }
            PatchTarget::ElementField { key, segments } => {
                // Deep mutation requires the element to exist already; a
                // generator referencing a key out of order is a no-op.
                let Some(element) = self.elements.get_mut(key) else {
                    return;
                };
                apply_deep(element, &segments, patch);
            }
            PatchTarget::Unknown => {}
        }
    }
}

/// Applies a patch below an element root, walking `segments` and creating
/// empty mappings at missing or non-container intermediates. A segment that
/// cannot address into an existing array voids the whole patch.
fn apply_deep(element: &mut Value, segments: &[&str], patch: &Patch) {
    let Some((last, intermediate)) = segments.split_last() else {
        return;
    };

    let mut current = element;
    for seg in intermediate {
        let Some(next) = descend(current, seg) else {
            return;
        };
        current = next;
    }

    if patch.op.is_write() {
        if let Some(value) = &patch.value {
            write_at(current, last, value.clone());
        }
    } else {
        remove_at(current, last);
    }
}

/// Steps one segment deeper. Missing or scalar slots under an object become
/// empty mappings; an existing array is traversable only by an in-bounds
/// numeric index, and any other segment returns `None` so the array is never
/// replaced by mistake.
fn descend<'v>(node: &'v mut Value, seg: &str) -> Option<&'v mut Value> {
    if let Value::Array(items) = node {
        let idx = seg.parse::<usize>().ok()?;
        return items.get_mut(idx);
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Some(
            map.entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
        ),
        _ => None,
    }
}

fn write_at(parent: &mut Value, seg: &str, value: Value) {
    match parent {
        Value::Object(map) => {
            map.insert(seg.to_string(), value);
        }
        Value::Array(items) => {
            if let Ok(idx) = seg.parse::<usize>() {
                if idx < items.len() {
                    items[idx] = value;
                } else if idx == items.len() {
                    items.push(value);
                }
            }
        }
        _ => {}
    }
}

fn remove_at(parent: &mut Value, seg: &str) {
    match parent {
        Value::Object(map) => {
            map.remove(seg);
        }
        Value::Array(items) => {
            // Non-numeric or out-of-bounds index against an array is a no-op.
            if let Ok(idx) = seg.parse::<usize>() {
                if idx < items.len() {
                    items.remove(idx);
                }
            }
        }
        _ => {}
    }
}

/// Drives a fresh compiler with the full raw text of a stored stream.
///
/// This is the replay primitive: because compilation is deterministic under
/// any chunking, the result is identical to the original live run.
pub fn compile_str(text: &str) -> Document {
    let mut compiler = StreamCompiler::new();
    compiler.push(text);
    compiler.finish()
}

//! Patch wire format: one JSON object per line.
//!
//! Each line of the stream is `{"op": "...", "path": "...", "value": ...}`.
//! `set`, `add`, and `replace` are deliberately equivalent (overwrite or
//! create); only `remove` differs. This mirrors the upstream generator
//! contract and is covered by the `op_equivalence` compiler tests rather
//! than being tightened to RFC 6902 semantics.

use crate::error::PatchParseError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Patch operation verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Overwrite or create the addressed value.
    Set,
    /// Overwrite or create the addressed value.
    Add,
    /// Overwrite or create the addressed value.
    Replace,
    /// Delete the addressed value.
    Remove,
}

impl PatchOp {
    /// Returns true for the three overwrite-or-create verbs.
    pub fn is_write(self) -> bool {
        !matches!(self, PatchOp::Remove)
    }
}

/// A single document mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Operation verb.
    pub op: PatchOp,
    /// Slash-delimited address into the document.
    pub path: String,
    /// New value; absent for `remove`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Patch {
    /// Parses one line of the stream into a patch.
    ///
    /// Blank lines and non-JSON lines are errors here; the streaming
    /// compiler maps those errors to silent drops.
    pub fn from_line(line: &str) -> Result<Patch, PatchParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(PatchParseError::BlankLine);
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Classifies the patch path into a structural target.
    pub fn target(&self) -> PatchTarget<'_> {
        PatchTarget::parse(&self.path)
    }
}

/// Recognized path shapes of the patch address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchTarget<'a> {
    /// `/root` — the top-level element key.
    Root,
    /// `/viewport` — the whole viewport value.
    Viewport,
    /// `/elements/<key>` — a whole element.
    Element(&'a str),
    /// `/elements/<key>/<seg>/...` — a nested field of an element.
    ElementField {
        /// Element key addressed by the second segment.
        key: &'a str,
        /// Remaining path segments below the element.
        segments: Vec<&'a str>,
    },
    /// Anything else; applied as a no-op.
    Unknown,
}

impl<'a> PatchTarget<'a> {
    /// Parses a slash-delimited path into a target.
    pub fn parse(path: &'a str) -> Self {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match segments.next() {
            Some("root") => {
                if segments.next().is_none() {
                    PatchTarget::Root
                } else {
                    PatchTarget::Unknown
                }
            }
            Some("viewport") => {
                if segments.next().is_none() {
                    PatchTarget::Viewport
                } else {
                    PatchTarget::Unknown
                }
            }
            Some("elements") => {
                let Some(key) = segments.next() else {
                    return PatchTarget::Unknown;
                };
                let rest: Vec<&str> = segments.collect();
                if rest.is_empty() {
                    PatchTarget::Element(key)
                } else {
                    PatchTarget::ElementField {
                        key,
                        segments: rest,
                    }
                }
            }
            _ => PatchTarget::Unknown,
        }
    }
}

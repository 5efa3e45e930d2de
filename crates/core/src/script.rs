//! Script entries and their serialization for the bootstrap.

use serde::Serialize;

use crate::error::{CoreError, Result};

/// One `<script>` tag to load in the browser.
///
/// Immutable once constructed; the manifest builder creates these and both
/// the tag-rendering path and the bootstrap consume them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptEntry {
    pub src: String,
    /// Load asynchronously (`async` attribute on the tag).
    #[serde(rename = "async", skip_serializing_if = "std::ops::Not::not")]
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_origin: Option<String>,
}

impl ScriptEntry {
    /// Creates a synchronous entry with only a source URL.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            is_async: false,
            nonce: None,
            id: None,
            cross_origin: None,
        }
    }

    /// Marks the script for asynchronous loading.
    pub fn with_async(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_cross_origin(mut self, cross_origin: impl Into<String>) -> Self {
        self.cross_origin = Some(cross_origin.into());
        self
    }

    /// Fills nonce and cross-origin from component-level defaults when the
    /// entry does not carry its own.
    pub fn inherit(mut self, nonce: Option<&str>, cross_origin: Option<&str>) -> Self {
        if self.nonce.is_none() {
            self.nonce = nonce.map(str::to_owned);
        }
        if self.cross_origin.is_none() {
            self.cross_origin = cross_origin.map(str::to_owned);
        }
        self
    }
}

/// Serializes entries into the body of the bootstrap's `var scripts = [...]`
/// array literal: one JSON object per line, comma-joined, newline-framed.
pub fn serialize_entries(entries: &[ScriptEntry]) -> Result<String> {
    let objects = entries
        .iter()
        .map(|entry| serde_json::to_string(entry).map_err(|e| CoreError::Serialization(e.to_string())))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("\n{}\n", objects.join(",\n")))
}

//! Explicit rendering context for the script injector.
//!
//! The framework hands these values in directly; nothing is read from
//! ambient or inherited state, so the manifest builder and the component
//! stay testable in isolation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hydration payload for one page render. Serialized into the inline data
/// script for the client runtime to resume rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// Route of the page being rendered, e.g. `/` or `/_error`.
    pub page: String,
    pub build_id: String,
    /// Per-page build ids: bundles live under `static/client/pages` with the
    /// build id embedded in the file name.
    #[serde(default)]
    pub dynamic_build_id: bool,
    /// Page-provided data forwarded verbatim to the client.
    #[serde(default)]
    pub props: Value,
}

impl PageData {
    pub fn new(page: impl Into<String>, build_id: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            build_id: build_id.into(),
            dynamic_build_id: false,
            props: Value::Null,
        }
    }

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    pub fn with_dynamic_build_id(mut self) -> Self {
        self.dynamic_build_id = true;
        self
    }
}

/// A code-split chunk the page imported dynamically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub file: String,
}

impl ManifestItem {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

/// Everything the injector needs to know about the current document render.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Prefix for all bundle URLs (CDN or sub-path deployments).
    pub asset_prefix: String,
    pub page_data: PageData,
    /// Static build output files for the page; only `.js` files render.
    pub files: Vec<String>,
    /// Development-only helper files, rendered as plain tags first.
    pub dev_files: Vec<String>,
    /// Chunks for dynamic imports the page may reference immediately.
    pub dynamic_imports: Vec<ManifestItem>,
    /// Static markup render: no client hydration, no chunk loading.
    pub static_markup: bool,
    /// AMP variant of the page.
    pub amp: bool,
    /// Cache-busting query suffix appended to every bundle URL.
    pub cache_query: String,
}

impl DocumentContext {
    pub fn new(page_data: PageData) -> Self {
        Self {
            asset_prefix: String::new(),
            page_data,
            files: Vec::new(),
            dev_files: Vec::new(),
            dynamic_imports: Vec::new(),
            static_markup: false,
            amp: false,
            cache_query: String::new(),
        }
    }

    pub fn with_asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.asset_prefix = prefix.into();
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    pub fn with_dev_files(mut self, dev_files: Vec<String>) -> Self {
        self.dev_files = dev_files;
        self
    }

    pub fn with_dynamic_imports(mut self, imports: Vec<ManifestItem>) -> Self {
        self.dynamic_imports = imports;
        self
    }

    pub fn with_static_markup(mut self) -> Self {
        self.static_markup = true;
        self
    }

    pub fn with_amp(mut self) -> Self {
        self.amp = true;
        self
    }

    pub fn with_cache_query(mut self, query: impl Into<String>) -> Self {
        self.cache_query = query.into();
        self
    }
}

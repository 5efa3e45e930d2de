//! Injector configuration.

use polyboot_core::{PolyfillDefinition, ScriptEntry};

/// Component-level configuration for the script injector.
///
/// Defaults match the behavior most pages want: client-side detection on,
/// minified polyfill bundle, monitoring enabled.
#[derive(Debug, Clone)]
pub struct InjectorProps {
    /// Nonce applied to every script this component renders, unless an
    /// entry carries its own.
    pub nonce: Option<String>,
    /// Cross-origin attribute inherited the same way.
    pub cross_origin: Option<String>,
    /// Sends the `rum` parameter to the polyfill service.
    pub allow_user_monitoring: bool,
    /// Requests minified polyfills from the service.
    pub minify: bool,
    /// Detect features in the user's browser instead of letting the service
    /// sniff the user agent.
    pub use_feature_detection: bool,
    /// When false, `features` and `use_feature_detection` are ignored and
    /// the manifest renders as plain script tags.
    pub preload_polyfills: bool,
    /// Development render (enables the AMP dev-only output).
    pub development: bool,
    /// Required features, usually picked from [`polyboot_core::catalog`].
    pub features: Vec<PolyfillDefinition>,
    /// Scripts to load before the framework bundles.
    pub pre_load_scripts: Vec<ScriptEntry>,
    /// Scripts to load after the framework bundles.
    pub post_load_scripts: Vec<ScriptEntry>,
}

impl Default for InjectorProps {
    fn default() -> Self {
        Self {
            nonce: None,
            cross_origin: None,
            allow_user_monitoring: true,
            minify: true,
            use_feature_detection: true,
            preload_polyfills: true,
            development: false,
            features: Vec::new(),
            pre_load_scripts: Vec::new(),
            post_load_scripts: Vec::new(),
        }
    }
}

/// Capability descriptor for the framework generation being rendered.
///
/// The generations differ only in which bundles exist, so one builder
/// branches on these flags instead of keeping parallel implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkVariant {
    /// Dynamic-import chunks appear in the manifest.
    pub dynamic_chunks: bool,
    /// A dedicated `_error` bundle ships alongside the app bundle.
    pub error_bundle: bool,
    /// AMP pages are a supported render target.
    pub amp_pages: bool,
}

impl FrameworkVariant {
    /// Current generation: dynamic chunks and AMP, error page folded into
    /// the app bundle.
    pub fn latest() -> Self {
        Self {
            dynamic_chunks: true,
            error_bundle: false,
            amp_pages: true,
        }
    }

    /// Generation that still shipped a standalone `_error` bundle.
    pub fn with_error_bundle() -> Self {
        Self {
            dynamic_chunks: true,
            error_bundle: true,
            amp_pages: false,
        }
    }

    /// Oldest supported generation: page/app/error trio only.
    pub fn legacy() -> Self {
        Self {
            dynamic_chunks: false,
            error_bundle: true,
            amp_pages: false,
        }
    }
}

impl Default for FrameworkVariant {
    fn default() -> Self {
        Self::latest()
    }
}

//! Inline bootstrap script generation.
//!
//! The bootstrap runs once in a fresh page context, before any module system
//! is available, so it uses plain script-global state and a plain callback:
//! `_nextscript_feats` collects the features to request and
//! `_nspolyfillComplete` resumes script injection once polyfills (if any)
//! have loaded.

use crate::features::{generate_feature_checks, PolyfillDefinition};

/// Completion callback name the polyfill service invokes after its bundle
/// has executed. Part of the CDN query contract.
pub const POLYFILL_CALLBACK: &str = "_nspolyfillComplete";

/// Configuration for one generated bootstrap. No state is shared between
/// renders; every call produces a fresh script from immutable inputs.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Sends `rum=1` to the polyfill service (real user monitoring).
    pub allow_user_monitoring: bool,
    /// Requests the minified polyfill bundle (`polyfill.min.js`).
    pub minify: bool,
    /// Detect features client-side instead of letting the service sniff the
    /// user agent.
    pub use_feature_detection: bool,
    /// Polyfills the page may need.
    pub features: Vec<PolyfillDefinition>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            allow_user_monitoring: true,
            minify: true,
            use_feature_detection: true,
            features: Vec::new(),
        }
    }
}

/// Builds the JavaScript expression for the CDN request URL.
///
/// The feature list is joined at runtime in the browser, so this returns a
/// string-concatenation expression, not a finished URL. Query contract:
/// `.min.` iff minifying, `,always` and the pinned `ua` iff detection ran
/// client-side, `rum` reflecting the monitoring flag.
pub fn polyfill_src_expr(config: &BootstrapConfig) -> String {
    let min = if config.minify { "min." } else { "" };
    let flags = if config.use_feature_detection {
        "gated,always"
    } else {
        "gated"
    };
    let rum = i32::from(config.allow_user_monitoring);
    // A modern UA pin skips the service's own sniffing; an unknown UA would
    // otherwise yield no polyfills even with 'always'.
    let ua = if config.use_feature_detection {
        "&ua=chrome/69.0.0"
    } else {
        ""
    };
    format!(
        "'https://cdn.polyfill.io/v2/polyfill.{min}js?features=' + _nextscript_feats.join(',') + '&flags={flags}&rum={rum}{ua}&callback={POLYFILL_CALLBACK}'"
    )
}

/// Generates the inline bootstrap.
///
/// `scripts` is the pre-serialized body of the script array literal, from
/// [`crate::serialize_entries`]. The generated code evaluates the feature
/// checks (or unconditionally requests the `default` group when detection is
/// off), fetches the polyfill bundle only when a feature is missing, and in
/// either case injects the script list into `<body>` in order.
pub fn generate_bootstrap(config: &BootstrapConfig, scripts: &str) -> String {
    let use_feature_detection = config.use_feature_detection;
    let checks = generate_feature_checks(&config.features);
    let src_expr = polyfill_src_expr(config);

    format!(
        r#"
  var _nextscript_feats = [];
  if ({use_feature_detection}) {{
    {checks}
  }} else {{
    _nextscript_feats.push('default');
  }}

  function cs(src, isAsync, useHead, nonce, id) {{
    var s = document.createElement('script');
    s.src = src;
    s.async = isAsync;
    if (nonce) {{ s.nonce = nonce; }}
    if (id) {{ s.id = id; }}
    if (useHead) {{
      document.head.appendChild(s);
    }} else {{
      document.body.appendChild(s);
    }}
  }}

  if (_nextscript_feats.length) {{
    var src = {src_expr};
    cs(src, true, true);
  }} else {{
    {POLYFILL_CALLBACK}();
  }}

  function {POLYFILL_CALLBACK}() {{
    var scripts = [{scripts}];
    for (var i = 0; i < scripts.length; i++) {{
      cs(scripts[i].src, scripts[i].async, false, scripts[i].nonce, scripts[i].id);
    }}
  }}
  "#
    )
}

//! Pure polyfill-bootstrap logic - no I/O, no async, no side effects.
//!
//! This crate provides:
//! - The polyfill feature catalog and feature-check generation
//! - The inline bootstrap script generator and its CDN query contract
//! - Script entry serialization and inline-JSON escaping
//! - A conservative minifier for the generated bootstrap
//!
//! # Example
//!
//! ```
//! use polyboot_core::{
//!     catalog, generate_bootstrap, generate_feature_checks, serialize_entries,
//!     BootstrapConfig, ScriptEntry,
//! };
//!
//! // Feature checks are plain JavaScript statements.
//! let checks = generate_feature_checks(&[catalog::fetch()]);
//! assert_eq!(checks, "('fetch' in window) || _nextscript_feats.push('fetch');");
//!
//! // The bootstrap wires checks, the CDN fetch, and deferred injection.
//! let scripts = serialize_entries(&[ScriptEntry::new("/app.js").with_async()]).unwrap();
//! let config = BootstrapConfig {
//!     features: vec![catalog::fetch()],
//!     ..BootstrapConfig::default()
//! };
//! let bootstrap = generate_bootstrap(&config, &scripts);
//! assert!(bootstrap.contains("cdn.polyfill.io"));
//! ```

mod bootstrap;
mod error;
mod escape;
mod features;
mod minify;
mod script;

pub use bootstrap::{generate_bootstrap, polyfill_src_expr, BootstrapConfig, POLYFILL_CALLBACK};
pub use error::{CoreError, Result, MAX_PAYLOAD_DEPTH};
pub use escape::{html_escape_json, inline_script_source};
pub use features::{catalog, generate_feature_checks, PolyfillDefinition};
pub use minify::minify_script;
pub use script::{serialize_entries, ScriptEntry};

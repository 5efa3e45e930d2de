//! Document script injection with polyfill preloading.
//!
//! This crate renders the script section of a server-side document: the
//! inline hydration-data script, an ordered manifest of bundle scripts, and
//! an inline bootstrap that feature-detects the browser and fetches
//! polyfills from the CDN only when something is missing.
//!
//! All inputs are explicit; one injector value can render any number of
//! documents without shared state.
//!
//! # Example
//!
//! ```
//! use polyboot_render::{DocumentContext, FrameworkVariant, InjectorProps, PageData, ScriptInjector};
//! use serde_json::json;
//!
//! let injector = ScriptInjector::new(InjectorProps::default(), FrameworkVariant::latest());
//! let ctx = DocumentContext::new(
//!     PageData::new("/", "build-1").with_props(json!({ "greeting": "hi" })),
//! );
//!
//! let html = injector.render(&ctx).unwrap();
//! assert!(html.contains("__NEXT_DATA__"));
//! assert!(html.contains("__next-preloader"));
//! ```

mod component;
mod config;
mod context;
mod error;
mod manifest;

pub use component::ScriptInjector;
pub use config::{FrameworkVariant, InjectorProps};
pub use context::{DocumentContext, ManifestItem, PageData};
pub use error::{RenderError, Result};
pub use manifest::{build_manifest, dynamic_chunks, static_files, ERROR_PAGE};

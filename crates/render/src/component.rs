//! The document script injector.
//!
//! Renders the script section of a server-side document: dev helper tags,
//! the inline hydration-data script, and either a single inline bootstrap
//! (feature detection + conditional polyfill fetch + deferred injection)
//! or plain tags for the manifest.

use polyboot_core::{
    generate_bootstrap, inline_script_source, minify_script, serialize_entries, BootstrapConfig,
    CoreError, ScriptEntry,
};

use crate::config::{FrameworkVariant, InjectorProps};
use crate::context::DocumentContext;
use crate::error::{RenderError, Result};
use crate::manifest::build_manifest;

/// AMP runtime files rendered on development AMP pages.
const AMP_DEV_FILES: [&str; 2] = ["static/runtime/amp.js", "static/runtime/webpack.js"];

/// Renders every `<script>` element a document needs.
///
/// One injector can serve many renders; it holds configuration only, never
/// per-render state.
#[derive(Debug, Clone, Default)]
pub struct ScriptInjector {
    props: InjectorProps,
    variant: FrameworkVariant,
}

impl ScriptInjector {
    pub fn new(props: InjectorProps, variant: FrameworkVariant) -> Self {
        Self { props, variant }
    }

    /// Renders the document fragment for the given context.
    pub fn render(&self, ctx: &DocumentContext) -> Result<String> {
        if ctx.amp {
            if !self.variant.amp_pages {
                return Err(RenderError::UnsupportedContext(
                    "AMP page rendered against a variant without AMP support".into(),
                ));
            }
            return self.render_amp(ctx);
        }

        let preload = self.requires_preloading();
        tracing::debug!(
            page = %ctx.page_data.page,
            static_markup = ctx.static_markup,
            preload,
            "rendering document scripts"
        );

        let mut out = String::new();

        for file in &ctx.dev_files {
            let entry = self.context_entry(ctx, file);
            out.push_str(&script_tag(&entry, &[]));
            out.push('\n');
        }

        if !ctx.static_markup {
            out.push_str(&self.data_script_tag(ctx, false)?);
            out.push('\n');
        }

        let scripts = build_manifest(ctx, &self.props, &self.variant);

        if preload {
            let code = self.bootstrap_source(&scripts)?;
            let mut tag = String::from("<script id=\"__next-preloader\"");
            if let Some(nonce) = &self.props.nonce {
                push_attr(&mut tag, "nonce", nonce);
            }
            tag.push('>');
            tag.push_str(&code);
            tag.push_str("</script>");
            out.push_str(&tag);
            out.push('\n');
        } else {
            for entry in &scripts {
                out.push_str(&script_tag(entry, &[]));
                out.push('\n');
            }
        }

        Ok(out)
    }

    /// Serialized, escaped hydration payload for the inline data script.
    pub fn inline_data_source(&self, ctx: &DocumentContext) -> Result<String> {
        let payload = serde_json::to_value(&ctx.page_data)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        Ok(inline_script_source(&payload, &ctx.page_data.page)?)
    }

    /// The inline bootstrap for the given manifest: pre-load scripts, then
    /// the manifest, then post-load scripts, fed through the generator and
    /// minified. Minification failure falls back to the unminified source.
    fn bootstrap_source(&self, scripts: &[ScriptEntry]) -> Result<String> {
        let props = &self.props;
        let all: Vec<ScriptEntry> = props
            .pre_load_scripts
            .iter()
            .chain(scripts.iter())
            .chain(props.post_load_scripts.iter())
            .cloned()
            .map(|e| e.inherit(props.nonce.as_deref(), props.cross_origin.as_deref()))
            .collect();
        let body = serialize_entries(&all)?;

        let config = BootstrapConfig {
            allow_user_monitoring: props.allow_user_monitoring,
            minify: props.minify,
            use_feature_detection: props.use_feature_detection,
            features: props.features.clone(),
        };
        let bootstrap = generate_bootstrap(&config, &body);

        Ok(match minify_script(&bootstrap) {
            Ok(minified) => minified,
            Err(err) => {
                tracing::warn!(error = %err, "bootstrap minification failed, serving unminified");
                bootstrap
            }
        })
    }

    /// AMP pages carry no client scripts in production; development renders
    /// get the data script and the AMP runtime, all marked dev-only.
    fn render_amp(&self, ctx: &DocumentContext) -> Result<String> {
        if !self.props.development {
            return Ok(String::new());
        }

        let mut out = String::new();
        if !ctx.static_markup {
            out.push_str(&self.data_script_tag(ctx, true)?);
            out.push('\n');
        }
        for file in AMP_DEV_FILES {
            let entry = self.context_entry(ctx, file);
            out.push_str(&script_tag(&entry, &["data-amp-development-mode-only"]));
            out.push('\n');
        }
        Ok(out)
    }

    fn data_script_tag(&self, ctx: &DocumentContext, amp_dev: bool) -> Result<String> {
        let source = self.inline_data_source(ctx)?;
        let mut tag = String::from("<script id=\"__NEXT_DATA__\" type=\"application/json\"");
        if let Some(nonce) = &self.props.nonce {
            push_attr(&mut tag, "nonce", nonce);
        }
        if let Some(cross_origin) = &self.props.cross_origin {
            push_attr(&mut tag, "crossorigin", cross_origin);
        }
        if amp_dev {
            tag.push_str(" data-amp-development-mode-only");
        }
        tag.push('>');
        tag.push_str(&source);
        tag.push_str("</script>");
        Ok(tag)
    }

    fn context_entry(&self, ctx: &DocumentContext, file: &str) -> ScriptEntry {
        ScriptEntry::new(format!(
            "{}/_next/{}{}",
            ctx.asset_prefix, file, ctx.cache_query
        ))
        .inherit(
            self.props.nonce.as_deref(),
            self.props.cross_origin.as_deref(),
        )
    }

    fn requires_preloading(&self) -> bool {
        self.props.preload_polyfills
            && (self.props.use_feature_detection || !self.props.features.is_empty())
    }
}

fn script_tag(entry: &ScriptEntry, extra: &[&str]) -> String {
    let mut tag = String::from("<script");
    push_attr(&mut tag, "src", &entry.src);
    if entry.is_async {
        tag.push_str(" async");
    }
    if let Some(nonce) = &entry.nonce {
        push_attr(&mut tag, "nonce", nonce);
    }
    if let Some(id) = &entry.id {
        push_attr(&mut tag, "id", id);
    }
    if let Some(cross_origin) = &entry.cross_origin {
        push_attr(&mut tag, "crossorigin", cross_origin);
    }
    for attr in extra {
        tag.push(' ');
        tag.push_str(attr);
    }
    tag.push_str("></script>");
    tag
}

fn push_attr(tag: &mut String, name: &str, value: &str) {
    tag.push(' ');
    tag.push_str(name);
    tag.push_str("=\"");
    tag.push_str(&attr_escape(value));
    tag.push('"');
}

fn attr_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageData;
    use polyboot_core::catalog;
    use serde_json::json;

    fn ctx() -> DocumentContext {
        DocumentContext::new(
            PageData::new("/", "b1").with_props(json!({ "message": "hello" })),
        )
    }

    fn injector(props: InjectorProps) -> ScriptInjector {
        ScriptInjector::new(props, FrameworkVariant::latest())
    }

    #[test]
    fn test_render_includes_data_and_preloader() {
        let html = injector(InjectorProps::default()).render(&ctx()).unwrap();
        assert!(html.contains("<script id=\"__NEXT_DATA__\" type=\"application/json\">"));
        assert!(html.contains("\"buildId\":\"b1\""));
        assert!(html.contains("<script id=\"__next-preloader\">"));
        assert!(html.contains("cdn.polyfill.io"));
        // Manifest scripts are injected by the bootstrap, not as plain tags.
        assert!(!html.contains("<script src=\"/_next/static/b1/pages/index.js\""));
    }

    #[test]
    fn test_static_markup_omits_data_script() {
        let html = injector(InjectorProps::default())
            .render(&ctx().with_static_markup())
            .unwrap();
        assert!(!html.contains("__NEXT_DATA__"));
    }

    #[test]
    fn test_plain_tags_without_preloading() {
        let props = InjectorProps {
            preload_polyfills: false,
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx()).unwrap();
        assert!(!html.contains("__next-preloader"));
        assert!(html.contains(
            "<script src=\"/_next/static/b1/pages/index.js\" async id=\"__NEXT_PAGE__/\"></script>"
        ));
        assert!(html.contains("<script src=\"/_next/static/b1/pages/_app.js\" async"));
    }

    #[test]
    fn test_features_alone_trigger_preloading() {
        let props = InjectorProps {
            use_feature_detection: false,
            features: vec![catalog::fetch()],
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx()).unwrap();
        assert!(html.contains("__next-preloader"));
    }

    #[test]
    fn test_bootstrap_orders_pre_page_post() {
        let props = InjectorProps {
            pre_load_scripts: vec![polyboot_core::ScriptEntry::new("/pre.js")],
            post_load_scripts: vec![polyboot_core::ScriptEntry::new("/post.js")],
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx()).unwrap();
        let pre = html.find("/pre.js").unwrap();
        let page = html.find("/_next/static/b1/pages/index.js").unwrap();
        let app = html.find("/_next/static/b1/pages/_app.js").unwrap();
        let post = html.find("/post.js").unwrap();
        assert!(pre < page && page < app && app < post);
    }

    #[test]
    fn test_nonce_inherited_by_bootstrap_entries() {
        let props = InjectorProps {
            nonce: Some("n0".into()),
            pre_load_scripts: vec![polyboot_core::ScriptEntry::new("/pre.js")],
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx()).unwrap();
        assert!(html.contains(r#"{"src":"/pre.js","nonce":"n0"}"#));
        assert!(html.contains("<script id=\"__next-preloader\" nonce=\"n0\">"));
        assert!(html.contains("<script id=\"__NEXT_DATA__\" type=\"application/json\" nonce=\"n0\">"));
    }

    #[test]
    fn test_dev_files_render_before_data_script() {
        let html = injector(InjectorProps::default())
            .render(&ctx().with_dev_files(vec!["static/dev/helper.js".into()]))
            .unwrap();
        let dev = html.find("static/dev/helper.js").unwrap();
        let data = html.find("__NEXT_DATA__").unwrap();
        assert!(dev < data);
    }

    #[test]
    fn test_payload_with_script_close_is_neutralized() {
        let ctx = DocumentContext::new(
            PageData::new("/index", "b1").with_props(json!({ "html": "</script><b>" })),
        );
        let html = injector(InjectorProps::default()).render(&ctx).unwrap();
        assert!(html.contains("\\u003c/script\\u003e"));
        // Exactly the tag closers we emitted, none from the payload.
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_cyclic_analog_payload_names_page() {
        let mut nested = json!(1);
        for _ in 0..200 {
            nested = json!([nested]);
        }
        let ctx = DocumentContext::new(PageData::new("/deep", "b1").with_props(nested));
        let err = injector(InjectorProps::default()).render(&ctx).unwrap_err();
        assert!(err.to_string().contains("/deep"));
    }

    #[test]
    fn test_minify_failure_falls_back_to_unminified() {
        // An unbalanced quote in a feature test defeats the line-based
        // minifier; the component must serve the unminified bootstrap
        // rather than fail the render.
        let props = InjectorProps {
            features: vec![polyboot_core::PolyfillDefinition::new(
                "('broken in window",
                "broken-feature",
            )],
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx()).unwrap();
        assert!(html.contains("__next-preloader"));
        // The raw check line survives, with the template's indentation and
        // blank lines intact - the minifier never touched it.
        assert!(html.contains("('broken in window || _nextscript_feats.push('broken-feature');"));
        assert!(html.contains("  var _nextscript_feats = [];"));
        assert!(html.contains("\n\n"));
    }

    #[test]
    fn test_amp_production_renders_nothing() {
        let html = injector(InjectorProps::default())
            .render(&ctx().with_amp())
            .unwrap();
        assert!(html.is_empty());
    }

    #[test]
    fn test_amp_development_renders_dev_runtime() {
        let props = InjectorProps {
            development: true,
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx().with_amp()).unwrap();
        assert!(html.contains("static/runtime/amp.js"));
        assert!(html.contains("static/runtime/webpack.js"));
        assert!(html.contains("data-amp-development-mode-only"));
        assert!(html.contains("__NEXT_DATA__"));
    }

    #[test]
    fn test_amp_rejected_by_non_amp_variant() {
        let injector =
            ScriptInjector::new(InjectorProps::default(), FrameworkVariant::legacy());
        let err = injector.render(&ctx().with_amp()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedContext(_)));
    }

    #[test]
    fn test_attribute_values_escaped() {
        let props = InjectorProps {
            preload_polyfills: false,
            nonce: Some("a\"b".into()),
            ..InjectorProps::default()
        };
        let html = injector(props).render(&ctx()).unwrap();
        assert!(html.contains("nonce=\"a&quot;b\""));
    }
}

//! Ordered script manifest for a document render.
//!
//! Ordering is load-order-significant: shared app code must be evaluated
//! before page code runs, and dynamic chunks before the page references
//! them. Nothing here reorders by content.

use polyboot_core::ScriptEntry;

use crate::config::{FrameworkVariant, InjectorProps};
use crate::context::DocumentContext;

/// The designated error page; its own bundle is never listed.
pub const ERROR_PAGE: &str = "/_error";

/// Builds the ordered script list for a page render: page bundle (unless
/// rendering the error page), app bundle, the standalone error bundle when
/// the variant ships one, dynamic chunks, then remaining static `.js` files.
/// Static-markup renders keep only the core bundles.
pub fn build_manifest(
    ctx: &DocumentContext,
    props: &InjectorProps,
    variant: &FrameworkVariant,
) -> Vec<ScriptEntry> {
    let page = &ctx.page_data.page;
    let mut scripts = Vec::new();

    if page != ERROR_PAGE {
        scripts.push(
            entry(props, &page_bundle_src(ctx, page)).with_id(format!("__NEXT_PAGE__{page}")),
        );
    }
    scripts.push(entry(props, &page_bundle_src(ctx, "/_app")).with_id("__NEXT_PAGE__/_app"));
    if variant.error_bundle {
        scripts.push(
            entry(props, &page_bundle_src(ctx, ERROR_PAGE))
                .with_id(format!("__NEXT_PAGE__{ERROR_PAGE}")),
        );
    }

    if !ctx.static_markup {
        if variant.dynamic_chunks {
            scripts.extend(dynamic_chunks(ctx, props));
        }
        scripts.extend(static_files(ctx, props));
    }

    scripts
}

/// Dynamic-import chunks, in manifest order.
pub fn dynamic_chunks(ctx: &DocumentContext, props: &InjectorProps) -> Vec<ScriptEntry> {
    ctx.dynamic_imports
        .iter()
        .map(|bundle| entry(props, &build_file_src(ctx, &bundle.file)))
        .collect()
}

/// Remaining static build files, filtered to JavaScript only.
pub fn static_files(ctx: &DocumentContext, props: &InjectorProps) -> Vec<ScriptEntry> {
    ctx.files
        .iter()
        .filter(|file| file.ends_with(".js"))
        .map(|file| entry(props, &build_file_src(ctx, file)))
        .collect()
}

fn entry(props: &InjectorProps, src: &str) -> ScriptEntry {
    ScriptEntry::new(src)
        .with_async()
        .inherit(props.nonce.as_deref(), props.cross_origin.as_deref())
}

fn build_file_src(ctx: &DocumentContext, file: &str) -> String {
    format!("{}/_next/{}{}", ctx.asset_prefix, file, ctx.cache_query)
}

/// URL for a page-level bundle (`/_app`, `/_error`, or the page itself),
/// following the build-id placement the context asks for.
fn page_bundle_src(ctx: &DocumentContext, page: &str) -> String {
    let build_id = &ctx.page_data.build_id;
    let path = if ctx.page_data.dynamic_build_id {
        format!("static/client/pages{}", page_file(page, Some(build_id)))
    } else {
        format!("static/{build_id}/pages{}", page_file(page, None))
    };
    format!("{}/_next/{}{}", ctx.asset_prefix, path, ctx.cache_query)
}

fn page_file(page: &str, build_id: Option<&str>) -> String {
    let base = if page == "/" { "/index" } else { page };
    match build_id {
        Some(id) => format!("{base}.{id}.js"),
        None => format!("{base}.js"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ManifestItem, PageData};

    fn ctx() -> DocumentContext {
        DocumentContext::new(PageData::new("/about", "b1"))
            .with_dynamic_imports(vec![ManifestItem::new("chunks/lodash.js")])
            .with_files(vec![
                "static/commons/main.js".into(),
                "static/style.css".into(),
            ])
    }

    #[test]
    fn test_page_then_app_then_chunks_then_files() {
        let scripts = build_manifest(&ctx(), &InjectorProps::default(), &FrameworkVariant::latest());
        let srcs: Vec<&str> = scripts.iter().map(|s| s.src.as_str()).collect();
        assert_eq!(
            srcs,
            vec![
                "/_next/static/b1/pages/about.js",
                "/_next/static/b1/pages/_app.js",
                "/_next/chunks/lodash.js",
                "/_next/static/commons/main.js",
            ]
        );
    }

    #[test]
    fn test_non_js_files_filtered_out() {
        let scripts = build_manifest(&ctx(), &InjectorProps::default(), &FrameworkVariant::latest());
        assert!(scripts.iter().all(|s| !s.src.contains("style.css")));
    }

    #[test]
    fn test_error_page_omits_its_own_bundle() {
        let ctx = DocumentContext::new(PageData::new(ERROR_PAGE, "b1"));
        let scripts = build_manifest(&ctx, &InjectorProps::default(), &FrameworkVariant::latest());
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].src, "/_next/static/b1/pages/_app.js");
        assert_eq!(scripts[0].id.as_deref(), Some("__NEXT_PAGE__/_app"));
    }

    #[test]
    fn test_error_bundle_variant_lists_error_after_app() {
        let scripts = build_manifest(
            &ctx(),
            &InjectorProps::default(),
            &FrameworkVariant::with_error_bundle(),
        );
        let srcs: Vec<&str> = scripts.iter().map(|s| s.src.as_str()).collect();
        assert_eq!(srcs[0], "/_next/static/b1/pages/about.js");
        assert_eq!(srcs[1], "/_next/static/b1/pages/_app.js");
        assert_eq!(srcs[2], "/_next/static/b1/pages/_error.js");
    }

    #[test]
    fn test_legacy_variant_has_no_dynamic_chunks() {
        let scripts = build_manifest(&ctx(), &InjectorProps::default(), &FrameworkVariant::legacy());
        let srcs: Vec<&str> = scripts.iter().map(|s| s.src.as_str()).collect();
        assert_eq!(
            srcs,
            vec![
                "/_next/static/b1/pages/about.js",
                "/_next/static/b1/pages/_app.js",
                "/_next/static/b1/pages/_error.js",
                "/_next/static/commons/main.js",
            ]
        );
    }

    #[test]
    fn test_static_markup_keeps_core_bundles_only() {
        let ctx = ctx().with_static_markup();
        let scripts = build_manifest(&ctx, &InjectorProps::default(), &FrameworkVariant::latest());
        let srcs: Vec<&str> = scripts.iter().map(|s| s.src.as_str()).collect();
        assert_eq!(
            srcs,
            vec![
                "/_next/static/b1/pages/about.js",
                "/_next/static/b1/pages/_app.js",
            ]
        );
    }

    #[test]
    fn test_index_page_maps_to_index_bundle() {
        let ctx = DocumentContext::new(PageData::new("/", "b1"));
        let scripts = build_manifest(&ctx, &InjectorProps::default(), &FrameworkVariant::latest());
        assert_eq!(scripts[0].src, "/_next/static/b1/pages/index.js");
        assert_eq!(scripts[0].id.as_deref(), Some("__NEXT_PAGE__/"));
    }

    #[test]
    fn test_dynamic_build_id_paths() {
        let ctx = DocumentContext::new(PageData::new("/about", "b1").with_dynamic_build_id());
        let scripts = build_manifest(&ctx, &InjectorProps::default(), &FrameworkVariant::latest());
        assert_eq!(scripts[0].src, "/_next/static/client/pages/about.b1.js");
        assert_eq!(scripts[1].src, "/_next/static/client/pages/_app.b1.js");
    }

    #[test]
    fn test_prefix_and_cache_query_applied_everywhere() {
        let ctx = ctx()
            .with_asset_prefix("https://cdn.example.com")
            .with_cache_query("?ts=42");
        let scripts = build_manifest(&ctx, &InjectorProps::default(), &FrameworkVariant::latest());
        assert!(scripts
            .iter()
            .all(|s| s.src.starts_with("https://cdn.example.com/_next/") && s.src.ends_with("?ts=42")));
    }

    #[test]
    fn test_entries_inherit_nonce_and_cross_origin() {
        let props = InjectorProps {
            nonce: Some("n0".into()),
            cross_origin: Some("anonymous".into()),
            ..InjectorProps::default()
        };
        let scripts = build_manifest(&ctx(), &props, &FrameworkVariant::latest());
        assert!(scripts.iter().all(|s| s.nonce.as_deref() == Some("n0")));
        assert!(scripts
            .iter()
            .all(|s| s.cross_origin.as_deref() == Some("anonymous")));
        assert!(scripts.iter().all(|s| s.is_async));
    }
}

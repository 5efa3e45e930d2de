//! Polyfill feature catalog and feature-check generation.

/// A polyfill the page may need, with an optional feature-detection test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyfillDefinition {
    /// Boolean JavaScript expression that evaluates true when the browser
    /// already supports the feature. `None` means the polyfill is always
    /// requested.
    pub test: Option<String>,
    /// Feature identifier understood by the polyfill service.
    pub feature: String,
}

impl PolyfillDefinition {
    /// Creates a definition guarded by a feature-detection test.
    pub fn new(test: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            test: Some(test.into()),
            feature: feature.into(),
        }
    }

    /// Creates a definition without a test, always requested.
    /// Used for the service's pre-configured groups like `default` or `es6`.
    pub fn unconditional(feature: impl Into<String>) -> Self {
        Self {
            test: None,
            feature: feature.into(),
        }
    }
}

/// The fixed table of polyfills offered by the polyfill service.
///
/// Test expressions are trusted verbatim; they end up inside the generated
/// bootstrap without further validation.
pub mod catalog {
    use super::PolyfillDefinition;

    /* Pre-configured groups offered by the service. */

    pub fn default_group() -> PolyfillDefinition {
        PolyfillDefinition::unconditional("default")
    }

    pub fn es6() -> PolyfillDefinition {
        PolyfillDefinition::unconditional("es6")
    }

    pub fn es2015() -> PolyfillDefinition {
        PolyfillDefinition::unconditional("es2015")
    }

    /* Individual polyfills. */

    pub fn fetch() -> PolyfillDefinition {
        PolyfillDefinition::new("('fetch' in window)", "fetch")
    }

    pub fn intersection_observer() -> PolyfillDefinition {
        PolyfillDefinition::new("('IntersectionObserver' in window)", "IntersectionObserver")
    }

    pub fn custom_event() -> PolyfillDefinition {
        PolyfillDefinition::new("(typeof CustomEvent === 'function')", "CustomEvent")
    }

    pub fn object_assign() -> PolyfillDefinition {
        PolyfillDefinition::new("('assign' in Object)", "Object.assign")
    }

    pub fn array_from() -> PolyfillDefinition {
        PolyfillDefinition::new("('from' in Array)", "Array.from")
    }

    pub fn array_find() -> PolyfillDefinition {
        PolyfillDefinition::new("('find' in Array.prototype)", "Array.prototype.find")
    }

    pub fn array_find_index() -> PolyfillDefinition {
        PolyfillDefinition::new("('findIndex' in Array.prototype)", "Array.prototype.findIndex")
    }

    pub fn array_fill() -> PolyfillDefinition {
        PolyfillDefinition::new("('fill' in Array.prototype)", "Array.prototype.fill")
    }

    pub fn array_includes() -> PolyfillDefinition {
        PolyfillDefinition::new("('includes' in Array.prototype)", "Array.prototype.includes")
    }

    pub fn request_animation_frame() -> PolyfillDefinition {
        PolyfillDefinition::new("('requestAnimationFrame' in window)", "requestAnimationFrame")
    }

    pub fn intl() -> PolyfillDefinition {
        PolyfillDefinition::new("('Intl' in window)", "Intl")
    }
}

/// Generates one feature-check statement per definition, newline-joined.
///
/// A guarded definition records the feature only when its test evaluates
/// false in the browser; an unguarded one records it unconditionally.
/// Output order matches input order.
pub fn generate_feature_checks(features: &[PolyfillDefinition]) -> String {
    features
        .iter()
        .map(|item| match &item.test {
            Some(test) => format!("{test} || _nextscript_feats.push('{}');", item.feature),
            None => format!("_nextscript_feats.push('{}');", item.feature),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

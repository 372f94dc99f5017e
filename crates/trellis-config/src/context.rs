use serde::{Deserialize, Serialize};

/// Per-invocation build flags.
///
/// Created by the caller for a single [`ConfigFactory::build`](crate::ConfigFactory::build)
/// call and discarded afterwards. Every flag defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildContext {
    /// Optimized build with content-hashed file names
    pub production: bool,

    /// Build is served by a development server (exposed to the HTML template)
    pub server: bool,

    /// Extract stylesheets into standalone files
    pub extract_css: bool,

    /// Instrument transpiled scripts for coverage
    pub coverage: bool,

    /// Open the bundle composition analyzer
    pub analyze: bool,
}

impl BuildContext {
    pub fn production() -> Self {
        Self {
            production: true,
            ..Self::default()
        }
    }

    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_server(mut self, server: bool) -> Self {
        self.server = server;
        self
    }

    pub fn with_extract_css(mut self, extract_css: bool) -> Self {
        self.extract_css = extract_css;
        self
    }

    pub fn with_coverage(mut self, coverage: bool) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_analyze(mut self, analyze: bool) -> Self {
        self.analyze = analyze;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_flags_default_to_false() {
        let ctx: BuildContext = serde_json::from_value(json!({ "production": true })).unwrap();
        assert_eq!(ctx, BuildContext::production());
    }

    #[test]
    fn reads_camel_case_flags() {
        let ctx: BuildContext =
            serde_json::from_value(json!({ "extractCss": true, "analyze": true })).unwrap();
        assert!(ctx.extract_css);
        assert!(ctx.analyze);
        assert!(!ctx.production);
    }
}

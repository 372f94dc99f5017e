use serde::Serialize;

/// Largest raster image inlined as a data URL.
pub const IMAGE_INLINE_LIMIT: u64 = 8192;

/// Largest woff/woff2 font inlined as a data URL.
pub const FONT_INLINE_LIMIT: u64 = 10_000;

/// One transformation step applied to a matched asset.
///
/// Serialized as `{"loader": "...", "options": {...}}` for the bundler engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "loader", content = "options")]
pub enum Handler {
    /// Inject styles into the document at runtime
    #[serde(rename = "style-loader")]
    StyleInject,

    /// Resolve stylesheet imports and urls
    #[serde(rename = "css-loader")]
    Css,

    /// Compile Sass to CSS
    #[serde(rename = "sass-loader")]
    Sass,

    /// Compile markup templates into renderable functions
    #[serde(rename = "html-loader")]
    HtmlTemplate,

    /// Down-level modern script syntax
    #[serde(rename = "babel-loader")]
    Transpile(TranspileOptions),

    /// Parse structured data
    #[serde(rename = "json-loader")]
    Json,

    /// Expose a module's export as a global binding
    #[serde(rename = "expose-loader")]
    ExposeGlobal { exposes: String },

    /// Inline as a data URL up to `limit` bytes, otherwise emit a file
    #[serde(rename = "url-loader")]
    InlineUrl(InlineOptions),

    /// Always emit as a standalone file
    #[serde(rename = "file-loader")]
    EmitFile,
}

impl Handler {
    /// Whether this step injects styles into the page at runtime.
    pub fn injects_at_runtime(&self) -> bool {
        matches!(self, Handler::StyleInject)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

impl TranspileOptions {
    /// Inline source maps plus istanbul instrumentation.
    pub fn coverage() -> Self {
        Self {
            source_map: Some("inline".to_string()),
            plugins: vec!["istanbul".to_string()],
        }
    }

    pub fn is_instrumented(&self) -> bool {
        self.plugins.iter().any(|plugin| plugin == "istanbul")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineOptions {
    pub limit: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

impl InlineOptions {
    pub fn limit(limit: u64) -> Self {
        Self {
            limit,
            mimetype: None,
        }
    }

    pub fn with_mimetype(limit: u64, mimetype: &str) -> Self {
        Self {
            limit,
            mimetype: Some(mimetype.to_string()),
        }
    }

    /// Whether an asset of `size` bytes is inlined rather than emitted.
    pub fn inlines(&self, size: u64) -> bool {
        size <= self.limit
    }
}

//! Asset-handling rules.
//!
//! Rules are matched first-to-last and the first match wins, so a rule that
//! constrains the referencing file (the issuer) must come before any
//! unconstrained rule for the same pattern.

mod handler;
mod pattern;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::conditional::{Fragment, select_branch};
use crate::context::BuildContext;
use crate::conventions::{PROMISE_POLYFILL, PROMISE_SYMBOL};
use crate::error::Result;
use crate::paths::PathSet;

pub use handler::{
    FONT_INLINE_LIMIT, Handler, IMAGE_INLINE_LIMIT, InlineOptions, TranspileOptions,
};
pub use pattern::Pattern;

/// Optional `?v=1.2.3` cache-busting suffix on font urls.
const VERSION_SUFFIX: &str = r"(\?v=[0-9]\.[0-9]\.[0-9])?$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Pattern the resource path must match
    pub test: Pattern,

    /// Handlers applied to the resource, in order
    #[serde(rename = "use")]
    pub handlers: Vec<Handler>,

    /// Pattern the referencing file must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Pattern>,

    /// Resources under this directory are never matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<PathBuf>,
}

impl Rule {
    pub fn new(test: Pattern, handlers: Vec<Handler>) -> Self {
        Self {
            test,
            handlers,
            issuer: None,
            exclude: None,
        }
    }

    pub fn issued_by(mut self, issuer: Pattern) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exclude = Some(dir.into());
        self
    }

    /// Whether this rule applies to `resource` referenced from `issuer`.
    ///
    /// A rule with an issuer constraint never matches a resource without an
    /// issuer (an entry point).
    pub fn matches(&self, resource: &Path, issuer: Option<&Path>) -> bool {
        if !self.test.is_match(&resource.to_string_lossy()) {
            return false;
        }

        if let Some(dir) = &self.exclude {
            if resource.starts_with(dir) {
                return false;
            }
        }

        match (&self.issuer, issuer) {
            (None, _) => true,
            (Some(constraint), Some(issuer)) => constraint.is_match(&issuer.to_string_lossy()),
            (Some(_), None) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet(Vec<Rule>);

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    /// First rule matching `resource` referenced from `issuer`.
    pub fn resolve(&self, resource: &Path, issuer: Option<&Path>) -> Option<&Rule> {
        self.0.iter().find(|rule| rule.matches(resource, issuer))
    }

    /// Handler chain applied to `resource` referenced from `issuer`.
    pub fn handler_chain(&self, resource: &Path, issuer: Option<&Path>) -> Option<&[Handler]> {
        self.resolve(resource, issuer)
            .map(|rule| rule.handlers.as_slice())
    }

    /// Indices of issuer-constrained rules that an earlier unconstrained rule
    /// with the same pattern makes unreachable.
    pub fn shadowed_rules(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.issuer.is_some())
            .filter(|(index, rule)| {
                self.0[..*index]
                    .iter()
                    .any(|earlier| earlier.issuer.is_none() && earlier.test == rule.test)
            })
            .map(|(index, _)| index)
            .collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds the ordered asset rules for one build.
#[derive(Debug)]
pub struct RuleSetBuilder<'a> {
    context: &'a BuildContext,
    paths: &'a PathSet,
}

impl<'a> RuleSetBuilder<'a> {
    pub fn new(context: &'a BuildContext, paths: &'a PathSet) -> Self {
        Self { context, paths }
    }

    pub fn build(&self) -> Result<RuleSet> {
        let stylesheet = Pattern::new(r"\.scss$")?;

        let rules = vec![
            // Styles imported from scripts are injected at runtime
            Rule::new(
                stylesheet.clone(),
                vec![Handler::StyleInject, Handler::Css, Handler::Sass],
            )
            .issued_by(Pattern::insensitive(r"\.[tj]s$")?),
            // Markup has no runtime to inject into
            Rule::new(stylesheet, vec![Handler::Css, Handler::Sass])
                .issued_by(Pattern::insensitive(r"\.html?$")?),
            Rule::new(
                Pattern::insensitive(r"\.html$")?,
                vec![Handler::HtmlTemplate],
            ),
            Rule::new(
                Pattern::insensitive(r"\.js$")?,
                vec![Handler::Transpile(self.transpile_options())],
            )
            .excluding(self.paths.dependency_path()),
            Rule::new(Pattern::insensitive(r"\.json$")?, vec![Handler::Json]),
            Rule::new(
                self.polyfill_pattern()?,
                vec![Handler::ExposeGlobal {
                    exposes: PROMISE_SYMBOL.to_string(),
                }],
            ),
            // Small images and fonts become data urls, larger ones files
            Rule::new(
                Pattern::insensitive(r"\.(png|gif|jpg|cur)$")?,
                vec![Handler::InlineUrl(InlineOptions::limit(IMAGE_INLINE_LIMIT))],
            ),
            Rule::new(
                Pattern::insensitive(&format!(r"\.woff2{VERSION_SUFFIX}"))?,
                vec![Handler::InlineUrl(InlineOptions::with_mimetype(
                    FONT_INLINE_LIMIT,
                    "application/font-woff2",
                ))],
            ),
            Rule::new(
                Pattern::insensitive(&format!(r"\.woff{VERSION_SUFFIX}"))?,
                vec![Handler::InlineUrl(InlineOptions::with_mimetype(
                    FONT_INLINE_LIMIT,
                    "application/font-woff",
                ))],
            ),
            Rule::new(
                Pattern::insensitive(&format!(r"\.(ttf|eot|svg|otf){VERSION_SUFFIX}"))?,
                vec![Handler::EmitFile],
            ),
        ];

        debug!(rules = rules.len(), coverage = self.context.coverage, "built asset rules");
        Ok(RuleSet::new(rules))
    }

    fn transpile_options(&self) -> TranspileOptions {
        let coverage = self.context.coverage;
        TranspileOptions {
            source_map: coverage.then(|| "inline".to_string()),
            plugins: select_branch(coverage, Some("istanbul".to_string()), Fragment::None),
        }
    }

    fn polyfill_pattern(&self) -> Result<Pattern> {
        let dependency_dir = self
            .paths
            .dependency_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "node_modules".to_string());

        Pattern::new(&format!(
            r"[/\\]{}[/\\]{}[/\\].+\.js$",
            regex::escape(&dependency_dir),
            regex::escape(PROMISE_POLYFILL)
        ))
    }
}

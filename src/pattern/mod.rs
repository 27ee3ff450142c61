//! Dynamic segment pattern engine.
//!
//! # Data Flow
//! ```text
//! "articles/:user_id/:article_uuid/"   (colon syntax)
//!     → is_custom? (any raw name not already in <converter:name> form)
//!     → extract names left to right, skipping host-native placeholders
//!     → handler.param_type(name) → host tag (int | uuid | slug)
//!     → "articles/<int:user_id>/<uuid:article_uuid>/"
//! ```
//!
//! # Design Decisions
//! - One stateless strategy per router, chosen at construction
//! - Paths already in host-native form pass through unchanged, so
//!   normalizing twice is a no-op
//! - Literal text around placeholders is never touched

pub mod native;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::handler::Handler;

static COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").expect("valid regex"));
static BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));
static ANGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)>").expect("valid regex"));

/// Rewrites an alternate placeholder syntax into host-native placeholders.
pub trait PatternEngine {
    /// Segment names found by this syntax, in order, including ones inside native placeholders.
    fn segment_names<'p>(&self, path: &'p str) -> Vec<&'p str>;

    /// Rewrite every placeholder of this syntax into `<tag:name>`.
    fn normalize(&self, path: &str, handler: &Handler) -> String;

    /// First placeholder of this syntax left outside `<converter:name>` placeholders.
    fn residual<'p>(&self, path: &'p str) -> Option<&'p str>;

    /// True if `path` still contains placeholders in this syntax.
    fn is_custom(&self, path: &str) -> bool {
        let native = native::typed_names(path);
        self.segment_names(path)
            .iter()
            .any(|name| !native.contains(name))
    }
}

/// The selectable placeholder syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicPattern {
    /// Paths are taken as written.
    #[default]
    #[serde(alias = "none")]
    NoOp,
    /// `:name`
    Colon,
    /// `{name}`
    #[serde(alias = "curly")]
    Brace,
    /// `<name>`
    Angle,
}

impl DynamicPattern {
    fn regex(&self) -> Option<&'static Regex> {
        match self {
            DynamicPattern::NoOp => None,
            DynamicPattern::Colon => Some(&COLON),
            DynamicPattern::Brace => Some(&BRACE),
            DynamicPattern::Angle => Some(&ANGLE),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DynamicPattern::NoOp => "noop",
            DynamicPattern::Colon => "colon",
            DynamicPattern::Brace => "brace",
            DynamicPattern::Angle => "angle",
        }
    }
}

impl PatternEngine for DynamicPattern {
    fn segment_names<'p>(&self, path: &'p str) -> Vec<&'p str> {
        let Some(re) = self.regex() else {
            return Vec::new();
        };
        re.captures_iter(path)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    fn residual<'p>(&self, path: &'p str) -> Option<&'p str> {
        let re = self.regex()?;
        let native_spans = native::typed_spans(path);
        re.find_iter(path)
            .find(|m| {
                !native_spans
                    .iter()
                    .any(|span| span.start <= m.start() && m.end() <= span.end)
            })
            .map(|m| m.as_str())
    }

    fn normalize(&self, path: &str, handler: &Handler) -> String {
        let Some(re) = self.regex() else {
            return path.to_string();
        };
        if !self.is_custom(path) {
            return path.to_string();
        }

        // `:id` inside `<int:id>` is already native
        let native_spans = native::typed_spans(path);
        let mut out = String::with_capacity(path.len() + 16);
        let mut last = 0;

        for caps in re.captures_iter(path) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if native_spans
                .iter()
                .any(|span| span.start <= whole.start() && whole.end() <= span.end)
            {
                continue;
            }
            let name = name.as_str();
            out.push_str(&path[last..whole.start()]);
            out.push('<');
            out.push_str(handler.param_type(name).host_tag());
            out.push(':');
            out.push_str(name);
            out.push('>');
            last = whole.end();
        }
        out.push_str(&path[last..]);
        out
    }
}

impl FromStr for DynamicPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "noop" | "none" => Ok(DynamicPattern::NoOp),
            "colon" => Ok(DynamicPattern::Colon),
            "brace" | "curly" => Ok(DynamicPattern::Brace),
            "angle" => Ok(DynamicPattern::Angle),
            other => Err(format!(
                "unknown dynamic pattern {other:?}, expected one of noop, colon, brace, angle"
            )),
        }
    }
}

impl fmt::Display for DynamicPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::HttpMethod;
    use crate::handler::{FunctionHandler, HandlerBundle, ParamTypes};

    fn article_view() -> Handler {
        HandlerBundle::new("ArticleView")
            .on_with(
                HttpMethod::Get,
                ParamTypes::new()
                    .with("TYPE", "str")
                    .with("user_id", "int")
                    .with("article_uuid", "uuid"),
                |_req| async { "article" },
            )
            .into()
    }

    #[test]
    fn test_variants_agree() {
        let handler = article_view();
        let expected = "articles/<int:user_id>/<uuid:article_uuid>/";
        assert_eq!(
            DynamicPattern::Colon.normalize("articles/:user_id/:article_uuid/", &handler),
            expected
        );
        assert_eq!(
            DynamicPattern::Brace.normalize("articles/{user_id}/{article_uuid}/", &handler),
            expected
        );
        assert_eq!(
            DynamicPattern::Angle.normalize("articles/<user_id>/<article_uuid>/", &handler),
            expected
        );
        assert_eq!(DynamicPattern::NoOp.normalize(expected, &handler), expected);
    }

    #[test]
    fn test_noop_never_rewrites() {
        let handler = article_view();
        assert!(!DynamicPattern::NoOp.is_custom(":id/{id}/<id>"));
        assert_eq!(
            DynamicPattern::NoOp.normalize("a/:id/", &handler),
            "a/:id/"
        );
    }

    #[test]
    fn test_is_custom_ignores_native_placeholders() {
        assert!(!DynamicPattern::Colon.is_custom("articles/<int:user_id>/"));
        assert!(DynamicPattern::Colon.is_custom("articles/<int:user_id>/:slug"));
        assert!(!DynamicPattern::Angle.is_custom("articles/<int:user_id>/"));
        assert!(DynamicPattern::Angle.is_custom("articles/<user_id>/"));
        assert!(!DynamicPattern::Brace.is_custom("static/path/"));
    }

    #[test]
    fn test_residual_outside_native_placeholders() {
        assert_eq!(DynamicPattern::Colon.residual("a/:id/<int:id>/"), Some(":id"));
        assert_eq!(DynamicPattern::Colon.residual("a/<int:id>/"), None);
        assert_eq!(DynamicPattern::Brace.residual("a/{id}/<int:id>/"), Some("{id}"));
        assert_eq!(DynamicPattern::Angle.residual("a/<id>/<int:id>/"), Some("<id>"));
        assert_eq!(DynamicPattern::NoOp.residual("a/:id/{id}/<id>/"), None);
    }

    #[test]
    fn test_mixed_path_keeps_native_part() {
        let handler = article_view();
        assert_eq!(
            DynamicPattern::Colon.normalize("<int:user_id>/:article_uuid", &handler),
            "<int:user_id>/<uuid:article_uuid>"
        );
    }

    #[test]
    fn test_idempotent() {
        let handler = article_view();
        for (engine, path) in [
            (DynamicPattern::Colon, ":TYPE/articles/:user_id/"),
            (DynamicPattern::Brace, "{TYPE}/articles/{user_id}/"),
            (DynamicPattern::Angle, "<TYPE>/articles/<user_id>/"),
        ] {
            let once = engine.normalize(path, &handler);
            assert_eq!(once, "<slug:TYPE>/articles/<int:user_id>/");
            assert!(!engine.is_custom(&once));
            assert_eq!(engine.normalize(&once, &handler), once);
        }
    }

    #[test]
    fn test_undeclared_segment_is_slug() {
        let handler: Handler = FunctionHandler::new("index", |_req| async { "" }).into();
        assert_eq!(
            DynamicPattern::Brace.normalize("{anything}/", &handler),
            "<slug:anything>/"
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("curly".parse::<DynamicPattern>().unwrap(), DynamicPattern::Brace);
        assert_eq!("Colon".parse::<DynamicPattern>().unwrap(), DynamicPattern::Colon);
        assert!("square".parse::<DynamicPattern>().is_err());
    }
}

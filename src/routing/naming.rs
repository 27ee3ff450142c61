//! Route name inference.
//!
//! Bundles: `HelloWorldView` → strip `View` → `Hello` `World` → `hello_world`.
//! Functions: the identifier, lower-cased.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::handler::Handler;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][^A-Z]*").expect("valid regex"));

const VIEW_SUFFIX: &str = "view";

/// Derive a route name from the handler identifier.
pub fn infer_name(handler: &Handler) -> String {
    match handler {
        Handler::Function(f) => f.name().to_lowercase(),
        Handler::Bundle(b) => bundle_name(b.name()),
    }
}

fn bundle_name(ident: &str) -> String {
    split_words(strip_view_suffix(ident))
        .join("_")
        .to_lowercase()
}

/// Remove a trailing `View` (any case), unless nothing would remain.
fn strip_view_suffix(ident: &str) -> &str {
    if ident.len() <= VIEW_SUFFIX.len() {
        return ident;
    }
    let cut = ident.len() - VIEW_SUFFIX.len();
    match ident.get(cut..) {
        Some(tail) if tail.eq_ignore_ascii_case(VIEW_SUFFIX) => &ident[..cut],
        _ => ident,
    }
}

/// Split on uppercase boundaries. A leading lowercase run is its own word.
fn split_words(stem: &str) -> Vec<&str> {
    let first_upper = WORD.find(stem).map_or(stem.len(), |m| m.start());
    let mut words = Vec::new();
    if first_upper > 0 {
        words.push(&stem[..first_upper]);
    }
    words.extend(WORD.find_iter(stem).map(|m| m.as_str()));
    words
}

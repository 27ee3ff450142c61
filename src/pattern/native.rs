//! Host-native placeholder grammar.
//!
//! A route is literal text interleaved with `<name>` or `<converter:name>`
//! placeholders. Converters decide which segment values match and how they
//! are canonicalised.
//!
//! | converter | matches                         |
//! |-----------|---------------------------------|
//! | `str`     | any non-empty text without `/`  |
//! | `int`     | decimal digits                  |
//! | `slug`    | ASCII letters, digits, `-`, `_` |
//! | `uuid`    | hyphenated lowercase UUID       |
//! | `path`    | any non-empty text              |

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Any placeholder, typed or not.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:(?P<converter>[^>:]+):)?(?P<name>[^>]+)>").expect("valid regex"));

/// Placeholders that already carry a converter.
static TYPED_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(\w+):(\w+)>").expect("valid regex"));

/// Segment converter of the host dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    Str,
    Int,
    Slug,
    Uuid,
    Path,
}

impl Converter {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "str" => Some(Converter::Str),
            "int" => Some(Converter::Int),
            "slug" => Some(Converter::Slug),
            "uuid" => Some(Converter::Uuid),
            "path" => Some(Converter::Path),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Converter::Str => "str",
            Converter::Int => "int",
            Converter::Slug => "slug",
            Converter::Uuid => "uuid",
            Converter::Path => "path",
        }
    }

    /// Regex fragment matching one value.
    pub fn regex(&self) -> &'static str {
        match self {
            Converter::Str => "[^/]+",
            Converter::Int => "[0-9]+",
            Converter::Slug => "[-a-zA-Z0-9_]+",
            Converter::Uuid => "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
            Converter::Path => ".+",
        }
    }

    /// True if `value` is a complete match for this converter.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Converter::Str => !value.is_empty() && !value.contains('/'),
            Converter::Int => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            Converter::Slug => {
                !value.is_empty()
                    && value
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
            }
            Converter::Uuid => {
                uuid::Uuid::parse_str(value).is_ok()
                    && value.len() == 36
                    && !value.bytes().any(|b| b.is_ascii_uppercase())
            }
            Converter::Path => !value.is_empty(),
        }
    }

    /// Canonical form of a matched value (ints lose leading zeros).
    pub fn canonicalize(&self, value: &str) -> String {
        match self {
            Converter::Int => {
                let trimmed = value.trim_start_matches('0');
                if trimmed.is_empty() {
                    "0".to_string()
                } else {
                    trimmed.to_string()
                }
            }
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One piece of a parsed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Literal(String),
    Param { converter: Converter, name: String },
}

/// A route in host-native syntax, parsed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativePath {
    parts: Vec<Part>,
}

impl NativePath {
    /// Parse `route`, rejecting unknown converters, bad names, duplicates and stray brackets.
    pub fn parse(route: &str) -> Result<Self, String> {
        let mut parts = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(route) {
            let Some(whole) = caps.get(0) else { continue };
            push_literal(&mut parts, &route[last..whole.start()])?;

            let name = caps.name("name").map_or("", |m| m.as_str());
            if !is_identifier(name) {
                return Err(format!("{name:?} is not a valid parameter name"));
            }
            if names.contains(&name) {
                return Err(format!("parameter {name:?} appears more than once"));
            }
            names.push(name);

            let converter = match caps.name("converter") {
                Some(tag) => Converter::from_tag(tag.as_str())
                    .ok_or_else(|| format!("unknown converter {:?}", tag.as_str()))?,
                None => Converter::Str,
            };
            parts.push(Part::Param {
                converter,
                name: name.to_string(),
            });
            last = whole.end();
        }
        push_literal(&mut parts, &route[last..])?;

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Parameter names with their converters, in order.
    pub fn params(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.parts.iter().filter_map(|p| match p {
            Part::Param { converter, name } => Some((name.as_str(), *converter)),
            Part::Literal(_) => None,
        })
    }

    /// Anchored regex source with one capture group per parameter, in order.
    pub fn to_regex_source(&self) -> String {
        let mut source = String::from("^");
        for part in &self.parts {
            match part {
                Part::Literal(text) => source.push_str(&regex::escape(text)),
                Part::Param { converter, .. } => {
                    source.push('(');
                    source.push_str(converter.regex());
                    source.push(')');
                }
            }
        }
        source.push('$');
        source
    }

    /// Substitute `kwargs` into the route. Every parameter must be supplied and accepted.
    pub fn render(&self, kwargs: &BTreeMap<&str, &str>) -> Result<String, String> {
        let mut out = String::new();
        let mut used = 0;
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Param { converter, name } => {
                    let value = kwargs
                        .get(name.as_str())
                        .ok_or_else(|| format!("missing argument {name:?}"))?;
                    if !converter.accepts(value) {
                        return Err(format!(
                            "argument {name:?} = {value:?} does not match converter {converter}"
                        ));
                    }
                    out.push_str(value);
                    used += 1;
                }
            }
        }
        if used != kwargs.len() {
            return Err("unexpected extra arguments".to_string());
        }
        Ok(out)
    }
}

impl fmt::Display for NativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                Part::Literal(text) => f.write_str(text)?,
                Part::Param { converter, name } => write!(f, "<{converter}:{name}>")?,
            }
        }
        Ok(())
    }
}

/// Names of placeholders already written as `<converter:name>`.
pub fn typed_names(path: &str) -> Vec<&str> {
    TYPED_PLACEHOLDER
        .captures_iter(path)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
        .collect()
}

/// Byte ranges covered by `<converter:name>` placeholders.
pub fn typed_spans(path: &str) -> Vec<std::ops::Range<usize>> {
    TYPED_PLACEHOLDER.find_iter(path).map(|m| m.range()).collect()
}

fn push_literal(parts: &mut Vec<Part>, text: &str) -> Result<(), String> {
    if text.contains('<') || text.contains('>') {
        return Err(format!("stray angle bracket in {text:?}"));
    }
    if !text.is_empty() {
        parts.push(Part::Literal(text.to_string()));
    }
    Ok(())
}

/// A letter or `_`, then letters, digits or `_`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}

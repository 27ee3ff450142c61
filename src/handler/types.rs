//! Semantic types of path segments.
//!
//! Handlers declare the type of each captured segment explicitly instead of
//! having it discovered from annotations. The pattern engine only needs a
//! coarse classification to choose a host converter.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse type of a captured path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentType {
    /// Integer-valued segment.
    Int,
    /// UUID-valued segment.
    Uuid,
    /// String or slug segment (the default when nothing is declared).
    #[default]
    Slug,
    /// Any other declared type. Treated as a slug by the host.
    Other(String),
}

impl SegmentType {
    /// Host converter tag used in `<tag:name>` placeholders.
    pub fn host_tag(&self) -> &'static str {
        match self {
            SegmentType::Int => "int",
            SegmentType::Uuid => "uuid",
            SegmentType::Slug | SegmentType::Other(_) => "slug",
        }
    }
}

impl From<&str> for SegmentType {
    fn from(declared: &str) -> Self {
        match declared.trim() {
            "int" | "integer" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16"
            | "u32" | "u64" | "u128" | "usize" => SegmentType::Int,
            "uuid" | "Uuid" | "UUID" | "uuid::Uuid" => SegmentType::Uuid,
            "slug" | "str" | "&str" | "string" | "String" => SegmentType::Slug,
            other => SegmentType::Other(other.to_string()),
        }
    }
}

impl From<String> for SegmentType {
    fn from(declared: String) -> Self {
        SegmentType::from(declared.as_str())
    }
}

impl From<SegmentType> for String {
    fn from(ty: SegmentType) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentType::Int => f.write_str("int"),
            SegmentType::Uuid => f.write_str("uuid"),
            SegmentType::Slug => f.write_str("slug"),
            SegmentType::Other(name) => f.write_str(name),
        }
    }
}

/// Mapping from segment name to its declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamTypes(BTreeMap<String, SegmentType>);

impl ParamTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, ty: impl Into<SegmentType>) -> Self {
        self.insert(name, ty);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<SegmentType>) {
        self.0.insert(name.into(), ty.into());
    }

    pub fn get(&self, name: &str) -> Option<&SegmentType> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SegmentType)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for ParamTypes
where
    K: Into<String>,
    V: Into<SegmentType>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

//! Compound tag model for item metadata.
//!
//! Mirrors the host's typed tag tree closely enough that tags built here can
//! be written to items through whichever compatibility strategy is bound.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric ids the host uses for tag types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    /// 8-bit integer
    Byte = 1,
    /// 16-bit integer
    Short = 2,
    /// 32-bit integer
    Int = 3,
    /// 64-bit integer
    Long = 4,
    /// 32-bit float
    Float = 5,
    /// 64-bit float
    Double = 6,
    /// UTF-8 string
    String = 8,
    /// Homogeneous list
    List = 9,
    /// Nested compound
    Compound = 10,
}

impl TagType {
    /// Wildcard id accepted by `contains_of_type` for any numeric tag.
    pub const ANY_NUMERIC: u8 = 99;

    /// Returns the numeric id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns true for the integer and floating point types.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }
}

/// A single tag value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    /// 8-bit integer
    Byte(i8),
    /// 16-bit integer
    Short(i16),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// UTF-8 string
    String(String),
    /// List of tags
    List(Vec<Tag>),
    /// Nested compound
    Compound(CompoundTag),
}

impl Tag {
    /// String tag.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Int tag.
    #[must_use]
    pub const fn int(value: i32) -> Self {
        Self::Int(value)
    }

    /// Returns this tag's type.
    #[must_use]
    pub const fn tag_type(&self) -> TagType {
        match self {
            Self::Byte(_) => TagType::Byte,
            Self::Short(_) => TagType::Short,
            Self::Int(_) => TagType::Int,
            Self::Long(_) => TagType::Long,
            Self::Float(_) => TagType::Float,
            Self::Double(_) => TagType::Double,
            Self::String(_) => TagType::String,
            Self::List(_) => TagType::List,
            Self::Compound(_) => TagType::Compound,
        }
    }
}

/// Keyed tag map. Keys iterate in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundTag {
    entries: BTreeMap<String, Tag>,
}

impl CompoundTag {
    /// Creates an empty compound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn put(&mut self, key: impl Into<String>, value: Tag) -> Option<Tag> {
        self.entries.insert(key.into(), value)
    }

    /// Returns the tag stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Removes `key`.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    /// Returns true if `key` is present, whatever its type.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns true if `key` holds a tag with numeric type id `expected`.
    ///
    /// [`TagType::ANY_NUMERIC`] matches every numeric type.
    #[must_use]
    pub fn contains_of_type(&self, key: &str, expected: u8) -> bool {
        self.entries.get(key).is_some_and(|tag| {
            let ty = tag.tag_type();
            ty.id() == expected || (expected == TagType::ANY_NUMERIC && ty.is_numeric())
        })
    }

    /// Returns the string under `key`, if it is a string tag.
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Tag::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the int under `key`, if it is an int tag.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.entries.get(key) {
            Some(Tag::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the nested compound under `key`.
    #[must_use]
    pub fn get_compound(&self, key: &str) -> Option<&CompoundTag> {
        match self.entries.get(key) {
            Some(Tag::Compound(c)) => Some(c),
            _ => None,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

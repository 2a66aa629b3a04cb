//! Card property definitions.
//!
//! A game declares the properties its cards carry ("cost", "type",
//! "rarity", ...). The declared `PropertyKind` is descriptive metadata for
//! whoever renders the value; the loader stores every value as text and
//! never converts or validates it against the kind.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Declared value kind of a card property.
///
/// In JSON this is written as the variant name (matched case-insensitively)
/// or as its position in the list below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    #[default]
    Object,
    EscapedString,
    String,
    Number,
    Integer,
    Boolean,
    StringEnum,
    StringList,
    StringEnumList,
    ObjectEnum,
    ObjectList,
    ObjectEnumList,
}

impl PropertyKind {
    /// All kinds in declaration order (ordinal = index).
    pub const ALL: [PropertyKind; 12] = [
        PropertyKind::Object,
        PropertyKind::EscapedString,
        PropertyKind::String,
        PropertyKind::Number,
        PropertyKind::Integer,
        PropertyKind::Boolean,
        PropertyKind::StringEnum,
        PropertyKind::StringList,
        PropertyKind::StringEnumList,
        PropertyKind::ObjectEnum,
        PropertyKind::ObjectList,
        PropertyKind::ObjectEnumList,
    ];

    /// Canonical name as written in game configs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Object => "Object",
            PropertyKind::EscapedString => "EscapedString",
            PropertyKind::String => "String",
            PropertyKind::Number => "Number",
            PropertyKind::Integer => "Integer",
            PropertyKind::Boolean => "Boolean",
            PropertyKind::StringEnum => "StringEnum",
            PropertyKind::StringList => "StringList",
            PropertyKind::StringEnumList => "StringEnumList",
            PropertyKind::ObjectEnum => "ObjectEnum",
            PropertyKind::ObjectList => "ObjectList",
            PropertyKind::ObjectEnumList => "ObjectEnumList",
        }
    }

    /// Is this one of the list kinds?
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            PropertyKind::StringList
                | PropertyKind::StringEnumList
                | PropertyKind::ObjectList
                | PropertyKind::ObjectEnumList
        )
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown property type `{s}`"))
    }
}

impl Serialize for PropertyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PropertyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Ordinal(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
            Repr::Ordinal(n) => usize::try_from(n)
                .ok()
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| de::Error::custom(format!("property type ordinal {n} out of range"))),
        }
    }
}

/// A single entry of a game's card property schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Field name looked up in raw card records.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Label for display. Empty means "use the name".
    #[serde(default, deserialize_with = "null_as_default")]
    pub display: String,

    /// Declared value kind (metadata only).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: PropertyKind,

    /// Text shown when a card has no value for this property.
    #[serde(default, deserialize_with = "null_as_default")]
    pub empty: String,
}

impl PropertyDef {
    /// Create an `Object` property with no display label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: String::new(),
            kind: PropertyKind::default(),
            empty: String::new(),
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Set the declared kind.
    #[must_use]
    pub fn with_kind(mut self, kind: PropertyKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the empty-value text.
    #[must_use]
    pub fn with_empty(mut self, empty: impl Into<String>) -> Self {
        self.empty = empty.into();
        self
    }

    /// Label to show for this property.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.display.is_empty() {
            &self.name
        } else {
            &self.display
        }
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Embedding configuration.
//!
//! Configuration is plain data that can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!     "embedding_size": 16,
//!     "piece_size": 4,
//!     "properties": { "electronegativity": true, "atomic_mass": false },
//!     "unknown_element_policy": { "fallback_to": "H" }
//! }
//! ```
//!
use crate::error::Result;
use crate::info::elements::{Element, Property};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use strum::{EnumCount, IntoEnumIterator};

pub const DEFAULT_EMBEDDING_SIZE: usize = 16;
pub const DEFAULT_PIECE_SIZE: usize = 4;

/// What to do with an atomic number that is not in the element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownElementPolicy {
    /// Abort the batch with `UnknownElement`.
    Fail,
    /// Use the properties of the given element instead.
    FallbackTo(Element),
}

impl Default for UnknownElementPolicy {
    fn default() -> Self {
        UnknownElementPolicy::FallbackTo(Element::H)
    }
}

/// Ordered on/off switches, one per [`Property`].
///
/// The order of the entries is the column order of the property block in
/// every embedding built with this selection. Reordering the switches changes
/// the output layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySelection {
    switches: Vec<(Property, bool)>,
}

impl PropertySelection {
    /// All properties enabled, in table order.
    pub fn all() -> Self {
        Self {
            switches: Property::iter().map(|p| (p, true)).collect(),
        }
    }

    /// All properties disabled, in table order.
    pub fn none() -> Self {
        Self {
            switches: Property::iter().map(|p| (p, false)).collect(),
        }
    }

    /// Build from explicit switches. The given order is kept; properties not
    /// mentioned are appended disabled. A repeated property keeps its first
    /// position and takes its last value.
    pub fn from_switches<I>(switches: I) -> Self
    where
        I: IntoIterator<Item = (Property, bool)>,
    {
        let mut ordered: Vec<(Property, bool)> = Vec::with_capacity(Property::COUNT);
        for (property, on) in switches {
            match ordered.iter_mut().find(|(p, _)| *p == property) {
                Some(entry) => entry.1 = on,
                None => ordered.push((property, on)),
            }
        }
        for property in Property::iter() {
            if !ordered.iter().any(|(p, _)| *p == property) {
                ordered.push((property, false));
            }
        }
        Self { switches: ordered }
    }

    pub fn set(&mut self, property: Property, on: bool) -> &mut Self {
        if let Some(entry) = self.switches.iter_mut().find(|(p, _)| *p == property) {
            entry.1 = on;
        }
        self
    }

    pub fn is_enabled(&self, property: Property) -> bool {
        self.switches.iter().any(|(p, on)| *p == property && *on)
    }

    /// Enabled properties in selection order.
    pub fn enabled(&self) -> Vec<Property> {
        self.switches
            .iter()
            .filter(|(_, on)| *on)
            .map(|(p, _)| *p)
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.switches.iter().filter(|(_, on)| *on).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Property, bool)> {
        self.switches.iter()
    }
}

impl Default for PropertySelection {
    fn default() -> Self {
        Self::all()
    }
}

impl Serialize for PropertySelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.switches.len()))?;
        for (property, on) in &self.switches {
            map.serialize_entry(property, on)?;
        }
        map.end()
    }
}

struct SelectionVisitor;

impl<'de> Visitor<'de> for SelectionVisitor {
    type Value = PropertySelection;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of property name to boolean")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut switches = Vec::with_capacity(access.size_hint().unwrap_or(Property::COUNT));
        while let Some((property, on)) = access.next_entry::<Property, bool>()? {
            if switches.iter().any(|(p, _): &(Property, bool)| *p == property) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate property `{}`",
                    property
                )));
            }
            switches.push((property, on));
        }
        Ok(PropertySelection::from_switches(switches))
    }
}

impl<'de> Deserialize<'de> for PropertySelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SelectionVisitor)
    }
}

/// Settings for the embedding pipeline. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// Row width in fixed-width mode.
    pub embedding_size: usize,
    /// Record length when splitting flat views into atoms.
    pub piece_size: usize,
    pub properties: PropertySelection,
    pub unknown_element_policy: UnknownElementPolicy,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            embedding_size: DEFAULT_EMBEDDING_SIZE,
            piece_size: DEFAULT_PIECE_SIZE,
            properties: PropertySelection::default(),
            unknown_element_policy: UnknownElementPolicy::default(),
        }
    }
}

impl EmbeddingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

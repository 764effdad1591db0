use std::fmt;

use super::{Properties, Value};

/// A named, property-bearing member of a sequence (a card, a chess move, a
/// chord symbol...). Immutable once built; equality and hashing cover both
/// the name and the properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    name: String,
    properties: Properties,
}

impl Item {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// Build an item from a name and an existing property map.
    #[must_use]
    pub fn with_properties(name: impl Into<String>, properties: Properties) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Add a property while building the item.
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(property, value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Look up a property. A stored `Value::Null` reads the same as a missing one.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property).filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }
}

impl AsRef<Properties> for Item {
    fn as_ref(&self) -> &Properties {
        &self.properties
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        write!(f, ")")
    }
}

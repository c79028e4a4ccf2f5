//! Serialization and deserialization for card types
//!
//! Wire form of a card is `{"category": "hazard", "value": "Flat Tire"}`.
//! Bare safeties and hazards (safety sets, road status) serialize as their
//! labels.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Category, Hazard, Safety};

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredCard {
    category: Category,
    value: String,
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        StoredCard {
            category: self.category(),
            value: self.label().to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = StoredCard::deserialize(deserializer)?;
        Card::from_parts(stored.category, &stored.value).map_err(D::Error::custom)
    }
}

impl Serialize for Safety {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Safety {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match Card::from_parts(Category::Safety, &s) {
            Ok(Card::Safety(safety)) => Ok(safety),
            _ => Err(D::Error::custom(format!("Invalid safety: {s}"))),
        }
    }
}

impl Serialize for Hazard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Hazard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match Card::from_parts(Category::Hazard, &s) {
            Ok(Card::Hazard(hazard)) => Ok(hazard),
            _ => Err(D::Error::custom(format!("Invalid hazard: {s}"))),
        }
    }
}

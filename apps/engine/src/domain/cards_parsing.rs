//! Card labels and parsing from string representations (e.g. "100 km", "Flat Tire")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Category, Distance, Hazard, Remedy, Safety};
use crate::errors::domain::{DomainError, ValidationKind};

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Distance => "distance",
            Category::Hazard => "hazard",
            Category::Remedy => "remedy",
            Category::Safety => "safety",
        }
    }
}

impl Distance {
    pub fn label(&self) -> &'static str {
        match self {
            Distance::D25 => "25 km",
            Distance::D50 => "50 km",
            Distance::D75 => "75 km",
            Distance::D100 => "100 km",
            Distance::D200 => "200 km",
        }
    }
}

impl Hazard {
    pub fn label(&self) -> &'static str {
        match self {
            Hazard::FlatTire => "Flat Tire",
            Hazard::OutOfGas => "Out of Gas",
            Hazard::Accident => "Accident",
            Hazard::SpeedLimit => "Speed Limit",
            Hazard::RedLight => "Red Light",
        }
    }
}

impl Remedy {
    pub fn label(&self) -> &'static str {
        match self {
            Remedy::SpareTire => "Spare Tire",
            Remedy::Gasoline => "Gasoline",
            Remedy::Repairs => "Repairs",
            Remedy::EndOfLimit => "End of Limit",
            Remedy::GreenLight => "Green Light",
        }
    }
}

impl Safety {
    pub fn label(&self) -> &'static str {
        match self {
            Safety::PunctureProof => "Puncture-Proof",
            Safety::ExtraTank => "Extra Tank",
            Safety::DrivingAce => "Driving Ace",
            Safety::RightOfWay => "Right of Way",
        }
    }
}

impl Card {
    /// Display label; unique across all categories.
    pub fn label(&self) -> &'static str {
        match self {
            Card::Distance(d) => d.label(),
            Card::Hazard(h) => h.label(),
            Card::Remedy(r) => r.label(),
            Card::Safety(s) => s.label(),
        }
    }

    /// Rebuild a card from its stored (category, value) pair.
    ///
    /// Rejects a label that exists but belongs to a different category.
    pub fn from_parts(category: Category, value: &str) -> Result<Card, DomainError> {
        let card: Card = value.parse()?;
        if card.category() != category {
            return Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!(
                    "Card '{value}' is a {} card, not {}",
                    card.category().as_str(),
                    category.as_str()
                ),
            ));
        }
        Ok(card)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(Category::Distance),
            "hazard" => Ok(Category::Hazard),
            "remedy" => Ok(Category::Remedy),
            "safety" => Ok(Category::Safety),
            _ => Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Invalid category: {s}"),
            )),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let card = match s {
            "25 km" => Card::Distance(Distance::D25),
            "50 km" => Card::Distance(Distance::D50),
            "75 km" => Card::Distance(Distance::D75),
            "100 km" => Card::Distance(Distance::D100),
            "200 km" => Card::Distance(Distance::D200),
            "Flat Tire" => Card::Hazard(Hazard::FlatTire),
            "Out of Gas" => Card::Hazard(Hazard::OutOfGas),
            "Accident" => Card::Hazard(Hazard::Accident),
            "Speed Limit" => Card::Hazard(Hazard::SpeedLimit),
            "Red Light" => Card::Hazard(Hazard::RedLight),
            "Spare Tire" => Card::Remedy(Remedy::SpareTire),
            "Gasoline" => Card::Remedy(Remedy::Gasoline),
            "Repairs" => Card::Remedy(Remedy::Repairs),
            "End of Limit" => Card::Remedy(Remedy::EndOfLimit),
            "Green Light" => Card::Remedy(Remedy::GreenLight),
            "Puncture-Proof" => Card::Safety(Safety::PunctureProof),
            "Extra Tank" => Card::Safety(Safety::ExtraTank),
            "Driving Ace" => Card::Safety(Safety::DrivingAce),
            "Right of Way" => Card::Safety(Safety::RightOfWay),
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseCard,
                    format!("Parse card: {s}"),
                ))
            }
        };
        Ok(card)
    }
}

/// Non-panicking helper to parse card labels into Card instances.
pub fn try_parse_cards<I, S>(labels: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

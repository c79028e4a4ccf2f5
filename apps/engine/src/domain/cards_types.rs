//! Core card-related types: Card, Category and the four card families

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Distance,
    Hazard,
    Remedy,
    Safety,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Distance {
    D25,
    D50,
    D75,
    D100,
    D200,
}

impl Distance {
    pub const ALL: [Distance; 5] = [
        Distance::D25,
        Distance::D50,
        Distance::D75,
        Distance::D100,
        Distance::D200,
    ];

    /// Face value in km.
    pub fn km(self) -> u16 {
        match self {
            Distance::D25 => 25,
            Distance::D50 => 50,
            Distance::D75 => 75,
            Distance::D100 => 100,
            Distance::D200 => 200,
        }
    }
}

/// Attack cards played against the opponent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Hazard {
    FlatTire,
    OutOfGas,
    Accident,
    SpeedLimit,
    RedLight,
}

impl Hazard {
    pub const ALL: [Hazard; 5] = [
        Hazard::FlatTire,
        Hazard::OutOfGas,
        Hazard::Accident,
        Hazard::SpeedLimit,
        Hazard::RedLight,
    ];
}

/// Defense cards that cure the acting seat's own hazard.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Remedy {
    SpareTire,
    Gasoline,
    Repairs,
    EndOfLimit,
    GreenLight,
}

impl Remedy {
    pub const ALL: [Remedy; 5] = [
        Remedy::SpareTire,
        Remedy::Gasoline,
        Remedy::Repairs,
        Remedy::EndOfLimit,
        Remedy::GreenLight,
    ];
}

/// Permanent protections; one copy of each exists in every deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Safety {
    PunctureProof,
    ExtraTank,
    DrivingAce,
    RightOfWay,
}

impl Safety {
    pub const ALL: [Safety; 4] = [
        Safety::PunctureProof,
        Safety::ExtraTank,
        Safety::DrivingAce,
        Safety::RightOfWay,
    ];
}

/// A single card. Equality is by (category, value), which the enum layout
/// gives for free.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Card {
    Distance(Distance),
    Hazard(Hazard),
    Remedy(Remedy),
    Safety(Safety),
}

impl Card {
    pub fn category(&self) -> Category {
        match self {
            Card::Distance(_) => Category::Distance,
            Card::Hazard(_) => Category::Hazard,
            Card::Remedy(_) => Category::Remedy,
            Card::Safety(_) => Category::Safety,
        }
    }
}

impl From<Distance> for Card {
    fn from(d: Distance) -> Self {
        Card::Distance(d)
    }
}

impl From<Hazard> for Card {
    fn from(h: Hazard) -> Self {
        Card::Hazard(h)
    }
}

impl From<Remedy> for Card {
    fn from(r: Remedy) -> Self {
        Card::Remedy(r)
    }
}

impl From<Safety> for Card {
    fn from(s: Safety) -> Self {
        Card::Safety(s)
    }
}

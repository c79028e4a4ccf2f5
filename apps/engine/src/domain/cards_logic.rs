//! Fixed relations between hazards, remedies and safeties.

use super::cards_types::{Hazard, Remedy, Safety};

/// The single safety that nullifies a hazard.
pub fn protecting_safety(hazard: Hazard) -> Safety {
    match hazard {
        Hazard::FlatTire => Safety::PunctureProof,
        Hazard::OutOfGas => Safety::ExtraTank,
        Hazard::Accident => Safety::DrivingAce,
        Hazard::SpeedLimit | Hazard::RedLight => Safety::RightOfWay,
    }
}

/// The hazard a remedy cures. `EndOfLimit` lifts the speed limit; every
/// other remedy cures exactly one stopping hazard.
pub fn remedy_target(remedy: Remedy) -> Hazard {
    match remedy {
        Remedy::SpareTire => Hazard::FlatTire,
        Remedy::Gasoline => Hazard::OutOfGas,
        Remedy::Repairs => Hazard::Accident,
        Remedy::EndOfLimit => Hazard::SpeedLimit,
        Remedy::GreenLight => Hazard::RedLight,
    }
}

/// Hazards a safety protects against. Right of Way covers two.
pub fn countered_hazards(safety: Safety) -> &'static [Hazard] {
    match safety {
        Safety::PunctureProof => &[Hazard::FlatTire],
        Safety::ExtraTank => &[Hazard::OutOfGas],
        Safety::DrivingAce => &[Hazard::Accident],
        Safety::RightOfWay => &[Hazard::RedLight, Hazard::SpeedLimit],
    }
}

//! Domain layer: pure race rules, no storage.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod drawing;
pub mod extension;
pub mod game_transition;
pub mod lifecycle;
pub mod play;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;

#[cfg(test)]
mod tests_extension;
#[cfg(test)]
mod tests_play;
#[cfg(test)]
mod tests_props_play;

// Re-exports for ergonomics
pub use cards_types::{Card, Category, Distance, Hazard, Remedy, Safety};
pub use dealing::{build_deck, build_deck_seeded, deal, deal_into_room, DeckVariant};
pub use drawing::{discard, draw_one, refill_hand, DiscardOutcome};
pub use extension::{accept_extension, decline_extension, pending_extension_for};
pub use play::{attempt_play, PlayOutcome};
pub use scoring::{compute_hand_score, ScoringResult, ScoringTable};
pub use seed_derivation::derive_dealing_seed;
pub use state::{HandEnd, PlayerState, RoadStatus, RoomState, RoomStatus, Scorecard, Seat};

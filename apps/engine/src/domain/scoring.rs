//! Hand scoring and match accumulation.
//!
//! Component values that are fixed by the rules are constants here. The two
//! bonuses that changed between rule revisions (all safeties, trip
//! completed) live in [`ScoringTable`]; `STANDARD` is the canonical table.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{BASE_CAP, EXTENDED_CAP};
use crate::domain::state::{HandEnd, PlayerState, RoomState, RoomStatus, Scorecard, Seat};
use crate::domain::Safety;
use crate::errors::domain::{DomainError, ValidationKind};

pub const SAFETY_POINTS: u32 = 100;
pub const COUP_FOURRE_POINTS: u32 = 300;
pub const EXTENSION_BONUS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub all_safeties: u32,
    pub trip_completed_700: u32,
    pub trip_completed_1000: u32,
}

impl ScoringTable {
    pub const STANDARD: ScoringTable = ScoringTable {
        all_safeties: 400,
        trip_completed_700: 200,
        trip_completed_1000: 300,
    };

    pub const EXTENDED: ScoringTable = ScoringTable {
        all_safeties: 1000,
        trip_completed_700: 300,
        trip_completed_1000: 400,
    };

    pub fn by_name(name: &str) -> Option<ScoringTable> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::STANDARD),
            "extended" => Some(Self::EXTENDED),
            _ => None,
        }
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Outcome of scoring a finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringResult {
    /// Committed scorecards, indexed by seat.
    pub cards: [Scorecard; 2],
    /// False when both seats were already recorded before this call.
    pub newly_recorded: bool,
    pub match_over: bool,
    pub match_winner: Option<Seat>,
}

impl ScoringResult {
    pub fn card(&self, seat: Seat) -> &Scorecard {
        &self.cards[seat.index()]
    }
}

/// Score one seat against its opponent for a hand that ended at `cap`.
pub fn score_seat(
    me: &PlayerState,
    opp: &PlayerState,
    cap: u16,
    table: &ScoringTable,
    deck_exhausted: bool,
) -> Scorecard {
    let reached_cap = me.distance == cap;
    let hand_winner = reached_cap && me.distance >= opp.distance;

    let mut card = Scorecard {
        distance: u32::from(me.distance),
        safeties: SAFETY_POINTS * me.safeties.len() as u32,
        coup_fourre: COUP_FOURRE_POINTS * u32::from(me.coup_fourre),
        ..Scorecard::default()
    };

    if Safety::ALL.iter().all(|s| me.has_safety(*s)) {
        card.all_safeties = table.all_safeties;
    }
    if hand_winner {
        card.trip_completed = if cap == EXTENDED_CAP {
            table.trip_completed_1000
        } else {
            table.trip_completed_700
        };
    }
    if !me.used_200 {
        card.no_200 = match me.distance {
            EXTENDED_CAP => 300,
            BASE_CAP => 200,
            _ => 0,
        };
    }
    if opp.distance == 0 {
        card.opponent_zero = match me.distance {
            EXTENDED_CAP => 500,
            BASE_CAP if !me.extension_accepted => 300,
            _ => 0,
        };
    }
    if me.extension_accepted {
        card.extension = EXTENSION_BONUS;
    }
    if deck_exhausted && reached_cap {
        card.empty_deck = if cap == BASE_CAP { 500 } else { 400 };
    }

    card.total = card.distance
        + card.safeties
        + card.all_safeties
        + card.coup_fourre
        + card.trip_completed
        + card.no_200
        + card.opponent_zero
        + card.extension
        + card.empty_deck;
    card
}

/// Commit both seats' scorecards for a finished hand, at most once each.
///
/// A repeated call returns the already committed scorecards and leaves the
/// match totals alone. Also settles the match winner.
pub fn compute_hand_score(
    room: &mut RoomState,
    table: &ScoringTable,
    match_target: u32,
) -> Result<ScoringResult, DomainError> {
    if room.status != RoomStatus::Finished {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Hand is not finished (status {:?})", room.status),
        ));
    }

    let cap = room.effective_cap();
    let deck_exhausted = room.hand_end == Some(HandEnd::DeckExhausted);

    let (p1, p2) = room.pair_mut(Seat::Seat1)?;
    let fresh = [
        score_seat(p1, p2, cap, table, deck_exhausted),
        score_seat(p2, p1, cap, table, deck_exhausted),
    ];

    let mut newly_recorded = false;
    let mut cards = [Scorecard::default(); 2];
    for (i, player) in [p1, p2].into_iter().enumerate() {
        if !player.score_recorded {
            player.score.current_hand = Some(fresh[i]);
            player.score.match_total += fresh[i].total;
            player.score_recorded = true;
            newly_recorded = true;
        }
        cards[i] = player.score.current_hand.unwrap_or_default();
    }

    let match_winner = settle_match(room, match_target);
    Ok(ScoringResult {
        cards,
        newly_recorded,
        match_over: match_winner.is_some(),
        match_winner,
    })
}

/// The match ends once a total reaches the target and the totals differ;
/// the higher total wins.
pub fn settle_match(room: &mut RoomState, match_target: u32) -> Option<Seat> {
    let total = |seat| room.seat(seat).map_or(0, |p| p.score.match_total);
    let (t1, t2) = (total(Seat::Seat1), total(Seat::Seat2));

    let winner = if t1.max(t2) < match_target || t1 == t2 {
        None
    } else if t1 > t2 {
        Some(Seat::Seat1)
    } else {
        Some(Seat::Seat2)
    };
    if winner.is_some() {
        room.match_winner = winner;
    }
    room.match_winner
}

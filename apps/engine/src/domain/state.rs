use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::domain::rules::{effective_cap, EXTENDED_CAP};
use crate::domain::{Card, Hazard, Safety};
use crate::errors::domain::{DomainError, ValidationKind};

/// One of the two player slots in a room.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Seat1,
    Seat2,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::Seat1, Seat::Seat2];

    #[inline]
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Seat1 => Seat::Seat2,
            Seat::Seat2 => Seat::Seat1,
        }
    }

    /// Document key of this seat's sub-document.
    pub fn key(self) -> &'static str {
        match self {
            Seat::Seat1 => "seat1",
            Seat::Seat2 => "seat2",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Seat::Seat1 => 0,
            Seat::Seat2 => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Road status of a seat: rolling (green light) or stopped by a hazard.
///
/// The speed limit is not a stopping hazard; it lives in its own flag.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RoadStatus {
    Rolling,
    Stopped(Hazard),
}

impl RoadStatus {
    pub const ROLLING_LABEL: &'static str = "Green Light";

    pub fn label(&self) -> &'static str {
        match self {
            RoadStatus::Rolling => Self::ROLLING_LABEL,
            RoadStatus::Stopped(h) => h.label(),
        }
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self, RoadStatus::Rolling)
    }
}

impl Default for RoadStatus {
    /// Every hand starts at a red light.
    fn default() -> Self {
        RoadStatus::Stopped(Hazard::RedLight)
    }
}

impl Serialize for RoadStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RoadStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == Self::ROLLING_LABEL {
            return Ok(RoadStatus::Rolling);
        }
        match s.parse::<Card>() {
            Ok(Card::Hazard(h)) if h != Hazard::SpeedLimit => Ok(RoadStatus::Stopped(h)),
            _ => Err(D::Error::custom(format!("Invalid road status: {s}"))),
        }
    }
}

/// Hand/match progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// No deck dealt for the current hand.
    #[default]
    Waiting,
    /// Hands dealt, no move made yet.
    Started,
    /// At least one move made.
    Playing,
    /// Hand over; scoring may run.
    Finished,
}

/// Why a hand finished.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandEnd {
    /// A seat reached 1000 exactly.
    TripCompleted,
    /// A seat stopped at 700 and declined the extension.
    ExtensionDeclined,
    /// Draw pile and both hands ran out.
    DeckExhausted,
}

/// Per-hand score breakdown.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub distance: u32,
    pub safeties: u32,
    pub all_safeties: u32,
    pub coup_fourre: u32,
    pub trip_completed: u32,
    pub no_200: u32,
    pub opponent_zero: u32,
    pub extension: u32,
    pub empty_deck: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Scorecard of the hand most recently scored (cleared on a new hand).
    #[serde(default)]
    pub current_hand: Option<Scorecard>,
    /// Sum of every committed hand total in this match.
    #[serde(default)]
    pub match_total: u32,
}

/// Per-seat record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub player_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub distance: u16,
    #[serde(default)]
    pub status: RoadStatus,
    #[serde(default)]
    pub speed_limit: bool,
    #[serde(default)]
    pub safeties: Vec<Safety>,
    #[serde(default)]
    pub coup_fourre: u8,
    #[serde(default)]
    pub used_200: bool,
    #[serde(default)]
    pub extension_pending: bool,
    #[serde(default)]
    pub extension_accepted: bool,
    /// Set once the extension decision was made this hand; the prompt is
    /// never raised twice.
    #[serde(default)]
    pub extension_resolved: bool,
    #[serde(default)]
    pub finalized: bool,
    #[serde(default)]
    pub winner: bool,
    #[serde(default)]
    pub last_card_played: Option<String>,
    #[serde(default)]
    pub score_recorded: bool,
    #[serde(default)]
    pub score_seen: bool,
    #[serde(default)]
    pub score: ScoreRecord,
}

impl PlayerState {
    pub fn new(player_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            hand: Vec::new(),
            distance: 0,
            status: RoadStatus::default(),
            speed_limit: false,
            safeties: Vec::new(),
            coup_fourre: 0,
            used_200: false,
            extension_pending: false,
            extension_accepted: false,
            extension_resolved: false,
            finalized: false,
            winner: false,
            last_card_played: None,
            score_recorded: false,
            score_seen: false,
            score: ScoreRecord::default(),
        }
    }

    /// Clear every per-hand field; identity and match total survive.
    pub fn reset_for_new_hand(&mut self) {
        let match_total = self.score.match_total;
        *self = PlayerState::new(std::mem::take(&mut self.player_id), std::mem::take(&mut self.name));
        self.score.match_total = match_total;
    }

    pub fn has_safety(&self, safety: Safety) -> bool {
        self.safeties.contains(&safety)
    }

    /// Remove exactly one copy of `card`. Returns false when absent.
    pub fn take_card(&mut self, card: Card) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// The shared persisted aggregate for one match between two seats.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    #[serde(default)]
    pub seat1: Option<PlayerState>,
    #[serde(default)]
    pub seat2: Option<PlayerState>,
    /// Remaining draw pile; `None` means it must be regenerated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_pile: Option<Vec<Card>>,
    /// Seat expected to act. Unknown values read as `None`.
    #[serde(default, deserialize_with = "lenient_turn")]
    pub turn: Option<Seat>,
    #[serde(default)]
    pub status: RoomStatus,
    /// 1-based hand counter within the match.
    #[serde(default = "first_hand")]
    pub hand_no: u32,
    #[serde(default)]
    pub hand_end: Option<HandEnd>,
    #[serde(default)]
    pub match_winner: Option<Seat>,
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

fn first_hand() -> u32 {
    1
}

fn lenient_turn<'de, D>(deserializer: D) -> Result<Option<Seat>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value::<Seat>(v).ok()))
}

impl RoomState {
    pub fn new(now: OffsetDateTime, ttl: time::Duration, rng_seed: Option<u64>) -> Self {
        Self {
            seat1: None,
            seat2: None,
            draw_pile: None,
            turn: None,
            status: RoomStatus::Waiting,
            hand_no: 1,
            hand_end: None,
            match_winner: None,
            rng_seed,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn seat(&self, seat: Seat) -> Option<&PlayerState> {
        match seat {
            Seat::Seat1 => self.seat1.as_ref(),
            Seat::Seat2 => self.seat2.as_ref(),
        }
    }

    pub fn seat_mut(&mut self, seat: Seat) -> Option<&mut PlayerState> {
        match seat {
            Seat::Seat1 => self.seat1.as_mut(),
            Seat::Seat2 => self.seat2.as_mut(),
        }
    }

    pub fn slot_mut(&mut self, seat: Seat) -> &mut Option<PlayerState> {
        match seat {
            Seat::Seat1 => &mut self.seat1,
            Seat::Seat2 => &mut self.seat2,
        }
    }

    /// Both seats, acting seat first.
    pub fn pair_mut(
        &mut self,
        seat: Seat,
    ) -> Result<(&mut PlayerState, &mut PlayerState), DomainError> {
        let (first, second) = (self.seat1.as_mut(), self.seat2.as_mut());
        let (Some(p1), Some(p2)) = (first, second) else {
            return Err(DomainError::validation(
                ValidationKind::SeatNotRegistered,
                "Both seats must be registered",
            ));
        };
        Ok(match seat {
            Seat::Seat1 => (p1, p2),
            Seat::Seat2 => (p2, p1),
        })
    }

    pub fn both_seated(&self) -> bool {
        self.seat1.is_some() && self.seat2.is_some()
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|&s| self.seat(s).is_some_and(|p| p.player_id == player_id))
    }

    /// True once either seat accepted the extension; the 700 cap is then
    /// lifted for the whole hand.
    pub fn extension_active(&self) -> bool {
        Seat::ALL
            .into_iter()
            .any(|s| self.seat(s).is_some_and(|p| p.extension_accepted))
    }

    pub fn effective_cap(&self) -> u16 {
        effective_cap(self.extension_active())
    }

    /// Seat that must accept or decline the extension before anything else.
    pub fn pending_extension_for(&self) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|&s| self.seat(s).is_some_and(|p| p.extension_pending))
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, RoomStatus::Started | RoomStatus::Playing)
    }

    pub fn pile_len(&self) -> usize {
        self.draw_pile.as_ref().map_or(0, Vec::len)
    }

    /// Structural checks a stored room must pass before any rule runs on it.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut pending = 0;
        for seat in Seat::ALL {
            let Some(p) = self.seat(seat) else { continue };
            if p.distance > EXTENDED_CAP {
                return Err(format!("{seat} distance {} exceeds {EXTENDED_CAP}", p.distance));
            }
            for (i, safety) in p.safeties.iter().enumerate() {
                if p.safeties[..i].contains(safety) {
                    return Err(format!("{seat} holds safety '{}' twice", safety.label()));
                }
            }
            if usize::from(p.coup_fourre) > p.safeties.len() {
                return Err(format!("{seat} has more coups fourres than safeties"));
            }
            pending += usize::from(p.extension_pending);
        }
        if pending > 1 {
            return Err("both seats have an extension decision pending".into());
        }
        Ok(())
    }

    /// Hand the move to the opponent of `actor`.
    ///
    /// Once the pile is gone an empty-handed opponent has nothing to play, so
    /// the actor keeps moving until its own hand is empty too.
    pub fn pass_turn(&mut self, actor: Seat) {
        let next = actor.opponent();
        let next_empty = self.seat(next).is_none_or(|p| p.hand.is_empty());
        let actor_holds = self.seat(actor).is_some_and(|p| !p.hand.is_empty());
        self.turn = if self.pile_len() == 0 && next_empty && actor_holds {
            Some(actor)
        } else {
            Some(next)
        };
    }

    /// First successful move of a hand flips `started` to `playing`.
    pub fn mark_moved(&mut self) {
        if self.status == RoomStatus::Started {
            self.status = RoomStatus::Playing;
        }
    }

    /// Terminal transition of a hand; nobody is to move afterwards.
    pub fn finish_hand(&mut self, reason: HandEnd) {
        self.status = RoomStatus::Finished;
        self.hand_end = Some(reason);
        self.turn = None;
        for seat in Seat::ALL {
            if let Some(p) = self.seat_mut(seat) {
                p.extension_pending = false;
            }
        }
    }

    /// Repair a turn marker that does not name a seat while a hand is in
    /// progress. Seat1 is chosen deterministically. Returns true if changed.
    pub fn normalize_turn(&mut self) -> bool {
        if !self.is_in_progress() || self.turn.is_some() {
            return false;
        }
        self.turn = Some(self.pending_extension_for().unwrap_or(Seat::Seat1));
        true
    }
}

pub fn require_turn(state: &RoomState, ctx: &'static str) -> Result<Seat, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: turn must be set ({ctx})"))
    })
}

pub fn require_seat<'a>(
    state: &'a RoomState,
    seat: Seat,
    ctx: &'static str,
) -> Result<&'a PlayerState, DomainError> {
    state.seat(seat).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::SeatNotRegistered,
            format!("{seat} is not registered ({ctx})"),
        )
    })
}

/// Shared guard for every move: hand in progress and it is `seat`'s turn.
pub fn require_actor(state: &RoomState, seat: Seat, ctx: &'static str) -> Result<(), DomainError> {
    require_seat(state, seat, ctx)?;
    if !state.is_in_progress() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("No hand in progress ({ctx})"),
        ));
    }
    let turn = require_turn(state, ctx)?;
    if turn != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Not {seat}'s turn ({ctx})"),
        ));
    }
    Ok(())
}

use crate::domain::cards_logic::{countered_hazards, protecting_safety, remedy_target};
use crate::domain::rules::{BASE_CAP, EXTENDED_CAP, SPEED_LIMIT_KM};
use crate::domain::state::{require_actor, HandEnd, PlayerState, RoadStatus, RoomState, Seat};
use crate::domain::{Card, Distance, Hazard, Remedy, Safety};
use crate::errors::domain::{DomainError, ValidationKind};

/// What happened to an attempted play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Card played; the turn moved on unless the hand finished.
    Applied,
    /// Rule violation; nothing changed. The reason is shown to the player.
    Blocked(String),
    /// Seat landed on 700 exactly and must accept or decline the extension.
    /// The turn stays with the seat.
    ExtensionPending,
}

impl PlayOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, PlayOutcome::Blocked(_))
    }
}

pub const REASON_DECISION_PENDING: &str =
    "you must choose between the extension and ending the hand first";

/// How a successful play leaves the hand.
enum Step {
    PassTurn,
    HoldForDecision,
    TripCompleted,
}

type Verdict = Result<Step, String>;

/// Validate and apply `card` from `seat`'s hand.
///
/// Caller errors (not this seat's turn, card not held, no hand running) are
/// `Err` and leave the room untouched, as do `Blocked` outcomes.
pub fn attempt_play(
    room: &mut RoomState,
    seat: Seat,
    card: Card,
) -> Result<PlayOutcome, DomainError> {
    require_actor(room, seat, "attempt_play")?;

    let extension_active = room.extension_active();
    let (me, opp) = room.pair_mut(seat)?;

    if !me.hand.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card '{card}' not in hand"),
        ));
    }
    if me.extension_pending {
        return Ok(PlayOutcome::Blocked(REASON_DECISION_PENDING.to_string()));
    }

    let verdict = match card {
        Card::Distance(d) => play_distance(me, d, extension_active),
        Card::Hazard(h) => play_hazard(opp, h),
        Card::Remedy(r) => play_remedy(me, r),
        Card::Safety(s) => play_safety(me, s),
    };
    let step = match verdict {
        Ok(step) => step,
        Err(reason) => return Ok(PlayOutcome::Blocked(reason)),
    };

    me.take_card(card);
    me.last_card_played = Some(card.label().to_string());
    room.mark_moved();

    Ok(match step {
        Step::PassTurn => {
            room.pass_turn(seat);
            PlayOutcome::Applied
        }
        Step::HoldForDecision => PlayOutcome::ExtensionPending,
        Step::TripCompleted => {
            room.finish_hand(HandEnd::TripCompleted);
            PlayOutcome::Applied
        }
    })
}

fn play_distance(me: &mut PlayerState, distance: Distance, extension_active: bool) -> Verdict {
    if !me.status.is_rolling() {
        return Err("you do not have a 'Green Light'".into());
    }
    let km = distance.km();
    if me.speed_limit && km > SPEED_LIMIT_KM {
        return Err(format!("the {SPEED_LIMIT_KM} km speed limit is active"));
    }

    let Some(new) = me.distance.checked_add(km) else {
        return Err(format!("you need exactly {EXTENDED_CAP} km to end the hand"));
    };
    if !extension_active {
        if new == BASE_CAP && !me.extension_resolved {
            me.distance = new;
            me.used_200 |= distance == Distance::D200;
            me.extension_pending = true;
            return Ok(Step::HoldForDecision);
        }
        if new > BASE_CAP {
            return Err(format!(
                "you need exactly {BASE_CAP} km to request the extension or end the hand"
            ));
        }
    }
    if new > EXTENDED_CAP {
        return Err(format!("you need exactly {EXTENDED_CAP} km to end the hand"));
    }

    me.distance = new;
    me.used_200 |= distance == Distance::D200;
    if new == EXTENDED_CAP {
        me.winner = true;
        me.finalized = true;
        return Ok(Step::TripCompleted);
    }
    Ok(Step::PassTurn)
}

fn play_hazard(opp: &mut PlayerState, hazard: Hazard) -> Verdict {
    let safety = protecting_safety(hazard);
    if opp.has_safety(safety) {
        return Err(format!(
            "opponent is protected by safety '{}'",
            safety.label()
        ));
    }

    if hazard == Hazard::SpeedLimit {
        if opp.speed_limit {
            return Err(format!(
                "opponent already has the {SPEED_LIMIT_KM} km speed limit active"
            ));
        }
        opp.speed_limit = true;
        return Ok(Step::PassTurn);
    }

    if !opp.status.is_rolling() {
        return Err("opponent does not have a 'Green Light'".into());
    }
    opp.status = RoadStatus::Stopped(hazard);
    Ok(Step::PassTurn)
}

fn play_remedy(me: &mut PlayerState, remedy: Remedy) -> Verdict {
    if remedy == Remedy::EndOfLimit {
        if !me.speed_limit {
            return Err(format!(
                "you do not have the {SPEED_LIMIT_KM} km speed limit active"
            ));
        }
        me.speed_limit = false;
        return Ok(Step::PassTurn);
    }

    let cures = remedy_target(remedy);
    if me.status != RoadStatus::Stopped(cures) {
        return Err(format!(
            "you have '{}' and not '{}'",
            me.status.label(),
            cures.label()
        ));
    }
    me.status = RoadStatus::Rolling;
    Ok(Step::PassTurn)
}

fn play_safety(me: &mut PlayerState, safety: Safety) -> Verdict {
    if me.has_safety(safety) {
        return Err("you already have this safety in play".into());
    }
    me.safeties.push(safety);

    let mut countered = false;
    for &hazard in countered_hazards(safety) {
        if hazard == Hazard::SpeedLimit {
            if me.speed_limit {
                me.speed_limit = false;
                countered = true;
            }
        } else if me.status == RoadStatus::Stopped(hazard) {
            me.status = RoadStatus::Rolling;
            countered = true;
        }
    }
    // One bonus per safety even when Right of Way clears two conditions.
    if countered {
        me.coup_fourre += 1;
    }
    Ok(Step::PassTurn)
}

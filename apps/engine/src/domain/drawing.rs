//! Draw pile handling: discards, refills, single draws and the
//! deck-exhaustion hand end.

use std::cmp::Ordering;

use crate::domain::rules::HAND_SIZE;
use crate::domain::state::{require_actor, require_seat, HandEnd, RoomState, Seat};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardOutcome {
    Discarded,
    /// The card was not held; nothing changed.
    NotInHand,
}

fn reject_if_deciding(room: &RoomState, seat: Seat, ctx: &'static str) -> Result<(), DomainError> {
    if room.pending_extension_for() == Some(seat) {
        return Err(DomainError::validation(
            ValidationKind::DecisionPending,
            format!("{seat} must accept or decline the extension first ({ctx})"),
        ));
    }
    Ok(())
}

/// Throw away one copy of `card` and pass the turn.
pub fn discard(room: &mut RoomState, seat: Seat, card: Card) -> Result<DiscardOutcome, DomainError> {
    require_actor(room, seat, "discard")?;
    reject_if_deciding(room, seat, "discard")?;

    let (me, _) = room.pair_mut(seat)?;
    if !me.take_card(card) {
        return Ok(DiscardOutcome::NotInHand);
    }
    me.last_card_played = Some(format!("{} (discard)", card.label()));
    room.mark_moved();
    room.pass_turn(seat);
    Ok(DiscardOutcome::Discarded)
}

/// Draw from the top until the seat holds a full hand or the pile is empty.
///
/// Returns the number of cards drawn. Does nothing once the hand finished.
pub fn refill_hand(room: &mut RoomState, seat: Seat) -> Result<usize, DomainError> {
    require_seat(room, seat, "refill_hand")?;
    if !room.is_in_progress() {
        return Ok(0);
    }

    let mut drawn = 0;
    if let (Some(pile), Some(player)) = (
        room.draw_pile.as_mut(),
        match seat {
            Seat::Seat1 => room.seat1.as_mut(),
            Seat::Seat2 => room.seat2.as_mut(),
        },
    ) {
        let want = HAND_SIZE.saturating_sub(player.hand.len()).min(pile.len());
        player.hand.extend(pile.drain(..want));
        drawn = want;
    }

    check_deck_exhaustion(room);
    Ok(drawn)
}

/// Take the top card of the pile. The turn is not passed, so a seat already
/// holding a full hand may not draw.
pub fn draw_one(room: &mut RoomState, seat: Seat) -> Result<Option<Card>, DomainError> {
    require_actor(room, seat, "draw_one")?;
    reject_if_deciding(room, seat, "draw_one")?;
    if require_seat(room, seat, "draw_one")?.hand.len() >= HAND_SIZE {
        return Err(DomainError::validation(
            ValidationKind::HandFull,
            format!("{seat} already holds {HAND_SIZE} cards (draw_one)"),
        ));
    }

    let card = match room.draw_pile.as_mut() {
        Some(pile) if !pile.is_empty() => Some(pile.remove(0)),
        _ => None,
    };
    if let (Some(card), Some(me)) = (card, room.seat_mut(seat)) {
        me.hand.push(card);
        me.last_card_played = Some(format!("{} (draw)", card.label()));
    }

    check_deck_exhaustion(room);
    Ok(card)
}

/// End the hand when nothing is left to play.
///
/// Applies only while a hand is running, the pile is empty, both hands are
/// empty, nobody has finalized and no extension decision is pending. The strictly longer distance wins; a tie
/// finalizes both seats without a winner. Returns true if the hand ended.
pub fn check_deck_exhaustion(room: &mut RoomState) -> bool {
    if !room.is_in_progress() || room.pile_len() > 0 || room.pending_extension_for().is_some() {
        return false;
    }
    let (Some(p1), Some(p2)) = (room.seat1.as_mut(), room.seat2.as_mut()) else {
        return false;
    };
    if !p1.hand.is_empty() || !p2.hand.is_empty() || p1.finalized || p2.finalized {
        return false;
    }

    match p1.distance.cmp(&p2.distance) {
        Ordering::Greater => {
            p1.winner = true;
            p1.finalized = true;
        }
        Ordering::Less => {
            p2.winner = true;
            p2.finalized = true;
        }
        Ordering::Equal => {
            p1.finalized = true;
            p2.finalized = true;
        }
    }
    room.finish_hand(HandEnd::DeckExhausted);
    true
}

//! Seat registration and hand/match resets.

use crate::domain::state::{PlayerState, RoomState, RoomStatus, Seat};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Seat `player_id` in the first free slot.
///
/// A player already seated gets their existing seat back.
pub fn register_player(
    room: &mut RoomState,
    player_id: &str,
    name: &str,
) -> Result<Seat, DomainError> {
    if let Some(seat) = room.seat_of(player_id) {
        return Ok(seat);
    }
    let free = Seat::ALL.into_iter().find(|&s| room.seat(s).is_none());
    let Some(seat) = free else {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            "Both seats are taken",
        ));
    };
    *room.slot_mut(seat) = Some(PlayerState::new(player_id, name));
    Ok(seat)
}

/// Prepare the next hand: per-hand fields cleared, match totals and seats
/// kept, draw pile removed so it is dealt afresh. Seat1 opens every hand.
pub fn reset_hand(room: &mut RoomState) {
    for seat in Seat::ALL {
        if let Some(p) = room.seat_mut(seat) {
            p.reset_for_new_hand();
        }
    }
    room.draw_pile = None;
    room.turn = None;
    room.status = RoomStatus::Waiting;
    room.hand_end = None;
    room.hand_no = room.hand_no.saturating_add(1);
}

/// Start a new match between the same seats.
pub fn reset_match(room: &mut RoomState) {
    reset_hand(room);
    for seat in Seat::ALL {
        if let Some(p) = room.seat_mut(seat) {
            p.score.match_total = 0;
        }
    }
    room.match_winner = None;
    room.hand_no = 1;
}

/// Record that `seat` has seen the scoreboard of the last hand.
pub fn mark_score_seen(room: &mut RoomState, seat: Seat) -> Result<(), DomainError> {
    let player = room.seat_mut(seat).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::SeatNotRegistered,
            format!("{seat} is not registered (mark_score_seen)"),
        )
    })?;
    player.score_seen = true;
    Ok(())
}

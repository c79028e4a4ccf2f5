//! The 700 km decision: keep racing to 1000 or stop here.

use crate::domain::drawing::check_deck_exhaustion;
use crate::domain::state::{require_seat, HandEnd, RoomState, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Seat that must decide before anything else can happen, if any.
pub fn pending_extension_for(room: &RoomState) -> Option<Seat> {
    room.pending_extension_for()
}

fn require_pending(room: &RoomState, seat: Seat, ctx: &'static str) -> Result<(), DomainError> {
    let player = require_seat(room, seat, ctx)?;
    if !room.is_in_progress() || !player.extension_pending {
        return Err(DomainError::validation(
            ValidationKind::NoDecisionPending,
            format!("No extension decision pending for {seat} ({ctx})"),
        ));
    }
    Ok(())
}

/// Race on to 1000. The cap is lifted for both seats and the turn passes.
///
/// If the decision was the last thing left to do (pile and both hands
/// empty) the hand ends on deck exhaustion.
pub fn accept_extension(room: &mut RoomState, seat: Seat) -> Result<(), DomainError> {
    require_pending(room, seat, "accept_extension")?;
    let (me, _) = room.pair_mut(seat)?;
    me.extension_pending = false;
    me.extension_accepted = true;
    me.extension_resolved = true;
    room.mark_moved();
    room.pass_turn(seat);
    check_deck_exhaustion(room);
    Ok(())
}

/// Stop at 700. The seat wins the hand and scoring follows.
pub fn decline_extension(room: &mut RoomState, seat: Seat) -> Result<(), DomainError> {
    require_pending(room, seat, "decline_extension")?;
    let (me, _) = room.pair_mut(seat)?;
    me.extension_pending = false;
    me.extension_resolved = true;
    me.finalized = true;
    me.winner = true;
    room.finish_hand(HandEnd::ExtensionDeclined);
    Ok(())
}

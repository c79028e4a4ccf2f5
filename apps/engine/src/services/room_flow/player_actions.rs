use tracing::{debug, info, warn};

use super::{RoomFlowService, RoomMutationResult};
use crate::domain::drawing::{self, DiscardOutcome};
use crate::domain::extension;
use crate::domain::play::{attempt_play, PlayOutcome};
use crate::domain::state::{RoomStatus, Seat};
use crate::domain::Card;
use crate::error::AppError;
use crate::repos::rooms::{RoomId, RoomStore};

fn log_rejected<T>(
    result: Result<T, AppError>,
    room_id: &RoomId,
    seat: Seat,
    op: &'static str,
) -> Result<T, AppError> {
    if let Err(err) = &result {
        if err.is_caller_error() {
            warn!(room_id = %room_id, seat = %seat, op, code = err.code(), detail = err.detail(), "Move rejected");
        }
    }
    result
}

impl<S: RoomStore> RoomFlowService<S> {
    /// Play a card. A successful play refills the seat's hand; a play that
    /// ends the hand is scored straight away.
    pub fn play_card(
        &self,
        room_id: &RoomId,
        seat: Seat,
        card: Card,
    ) -> Result<RoomMutationResult<PlayOutcome>, AppError> {
        debug!(room_id = %room_id, seat = %seat, card = %card, "Attempting play");
        let _ticket = self.guard.acquire(room_id, seat)?;

        let result = self.run_mutation(room_id, "play_card", |room| {
            let outcome = attempt_play(room, seat, card)?;
            if !outcome.is_blocked() {
                drawing::refill_hand(room, seat)?;
            }
            Ok(outcome)
        });
        let result = log_rejected(result, room_id, seat, "play_card")?;

        match &result.outcome {
            PlayOutcome::Blocked(reason) => {
                info!(room_id = %room_id, seat = %seat, card = %card, reason = %reason, "Play blocked");
            }
            outcome => {
                info!(room_id = %room_id, seat = %seat, card = %card, ?outcome, "Card played");
            }
        }
        self.score_if_finished(room_id, result)
    }

    /// Discard a card and pass the turn. A card that is not held is a no-op.
    pub fn discard(
        &self,
        room_id: &RoomId,
        seat: Seat,
        card: Card,
    ) -> Result<RoomMutationResult<DiscardOutcome>, AppError> {
        debug!(room_id = %room_id, seat = %seat, card = %card, "Discarding");
        let _ticket = self.guard.acquire(room_id, seat)?;

        let result = self.run_mutation(room_id, "discard", |room| {
            let outcome = drawing::discard(room, seat, card)?;
            if outcome == DiscardOutcome::Discarded {
                drawing::refill_hand(room, seat)?;
            }
            Ok(outcome)
        });
        let result = log_rejected(result, room_id, seat, "discard")?;

        if result.outcome == DiscardOutcome::NotInHand {
            warn!(room_id = %room_id, seat = %seat, card = %card, "Discard ignored: card not in hand");
        }
        self.score_if_finished(room_id, result)
    }

    /// Draw the top card without passing the turn.
    pub fn draw_one(
        &self,
        room_id: &RoomId,
        seat: Seat,
    ) -> Result<RoomMutationResult<Option<Card>>, AppError> {
        debug!(room_id = %room_id, seat = %seat, "Drawing one card");
        let _ticket = self.guard.acquire(room_id, seat)?;

        let result = self.run_mutation(room_id, "draw_one", |room| drawing::draw_one(room, seat));
        let result = log_rejected(result, room_id, seat, "draw_one")?;
        self.score_if_finished(room_id, result)
    }

    /// Top the seat's hand up to seven cards.
    pub fn refill_hand(
        &self,
        room_id: &RoomId,
        seat: Seat,
    ) -> Result<RoomMutationResult<usize>, AppError> {
        let result = self.run_mutation(room_id, "refill_hand", |room| {
            drawing::refill_hand(room, seat)
        });
        let result = log_rejected(result, room_id, seat, "refill_hand")?;
        debug!(room_id = %room_id, seat = %seat, drawn = result.outcome, "Hand refilled");
        self.score_if_finished(room_id, result)
    }

    pub fn accept_extension(
        &self,
        room_id: &RoomId,
        seat: Seat,
    ) -> Result<RoomMutationResult<()>, AppError> {
        debug!(room_id = %room_id, seat = %seat, "Accepting extension");
        let _ticket = self.guard.acquire(room_id, seat)?;

        let result = self.run_mutation(room_id, "accept_extension", |room| {
            extension::accept_extension(room, seat)
        });
        log_rejected(result, room_id, seat, "accept_extension")
    }

    /// Stop at 700. Ends the hand and scores it.
    pub fn decline_extension(
        &self,
        room_id: &RoomId,
        seat: Seat,
    ) -> Result<RoomMutationResult<()>, AppError> {
        debug!(room_id = %room_id, seat = %seat, "Declining extension");
        let _ticket = self.guard.acquire(room_id, seat)?;

        let result = self.run_mutation(room_id, "decline_extension", |room| {
            extension::decline_extension(room, seat)
        });
        let result = log_rejected(result, room_id, seat, "decline_extension")?;
        self.score_if_finished(room_id, result)
    }

    /// Score the hand if `result` left it finished, folding the scoring
    /// transitions and the scored room into the returned result.
    fn score_if_finished<T>(
        &self,
        room_id: &RoomId,
        mut result: RoomMutationResult<T>,
    ) -> Result<RoomMutationResult<T>, AppError> {
        if result.room.status != RoomStatus::Finished {
            return Ok(result);
        }
        let scored = self.score_hand(room_id)?;
        result.transitions.extend(scored.transitions);
        result.room = scored.room;
        Ok(result)
    }
}

use std::thread;

use time::OffsetDateTime;
use tracing::{debug, info};

use super::{RoomFlowService, RoomMutationResult};
use crate::domain::dealing::{build_deck, build_deck_seeded, deal_into_room};
use crate::domain::lifecycle;
use crate::domain::scoring::{compute_hand_score, ScoringResult};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{RoomState, RoomStatus, Seat};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::rooms::{self, RoomId, RoomStore};

impl<S: RoomStore> RoomFlowService<S> {
    /// Create an empty room under a fresh id.
    pub fn create_room(&self, rng_seed: Option<u64>) -> Result<RoomId, AppError> {
        let room_id = RoomId::generate();
        self.create_room_with_id(&room_id, rng_seed)?;
        Ok(room_id)
    }

    /// Create an empty room under a caller-chosen id.
    pub fn create_room_with_id(
        &self,
        room_id: &RoomId,
        rng_seed: Option<u64>,
    ) -> Result<RoomState, AppError> {
        let room = RoomState::new(
            OffsetDateTime::now_utc(),
            self.config.flow.room_ttl_time(),
            rng_seed,
        );
        rooms::create_room(&*self.store, room_id, &room)?;
        info!(room_id = %room_id, seeded = rng_seed.is_some(), "Room created");
        Ok(room)
    }

    /// Seat a player, waiting a bounded number of times for the room document
    /// to appear. Once both seats are filled the first hand is dealt.
    pub fn join_room(
        &self,
        room_id: &RoomId,
        player_id: &str,
        name: &str,
    ) -> Result<Seat, AppError> {
        let attempts = self.config.flow.seat_retry_attempts.max(1);
        for attempt in 1..=attempts {
            if rooms::find_by_id(&*self.store, room_id)?.is_some() {
                let result = self.run_mutation(room_id, "join_room", |room| {
                    lifecycle::register_player(room, player_id, name)
                })?;
                let seat = result.outcome;
                info!(room_id = %room_id, player_id, seat = %seat, "Player seated");
                if result.room.both_seated() {
                    self.reconcile(room_id)?;
                }
                return Ok(seat);
            }
            if attempt < attempts {
                debug!(room_id = %room_id, attempt, "Room not visible yet; retrying");
                thread::sleep(self.config.flow.seat_retry_delay);
            }
        }
        Err(DomainError::not_found(
            NotFoundKind::Room,
            format!("Room {room_id} not found after {attempts} attempts"),
        )
        .into())
    }

    /// Deal a new hand into a waiting room with both seats filled.
    ///
    /// Seeded rooms derive a per-hand seed so the same room replays the same
    /// deals.
    pub fn start_hand(&self, room_id: &RoomId) -> Result<RoomMutationResult<()>, AppError> {
        let variant = self.config.rules.deck;
        self.run_mutation(room_id, "start_hand", |room| {
            let deck = match room.rng_seed {
                Some(seed) => build_deck_seeded(variant, derive_dealing_seed(seed, room.hand_no)),
                None => build_deck(variant, &mut rand::rng()),
            };
            deal_into_room(room, deck)
        })
    }

    /// Commit the scores of a finished hand. Safe to repeat.
    pub fn score_hand(
        &self,
        room_id: &RoomId,
    ) -> Result<RoomMutationResult<ScoringResult>, AppError> {
        let table = self.config.rules.scoring;
        let target = self.config.rules.match_target;
        let result = self.run_mutation(room_id, "score_hand", |room| {
            compute_hand_score(room, &table, target)
        })?;

        let scoring = &result.outcome;
        if scoring.newly_recorded {
            info!(
                room_id = %room_id,
                hand_no = result.room.hand_no,
                seat1_hand = scoring.cards[0].total,
                seat2_hand = scoring.cards[1].total,
                match_over = scoring.match_over,
                "Hand scored"
            );
        }
        Ok(result)
    }

    /// Move on to the next hand of the match and deal it.
    pub fn next_hand(&self, room_id: &RoomId) -> Result<RoomMutationResult<()>, AppError> {
        let mut result = self.run_mutation(room_id, "next_hand", |room| {
            if room.status != RoomStatus::Finished || !hand_scored(room) {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "The current hand has not been scored yet",
                ));
            }
            if room.match_winner.is_some() {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    "The match is over; reset it to play again",
                ));
            }
            lifecycle::reset_hand(room);
            Ok(())
        })?;
        self.fold_reconcile(room_id, &mut result)?;
        Ok(result)
    }

    /// Start a new match between the same players and deal its first hand.
    pub fn reset_match(&self, room_id: &RoomId) -> Result<RoomMutationResult<()>, AppError> {
        let mut result = self.run_mutation(room_id, "reset_match", |room| {
            lifecycle::reset_match(room);
            Ok(())
        })?;
        info!(room_id = %room_id, "Match reset");
        self.fold_reconcile(room_id, &mut result)?;
        Ok(result)
    }

    pub fn mark_score_seen(
        &self,
        room_id: &RoomId,
        seat: Seat,
    ) -> Result<RoomMutationResult<()>, AppError> {
        self.run_mutation(room_id, "mark_score_seen", |room| {
            lifecycle::mark_score_seen(room, seat)
        })
    }

    fn fold_reconcile<T>(
        &self,
        room_id: &RoomId,
        result: &mut RoomMutationResult<T>,
    ) -> Result<(), AppError> {
        let transitions = self.reconcile(room_id)?;
        if !transitions.is_empty() {
            result.transitions.extend(transitions);
            result.room = rooms::require_room(&*self.store, room_id)?;
        }
        Ok(())
    }
}

pub(super) fn hand_scored(room: &RoomState) -> bool {
    Seat::ALL
        .into_iter()
        .all(|s| room.seat(s).is_some_and(|p| p.score_recorded))
}

use time::OffsetDateTime;
use tracing::{info, warn};

use super::RoomFlowService;
use crate::domain::game_transition::{derive_room_transitions, RoomTransition};
use crate::domain::state::RoomState;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::rooms::{self, FieldPatch, RoomId, RoomStore};

#[derive(Debug, Clone)]
pub struct RoomMutationResult<T> {
    /// Room as written back to the store.
    pub room: RoomState,
    pub outcome: T,
    pub transitions: Vec<RoomTransition>,
    /// Fields sent to the store; empty when nothing changed.
    pub patch: FieldPatch,
}

impl<T> RoomMutationResult<T> {
    pub fn changed(&self) -> bool {
        !self.patch.is_empty()
    }
}

impl<S: RoomStore> RoomFlowService<S> {
    /// Read-validate-update against the latest stored room.
    ///
    /// `op` runs on a copy of the freshly read room. On `Err` nothing is
    /// written. On success only changed fields are sent, stamped with a new
    /// `updated_at`, and the resulting transitions are logged.
    pub(super) fn run_mutation<T, F>(
        &self,
        room_id: &RoomId,
        ctx: &'static str,
        op: F,
    ) -> Result<RoomMutationResult<T>, AppError>
    where
        F: FnOnce(&mut RoomState) -> Result<T, DomainError>,
    {
        let stored = rooms::require_room(&*self.store, room_id)?;

        let mut after = stored.clone();
        if after.normalize_turn() {
            warn!(
                room_id = %room_id,
                op = ctx,
                repaired_turn = ?after.turn,
                "Turn marker did not name a seat; repaired"
            );
        }

        let outcome = op(&mut after)?;

        let patch = if after != stored {
            after.updated_at = OffsetDateTime::now_utc();
            rooms::save_changes(&*self.store, room_id, &stored, &after)?
        } else {
            FieldPatch::new()
        };

        let transitions = derive_room_transitions(&stored, &after);
        for transition in &transitions {
            info!(room_id = %room_id, op = ctx, ?transition, "Room transition");
        }

        Ok(RoomMutationResult {
            room: after,
            outcome,
            transitions,
            patch,
        })
    }
}

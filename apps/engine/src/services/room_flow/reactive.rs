//! Reactive layer: bring a room forward after any change.
//!
//! A room whose seats are both filled but which has no draw pile gets dealt;
//! a finished hand that is not yet scored gets scored. Both steps are no-ops
//! when there is nothing to do, so a change notification caused by our own
//! write settles after one extra pass.

use std::sync::{Arc, Weak};

use tracing::{debug, warn};

use super::round_lifecycle::hand_scored;
use super::RoomFlowService;
use crate::domain::game_transition::RoomTransition;
use crate::domain::state::RoomStatus;
use crate::error::AppError;
use crate::repos::rooms::{self, Document, RoomId, RoomStore, Subscription};

impl<S: RoomStore> RoomFlowService<S> {
    /// One pass of the reactive loop against the latest stored room.
    pub fn reconcile(&self, room_id: &RoomId) -> Result<Vec<RoomTransition>, AppError> {
        let room = rooms::require_room(&*self.store, room_id)?;

        if room.status == RoomStatus::Waiting && room.both_seated() && room.draw_pile.is_none() {
            debug!(room_id = %room_id, hand_no = room.hand_no, "Dealing missing hand");
            return Ok(self.start_hand(room_id)?.transitions);
        }
        if room.status == RoomStatus::Finished && !hand_scored(&room) {
            debug!(room_id = %room_id, hand_no = room.hand_no, "Scoring finished hand");
            return Ok(self.score_hand(room_id)?.transitions);
        }
        Ok(Vec::new())
    }
}

impl<S: RoomStore + 'static> RoomFlowService<S> {
    /// Subscribe to the room and reconcile on every change.
    ///
    /// The subscription holds only a weak reference to the service; dropping
    /// the returned handle stops watching.
    pub fn watch(self: &Arc<Self>, room_id: &RoomId) -> Result<Subscription, AppError> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let watched = room_id.clone();
        let subscription = self.store.subscribe(
            room_id,
            Arc::new(move |_doc: &Document| {
                let Some(service) = weak.upgrade() else {
                    return;
                };
                if let Err(err) = service.reconcile(&watched) {
                    warn!(room_id = %watched, code = err.code(), detail = err.detail(), "Reconcile failed");
                }
            }),
        )?;
        self.reconcile(room_id)?;
        Ok(subscription)
    }
}

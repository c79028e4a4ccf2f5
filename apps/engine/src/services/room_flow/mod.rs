//! Room flow orchestration service - bridges pure domain rules with the room
//! store.
//!
//! Every mutating operation re-reads the room, applies a domain operation to a
//! copy and writes back only the fields that changed.

mod guard;
mod mutation;
mod player_actions;
mod reactive;
mod round_lifecycle;

use std::sync::Arc;

pub use guard::{MoveGuard, MoveTicket};
pub use mutation::RoomMutationResult;

use crate::config::EngineConfig;
use crate::repos::rooms::RoomStore;

/// Room flow service - generic over the room store.
pub struct RoomFlowService<S: RoomStore> {
    store: Arc<S>,
    config: EngineConfig,
    guard: MoveGuard,
}

impl<S: RoomStore> RoomFlowService<S> {
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        let guard = MoveGuard::new(config.flow.move_cooldown);
        Self {
            store,
            config,
            guard,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

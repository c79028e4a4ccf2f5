use crate::domain::state::{HandEnd, RoomState, RoomStatus, Seat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomTransition {
    /// Edge-triggered: the turn became a specific seat.
    TurnBecame { seat: Seat },

    /// Edge-triggered: cards dealt, room moved Waiting -> Started.
    HandStarted { hand_no: u32 },

    /// Edge-triggered: a seat landed on 700 and must decide.
    ExtensionRequested { seat: Seat },

    /// Edge-triggered: a seat chose to race on to 1000.
    ExtensionAccepted { seat: Seat },

    /// Edge-triggered: room moved to Finished.
    HandFinished { reason: Option<HandEnd> },

    /// Edge-triggered: both seats' scores were committed.
    HandScored { hand_no: u32 },

    /// Edge-triggered: a match winner was settled.
    MatchFinished { winner: Seat },
}

fn scored(room: &RoomState) -> bool {
    Seat::ALL
        .into_iter()
        .all(|s| room.seat(s).is_some_and(|p| p.score_recorded))
}

/// Derive room transitions from before/after snapshots.
pub fn derive_room_transitions(before: &RoomState, after: &RoomState) -> Vec<RoomTransition> {
    let mut transitions = Vec::new();

    if let Some(seat) = after.turn {
        if before.turn != Some(seat) {
            transitions.push(RoomTransition::TurnBecame { seat });
        }
    }

    if after.status == RoomStatus::Started && before.status == RoomStatus::Waiting {
        transitions.push(RoomTransition::HandStarted {
            hand_no: after.hand_no,
        });
    }

    for seat in Seat::ALL {
        let (Some(b), Some(a)) = (before.seat(seat), after.seat(seat)) else {
            continue;
        };
        if a.extension_pending && !b.extension_pending {
            transitions.push(RoomTransition::ExtensionRequested { seat });
        }
        if a.extension_accepted && !b.extension_accepted {
            transitions.push(RoomTransition::ExtensionAccepted { seat });
        }
    }

    if before.status != RoomStatus::Finished && after.status == RoomStatus::Finished {
        transitions.push(RoomTransition::HandFinished {
            reason: after.hand_end,
        });
    }

    if scored(after) && !scored(before) {
        transitions.push(RoomTransition::HandScored {
            hand_no: after.hand_no,
        });
    }

    if let (None, Some(winner)) = (before.match_winner, after.match_winner) {
        transitions.push(RoomTransition::MatchFinished { winner });
    }

    transitions
}

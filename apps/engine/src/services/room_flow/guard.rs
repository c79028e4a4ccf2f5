//! Reentrancy guard: one move in flight per (room, seat).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::warn;

use crate::domain::state::Seat;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::rooms::RoomId;

type GuardKey = (RoomId, Seat);

/// Tracks moves in flight. A guard older than the cooldown is treated as
/// abandoned and may be taken over.
pub struct MoveGuard {
    in_flight: DashMap<GuardKey, (Instant, u64)>,
    cooldown: Duration,
    next_ticket: AtomicU64,
}

impl MoveGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            in_flight: DashMap::new(),
            cooldown,
            next_ticket: AtomicU64::new(0),
        }
    }

    pub fn acquire(&self, room_id: &RoomId, seat: Seat) -> Result<MoveTicket<'_>, DomainError> {
        let key = (room_id.clone(), seat);
        let now = Instant::now();
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(mut held) => {
                let age = now.saturating_duration_since(held.get().0);
                if age < self.cooldown {
                    return Err(DomainError::conflict(
                        ConflictKind::MoveInFlight,
                        format!("A move for {seat} in room {room_id} is already in flight"),
                    ));
                }
                warn!(room_id = %room_id, seat = %seat, age_ms = age.as_millis() as u64, "Taking over stale move guard");
                held.insert((now, ticket));
            }
            Entry::Vacant(slot) => {
                slot.insert((now, ticket));
            }
        }
        Ok(MoveTicket {
            guard: self,
            key,
            ticket,
        })
    }

    pub fn in_flight(&self, room_id: &RoomId, seat: Seat) -> bool {
        self.in_flight.contains_key(&(room_id.clone(), seat))
    }
}

/// Held while a move runs; releases the guard on drop.
pub struct MoveTicket<'a> {
    guard: &'a MoveGuard,
    key: GuardKey,
    ticket: u64,
}

impl Drop for MoveTicket<'_> {
    fn drop(&mut self) {
        // A newer holder that took over a stale guard keeps it.
        self.guard
            .in_flight
            .remove_if(&self.key, |_, (_, held)| *held == self.ticket);
    }
}

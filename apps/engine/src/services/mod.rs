//! Services: orchestration over the room store and the pure domain.

pub mod room_flow;

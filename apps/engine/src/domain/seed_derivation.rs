//! RNG seed derivation for reproducible hands.
//!
//! A room may carry a base seed; every hand derives its own shuffle seed from
//! it so replaying a room deals the same cards hand by hand.

/// Derive the shuffle seed for one hand of a room.
///
/// Same room seed + hand number = same seed; different hands never share one.
pub fn derive_dealing_seed(room_seed: u64, hand_no: u32) -> u64 {
    room_seed
        .wrapping_add(u64::from(hand_no).wrapping_mul(1_000_003))
        .wrapping_add(2)
}

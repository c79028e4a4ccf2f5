/// Cards held after every deal and refill.
pub const HAND_SIZE: usize = 7;

/// Distance a hand ends at unless someone accepts the extension.
pub const BASE_CAP: u16 = 700;
/// Distance cap once either seat accepts the extension.
pub const EXTENDED_CAP: u16 = 1000;

/// Largest distance card playable under the speed limit.
pub const SPEED_LIMIT_KM: u16 = 50;

/// Match total that ends the match (ties keep playing).
pub const MATCH_TARGET: u32 = 5000;

/// Effective hand cap given whether any seat accepted the extension.
pub fn effective_cap(extension_accepted_anywhere: bool) -> u16 {
    if extension_accepted_anywhere {
        EXTENDED_CAP
    } else {
        BASE_CAP
    }
}

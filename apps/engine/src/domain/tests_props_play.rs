//! Property tests for the play engine (pure domain, no store).
//!
//! Properties tested:
//! - Distance while stopped is always blocked and changes nothing
//! - Landing on 700 with no extension holds the turn for the decision
//! - Passing 700 without extension, or 1000 ever, is always blocked
//! - Attacking a protected opponent is always blocked and changes nothing
//! - A second copy of an in-play safety is always blocked

use proptest::prelude::*;

use crate::domain::cards_logic::protecting_safety;
use crate::domain::play::{attempt_play, PlayOutcome};
use crate::domain::state::{RoadStatus, Seat};
use crate::domain::test_state_helpers::{give, player, player_mut, playing_room};
use crate::domain::{test_gens, test_prelude, Card, Distance};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_distance_while_stopped_is_blocked(
        hazard in test_gens::stopping_hazard(),
        d in test_gens::distance(),
        start in test_gens::distance_below(700),
    ) {
        let mut room = playing_room();
        let me = player_mut(&mut room, Seat::Seat1);
        me.status = RoadStatus::Stopped(hazard);
        me.distance = start;
        give(&mut room, Seat::Seat1, &[Card::from(d)]);
        let before = room.clone();

        let out = attempt_play(&mut room, Seat::Seat1, Card::from(d)).unwrap();

        prop_assert!(out.is_blocked());
        prop_assert_eq!(room, before);
    }

    #[test]
    fn prop_exact_700_holds_the_turn(d in test_gens::distance()) {
        let mut room = playing_room();
        player_mut(&mut room, Seat::Seat1).distance = 700 - d.km();
        give(&mut room, Seat::Seat1, &[Card::from(d)]);

        let out = attempt_play(&mut room, Seat::Seat1, Card::from(d)).unwrap();

        prop_assert_eq!(out, PlayOutcome::ExtensionPending);
        prop_assert_eq!(player(&room, Seat::Seat1).distance, 700);
        prop_assert_eq!(room.turn, Some(Seat::Seat1));
    }

    #[test]
    fn prop_overshooting_a_cap_is_blocked(
        (d, steps) in test_gens::distance().prop_flat_map(|d| (Just(d), 1u16..=d.km() / 25)),
        extension in any::<bool>(),
    ) {
        let cap: u16 = if extension { 1000 } else { 700 };
        // Start at or below the cap so that the card lands `steps * 25` km past it.
        let start = cap + steps * 25 - d.km();

        let mut room = playing_room();
        let me = player_mut(&mut room, Seat::Seat1);
        me.distance = start;
        me.extension_accepted = extension;
        give(&mut room, Seat::Seat1, &[Card::from(d)]);
        let before = room.clone();

        let out = attempt_play(&mut room, Seat::Seat1, Card::from(d)).unwrap();

        prop_assert!(out.is_blocked());
        prop_assert_eq!(room, before);
    }

    #[test]
    fn prop_protected_opponent_is_never_hit(hazard in test_gens::hazard()) {
        let mut room = playing_room();
        player_mut(&mut room, Seat::Seat2).safeties.push(protecting_safety(hazard));
        give(&mut room, Seat::Seat1, &[Card::from(hazard)]);
        let before = room.clone();

        let out = attempt_play(&mut room, Seat::Seat1, Card::from(hazard)).unwrap();

        let expected = format!(
            "opponent is protected by safety '{}'",
            protecting_safety(hazard).label()
        );
        prop_assert_eq!(out, PlayOutcome::Blocked(expected));
        prop_assert_eq!(room, before);
    }

    #[test]
    fn prop_second_copy_of_a_safety_is_blocked(safety in test_gens::safety()) {
        let mut room = playing_room();
        give(&mut room, Seat::Seat1, &[Card::from(safety), Card::from(safety)]);

        let first = attempt_play(&mut room, Seat::Seat1, Card::from(safety)).unwrap();
        prop_assert_eq!(first, PlayOutcome::Applied);

        room.turn = Some(Seat::Seat1);
        let second = attempt_play(&mut room, Seat::Seat1, Card::from(safety)).unwrap();
        prop_assert!(second.is_blocked());
        prop_assert_eq!(player(&room, Seat::Seat1).safeties.len(), 1);
    }
}

#[test]
fn distances_summing_to_700_end_in_extension_pending() {
    let mut room = playing_room();
    let plays = [
        Distance::D200,
        Distance::D100,
        Distance::D100,
        Distance::D75,
        Distance::D75,
        Distance::D50,
        Distance::D50,
        Distance::D25,
        Distance::D25,
    ];
    let hand: Vec<Card> = plays.iter().map(|&d| Card::from(d)).collect();
    give(&mut room, Seat::Seat1, &hand);

    let mut last = PlayOutcome::Applied;
    for d in plays {
        room.turn = Some(Seat::Seat1);
        last = attempt_play(&mut room, Seat::Seat1, Card::from(d)).unwrap();
    }

    assert_eq!(last, PlayOutcome::ExtensionPending);
    assert_eq!(player(&room, Seat::Seat1).distance, 700);
    assert_eq!(room.turn, Some(Seat::Seat1));
}

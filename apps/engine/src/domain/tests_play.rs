use crate::domain::play::{attempt_play, PlayOutcome, REASON_DECISION_PENDING};
use crate::domain::state::{HandEnd, RoadStatus, RoomStatus, Seat};
use crate::domain::test_state_helpers::{give, player, player_mut, playing_room};
use crate::domain::{Card, Distance, Hazard, Remedy, Safety};
use crate::errors::domain::{DomainError, ValidationKind};

fn blocked(reason: &str) -> PlayOutcome {
    PlayOutcome::Blocked(reason.to_string())
}

#[test]
fn distance_needs_green_light() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).status = RoadStatus::Stopped(Hazard::RedLight);
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D100)]);
    let before = room.clone();

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D100)).unwrap();

    assert_eq!(out, blocked("you do not have a 'Green Light'"));
    assert_eq!(room, before);
}

#[test]
fn speed_limit_caps_distance_cards_at_50() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).speed_limit = true;
    give(
        &mut room,
        Seat::Seat1,
        &[Card::from(Distance::D75), Card::from(Distance::D50)],
    );

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D75)).unwrap();
    assert_eq!(out, blocked("the 50 km speed limit is active"));

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D50)).unwrap();
    assert_eq!(out, PlayOutcome::Applied);
    assert_eq!(player(&room, Seat::Seat1).distance, 50);
    assert_eq!(room.turn, Some(Seat::Seat2));
}

#[test]
fn speed_limit_is_reported_before_the_distance_cap() {
    let mut room = playing_room();
    let me = player_mut(&mut room, Seat::Seat1);
    me.speed_limit = true;
    me.distance = 650;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D100)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D100)).unwrap();
    assert_eq!(out, blocked("the 50 km speed limit is active"));
}

#[test]
fn exact_700_asks_for_the_extension_and_keeps_the_turn() {
    let mut room = playing_room();
    room.status = RoomStatus::Started;
    player_mut(&mut room, Seat::Seat1).distance = 600;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D100), Card::from(Hazard::Accident)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D100)).unwrap();

    assert_eq!(out, PlayOutcome::ExtensionPending);
    let me = player(&room, Seat::Seat1);
    assert_eq!(me.distance, 700);
    assert!(me.extension_pending);
    assert_eq!(me.hand, vec![Card::from(Hazard::Accident)]);
    assert_eq!(room.turn, Some(Seat::Seat1));
    assert_eq!(room.status, RoomStatus::Playing);
    assert_eq!(room.pending_extension_for(), Some(Seat::Seat1));
}

#[test]
fn pending_decision_blocks_every_play() {
    let mut room = playing_room();
    let me = player_mut(&mut room, Seat::Seat1);
    me.distance = 700;
    me.extension_pending = true;
    give(&mut room, Seat::Seat1, &[Card::from(Safety::ExtraTank)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Safety::ExtraTank)).unwrap();
    assert_eq!(out, blocked(REASON_DECISION_PENDING));
}

#[test]
fn passing_700_without_extension_is_blocked() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).distance = 650;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D100)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D100)).unwrap();
    assert_eq!(
        out,
        blocked("you need exactly 700 km to request the extension or end the hand")
    );
    assert_eq!(player(&room, Seat::Seat1).distance, 650);
}

#[test]
fn two_hundred_is_recorded_on_the_700_path() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).distance = 500;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D200)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D200)).unwrap();
    assert_eq!(out, PlayOutcome::ExtensionPending);
    assert!(player(&room, Seat::Seat1).used_200);
}

#[test]
fn reaching_1000_finishes_the_hand() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat2).extension_accepted = true;
    player_mut(&mut room, Seat::Seat1).distance = 900;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D100)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D100)).unwrap();

    assert_eq!(out, PlayOutcome::Applied);
    let me = player(&room, Seat::Seat1);
    assert_eq!(me.distance, 1000);
    assert!(me.winner && me.finalized);
    assert_eq!(room.status, RoomStatus::Finished);
    assert_eq!(room.hand_end, Some(HandEnd::TripCompleted));
    assert_eq!(room.turn, None);
}

#[test]
fn passing_1000_is_blocked_even_with_extension() {
    let mut room = playing_room();
    let me = player_mut(&mut room, Seat::Seat1);
    me.extension_accepted = true;
    me.distance = 950;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D75)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D75)).unwrap();
    assert_eq!(out, blocked("you need exactly 1000 km to end the hand"));
}

#[test]
fn protected_opponent_cannot_be_attacked() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat2).safeties.push(Safety::RightOfWay);
    give(&mut room, Seat::Seat1, &[Card::from(Hazard::RedLight)]);
    let before = room.clone();

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Hazard::RedLight)).unwrap();

    assert_eq!(out, blocked("opponent is protected by safety 'Right of Way'"));
    assert_eq!(room, before);
}

#[test]
fn hazard_stops_a_rolling_opponent() {
    let mut room = playing_room();
    give(&mut room, Seat::Seat1, &[Card::from(Hazard::FlatTire)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Hazard::FlatTire)).unwrap();

    assert_eq!(out, PlayOutcome::Applied);
    assert_eq!(
        player(&room, Seat::Seat2).status,
        RoadStatus::Stopped(Hazard::FlatTire)
    );
    assert_eq!(
        player(&room, Seat::Seat1).last_card_played.as_deref(),
        Some("Flat Tire")
    );
    assert_eq!(room.turn, Some(Seat::Seat2));
}

#[test]
fn stopped_opponent_cannot_be_stopped_again() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat2).status = RoadStatus::Stopped(Hazard::OutOfGas);
    give(&mut room, Seat::Seat1, &[Card::from(Hazard::Accident)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Hazard::Accident)).unwrap();
    assert_eq!(out, blocked("opponent does not have a 'Green Light'"));
}

#[test]
fn speed_limit_stacks_only_once() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat2).status = RoadStatus::Stopped(Hazard::RedLight);
    give(
        &mut room,
        Seat::Seat1,
        &[Card::from(Hazard::SpeedLimit), Card::from(Hazard::SpeedLimit)],
    );

    // The limit does not need the opponent to be rolling.
    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Hazard::SpeedLimit)).unwrap();
    assert_eq!(out, PlayOutcome::Applied);
    assert!(player(&room, Seat::Seat2).speed_limit);

    room.turn = Some(Seat::Seat1);
    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Hazard::SpeedLimit)).unwrap();
    assert_eq!(
        out,
        blocked("opponent already has the 50 km speed limit active")
    );
}

#[test]
fn remedy_must_match_the_active_hazard() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).status = RoadStatus::Stopped(Hazard::FlatTire);
    give(
        &mut room,
        Seat::Seat1,
        &[Card::from(Remedy::Gasoline), Card::from(Remedy::SpareTire)],
    );

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Remedy::Gasoline)).unwrap();
    assert_eq!(out, blocked("you have 'Flat Tire' and not 'Out of Gas'"));

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Remedy::SpareTire)).unwrap();
    assert_eq!(out, PlayOutcome::Applied);
    assert_eq!(player(&room, Seat::Seat1).status, RoadStatus::Rolling);
}

#[test]
fn green_light_on_a_rolling_car_is_blocked() {
    let mut room = playing_room();
    give(&mut room, Seat::Seat1, &[Card::from(Remedy::GreenLight)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Remedy::GreenLight)).unwrap();
    assert_eq!(out, blocked("you have 'Green Light' and not 'Red Light'"));
}

#[test]
fn end_of_limit_requires_the_limit() {
    let mut room = playing_room();
    give(&mut room, Seat::Seat1, &[Card::from(Remedy::EndOfLimit)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Remedy::EndOfLimit)).unwrap();
    assert_eq!(out, blocked("you do not have the 50 km speed limit active"));

    player_mut(&mut room, Seat::Seat1).speed_limit = true;
    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Remedy::EndOfLimit)).unwrap();
    assert_eq!(out, PlayOutcome::Applied);
    assert!(!player(&room, Seat::Seat1).speed_limit);
}

#[test]
fn same_safety_twice_is_blocked() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).safeties.push(Safety::DrivingAce);
    give(&mut room, Seat::Seat1, &[Card::from(Safety::DrivingAce)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Safety::DrivingAce)).unwrap();
    assert_eq!(out, blocked("you already have this safety in play"));
}

#[test]
fn safety_against_active_hazard_is_a_coup_fourre() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).status = RoadStatus::Stopped(Hazard::Accident);
    give(&mut room, Seat::Seat1, &[Card::from(Safety::DrivingAce)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Safety::DrivingAce)).unwrap();

    assert_eq!(out, PlayOutcome::Applied);
    let me = player(&room, Seat::Seat1);
    assert_eq!(me.status, RoadStatus::Rolling);
    assert_eq!(me.coup_fourre, 1);
    assert_eq!(me.safeties, vec![Safety::DrivingAce]);
}

#[test]
fn right_of_way_clears_red_light_and_limit_for_one_bonus() {
    let mut room = playing_room();
    let me = player_mut(&mut room, Seat::Seat1);
    me.status = RoadStatus::Stopped(Hazard::RedLight);
    me.speed_limit = true;
    give(&mut room, Seat::Seat1, &[Card::from(Safety::RightOfWay)]);

    attempt_play(&mut room, Seat::Seat1, Card::from(Safety::RightOfWay)).unwrap();

    let me = player(&room, Seat::Seat1);
    assert_eq!(me.status, RoadStatus::Rolling);
    assert!(!me.speed_limit);
    assert_eq!(me.coup_fourre, 1);
}

#[test]
fn preventive_safety_earns_no_bonus() {
    let mut room = playing_room();
    give(&mut room, Seat::Seat1, &[Card::from(Safety::PunctureProof)]);

    attempt_play(&mut room, Seat::Seat1, Card::from(Safety::PunctureProof)).unwrap();

    let me = player(&room, Seat::Seat1);
    assert_eq!(me.coup_fourre, 0);
    assert!(me.has_safety(Safety::PunctureProof));
}

#[test]
fn caller_errors_leave_the_room_untouched() {
    let mut room = playing_room();
    give(&mut room, Seat::Seat2, &[Card::from(Distance::D25)]);
    let before = room.clone();

    let err = attempt_play(&mut room, Seat::Seat2, Card::from(Distance::D25)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::OutOfTurn, _)
    ));

    let err = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D25)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::CardNotInHand, _)
    ));

    room.status = RoomStatus::Finished;
    let err = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D25)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
    room.status = before.status;
    assert_eq!(room, before);
}

#[test]
fn empty_handed_opponent_is_skipped_once_the_pile_is_gone() {
    let mut room = playing_room();
    room.draw_pile = Some(Vec::new());
    give(
        &mut room,
        Seat::Seat1,
        &[Card::from(Distance::D25), Card::from(Distance::D50)],
    );

    attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D25)).unwrap();
    assert_eq!(room.turn, Some(Seat::Seat1));

    give(&mut room, Seat::Seat2, &[Card::from(Distance::D25)]);
    attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D50)).unwrap();
    assert_eq!(room.turn, Some(Seat::Seat2));
}

#[test]
fn distance_that_would_overflow_is_blocked() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat1).distance = u16::MAX - 50;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D200)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D200)).unwrap();

    assert_eq!(out, blocked("you need exactly 1000 km to end the hand"));
    assert_eq!(player(&room, Seat::Seat1).distance, u16::MAX - 50);
}

#[test]
fn resolved_seat_is_not_prompted_again() {
    let mut room = playing_room();
    let me = player_mut(&mut room, Seat::Seat1);
    me.distance = 600;
    me.extension_resolved = true;
    give(&mut room, Seat::Seat1, &[Card::from(Distance::D100)]);

    let out = attempt_play(&mut room, Seat::Seat1, Card::from(Distance::D100)).unwrap();

    assert_eq!(out, PlayOutcome::Applied);
    let me = player(&room, Seat::Seat1);
    assert!(!me.extension_pending);
    assert_eq!(me.distance, 700);
    assert_eq!(room.turn, Some(Seat::Seat2));
}

use crate::domain::extension::{accept_extension, decline_extension, pending_extension_for};
use crate::domain::play::{attempt_play, PlayOutcome};
use crate::domain::scoring::{compute_hand_score, ScoringTable};
use crate::domain::state::{HandEnd, RoomStatus, Seat};
use crate::domain::rules::MATCH_TARGET;
use crate::domain::test_state_helpers::{give, player, player_mut, playing_room};
use crate::domain::{Card, Distance, RoomState};
use crate::errors::domain::{DomainError, ValidationKind};

fn reach_700(room: &mut RoomState, seat: Seat) {
    room.turn = Some(seat);
    player_mut(room, seat).distance = 650;
    give(room, seat, &[Card::from(Distance::D50)]);
    let out = attempt_play(room, seat, Card::from(Distance::D50)).unwrap();
    assert_eq!(out, PlayOutcome::ExtensionPending);
}

#[test]
fn accepting_lifts_the_cap_for_both_seats_and_passes_the_turn() {
    let mut room = playing_room();
    reach_700(&mut room, Seat::Seat1);
    assert_eq!(room.effective_cap(), 700);

    accept_extension(&mut room, Seat::Seat1).unwrap();

    let me = player(&room, Seat::Seat1);
    assert!(me.extension_accepted && me.extension_resolved);
    assert!(!me.extension_pending);
    assert_eq!(pending_extension_for(&room), None);
    assert_eq!(room.effective_cap(), 1000);
    assert_eq!(room.turn, Some(Seat::Seat2));

    // The opponent may now run past 700 too.
    player_mut(&mut room, Seat::Seat2).distance = 650;
    give(&mut room, Seat::Seat2, &[Card::from(Distance::D100)]);
    let out = attempt_play(&mut room, Seat::Seat2, Card::from(Distance::D100)).unwrap();
    assert_eq!(out, PlayOutcome::Applied);
    assert_eq!(player(&room, Seat::Seat2).distance, 750);
}

#[test]
fn deciding_without_a_pending_prompt_is_rejected() {
    let mut room = playing_room();
    let before = room.clone();

    for result in [
        accept_extension(&mut room, Seat::Seat1),
        decline_extension(&mut room, Seat::Seat2),
    ] {
        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationKind::NoDecisionPending, _))
        ));
    }
    assert_eq!(room, before);
}

#[test]
fn prompt_is_not_raised_again_after_accepting() {
    let mut room = playing_room();
    reach_700(&mut room, Seat::Seat1);
    accept_extension(&mut room, Seat::Seat1).unwrap();

    let err = accept_extension(&mut room, Seat::Seat1).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NoDecisionPending, _)
    ));
}

#[test]
fn declining_at_700_ends_the_hand_and_scores_once() {
    let mut room = playing_room();
    player_mut(&mut room, Seat::Seat2).distance = 300;
    player_mut(&mut room, Seat::Seat2).used_200 = true;
    reach_700(&mut room, Seat::Seat1);

    decline_extension(&mut room, Seat::Seat1).unwrap();

    assert_eq!(room.status, RoomStatus::Finished);
    assert_eq!(room.hand_end, Some(HandEnd::ExtensionDeclined));
    assert_eq!(room.turn, None);
    assert!(player(&room, Seat::Seat1).finalized);
    assert!(!player(&room, Seat::Seat2).finalized);

    let table = ScoringTable::STANDARD;
    let first = compute_hand_score(&mut room, &table, MATCH_TARGET).unwrap();
    let second = compute_hand_score(&mut room, &table, MATCH_TARGET).unwrap();
    assert!(first.newly_recorded);
    assert!(!second.newly_recorded);
    assert_eq!(first.cards, second.cards);

    let a = first.card(Seat::Seat1);
    assert_eq!(a.distance, 700);
    assert_eq!(a.trip_completed, 200);
    assert_eq!(a.no_200, 200);
    assert_eq!(a.total, 1100);

    let b = first.card(Seat::Seat2);
    assert_eq!(b.distance, 300);
    assert_eq!(b.trip_completed, 0);
    assert_eq!(b.total, 300);

    assert_eq!(player(&room, Seat::Seat1).score.match_total, 1100);
    assert_eq!(player(&room, Seat::Seat2).score.match_total, 300);
}

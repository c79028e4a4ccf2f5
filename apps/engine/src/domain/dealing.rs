//! Deck construction, shuffling and the initial deal.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::HAND_SIZE;
use crate::domain::state::{RoomState, RoomStatus, Seat};
use crate::domain::{Card, Distance, Hazard, Remedy, Safety};
use crate::errors::domain::{DomainError, ValidationKind};

/// Which composition table a hand is dealt from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckVariant {
    /// Classic 100-card deck.
    #[default]
    Full,
    /// Short 43-card deck, heavy on 100 km cards.
    Compact,
}

impl DeckVariant {
    /// (card, copies) pairs making up the deck, in canonical order.
    pub fn composition(self) -> Vec<(Card, usize)> {
        let (distance, hazard, remedy): ([usize; 5], [usize; 5], [usize; 5]) = match self {
            //                  25  50  75 100 200     FT OG AC SL RL    ST GA RE EL GL
            DeckVariant::Full => ([10, 10, 10, 12, 4], [3, 3, 3, 4, 5], [5, 5, 5, 5, 12]),
            DeckVariant::Compact => ([1, 1, 1, 13, 2], [2, 2, 2, 3, 4], [1, 1, 1, 1, 4]),
        };

        let mut table = Vec::with_capacity(19);
        table.extend(Distance::ALL.into_iter().map(Card::from).zip(distance));
        table.extend(Hazard::ALL.into_iter().map(Card::from).zip(hazard));
        table.extend(Remedy::ALL.into_iter().map(Card::from).zip(remedy));
        table.extend(Safety::ALL.into_iter().map(|s| (Card::from(s), 1)));
        table
    }

    pub fn size(self) -> usize {
        self.composition().iter().map(|(_, n)| n).sum()
    }
}

fn unshuffled(variant: DeckVariant) -> Vec<Card> {
    let table = variant.composition();
    let mut deck = Vec::with_capacity(table.iter().map(|(_, n)| n).sum());
    for (card, copies) in table {
        deck.extend(std::iter::repeat_n(card, copies));
    }
    deck
}

/// Build a deck from the composition table and shuffle it uniformly.
pub fn build_deck<R>(variant: DeckVariant, rng: &mut R) -> Vec<Card>
where
    R: Rng + ?Sized,
{
    let mut deck = unshuffled(variant);
    deck.shuffle(rng);
    deck
}

/// Same as [`build_deck`] but reproducible for a given seed.
pub fn build_deck_seeded(variant: DeckVariant, seed: u64) -> Vec<Card> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    build_deck(variant, &mut rng)
}

/// Split a deck into (remaining, hand1, hand2).
///
/// The first seven cards go to seat1, the next seven to seat2. The rest is the
/// draw pile, top first.
pub fn deal(mut deck: Vec<Card>) -> Result<(Vec<Card>, Vec<Card>, Vec<Card>), DomainError> {
    let needed = HAND_SIZE * 2;
    if deck.len() < needed {
        return Err(DomainError::validation(
            ValidationKind::InsufficientDeck,
            format!("Deck holds {} cards, need at least {needed}", deck.len()),
        ));
    }
    let remaining = deck.split_off(needed);
    let hand2 = deck.split_off(HAND_SIZE);
    Ok((remaining, deck, hand2))
}

/// Deal `deck` into a room whose seats are both registered.
///
/// Installs both hands and the draw pile, gives seat1 the opening move and
/// marks the hand started.
pub fn deal_into_room(room: &mut RoomState, deck: Vec<Card>) -> Result<(), DomainError> {
    if !room.both_seated() {
        return Err(DomainError::validation(
            ValidationKind::SeatNotRegistered,
            "Both seats must be registered before dealing",
        ));
    }
    if room.status != RoomStatus::Waiting {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Cannot deal while room is {:?}", room.status),
        ));
    }

    let (remaining, hand1, hand2) = deal(deck)?;
    let (p1, p2) = room.pair_mut(Seat::Seat1)?;
    p1.hand = hand1;
    p2.hand = hand2;
    room.draw_pile = Some(remaining);
    room.turn = Some(Seat::Seat1);
    room.hand_end = None;
    room.status = RoomStatus::Started;
    Ok(())
}

use crate::model::card::Card;
use crate::model::suit::Suit;

pub const HAND_SIZE: usize = 13;

/// A seat's cards for one round.
///
/// Slots are addressed by index. Playing a card empties its slot; slots are
/// never refilled or compacted, so an index stays valid for the whole round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    slots: [Option<Card>; HAND_SIZE],
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hand sorted by suit then rank. Fewer than thirteen cards
    /// leaves the trailing slots empty.
    pub fn with_cards(mut cards: Vec<Card>) -> Self {
        assert!(
            cards.len() <= HAND_SIZE,
            "a hand holds at most {HAND_SIZE} cards, got {}",
            cards.len()
        );
        cards.sort_by_key(|card| card.sort_key());
        let mut hand = Self::new();
        for (slot, card) in hand.slots.iter_mut().zip(cards) {
            *slot = Some(card);
        }
        hand
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.slots.get(index).copied().flatten()
    }

    /// Moves the card out of its slot, leaving the slot empty.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.index_of(card).is_some()
    }

    pub fn index_of(&self, card: Card) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(card))
    }

    /// Number of cards still held.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Occupied slots with their stable indices, in slot order.
    pub fn slots(&self) -> impl DoubleEndedIterator<Item = (usize, Card)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|card| (index, card)))
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.iter().any(|card| card.suit == suit)
    }

    pub fn only_point_cards(&self) -> bool {
        self.iter().all(Card::carries_points)
    }

    pub fn only_hearts(&self) -> bool {
        self.iter().all(|card| card.suit.is_heart())
    }
}

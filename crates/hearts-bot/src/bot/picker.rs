use super::lead_order_key;
use hearts_core::model::card::Card;
use hearts_core::model::hand::Hand;
use hearts_core::model::rank::Rank;
use hearts_core::model::suit::Suit;

/// Selection queries over one hand, filtered by a legality predicate.
///
/// Every query returns a slot index into the hand, or `None` when no card
/// qualifies. Queries never mutate the hand.
pub struct CardPicker<'a, F> {
    hand: &'a Hand,
    legal: F,
}

impl<'a, F> CardPicker<'a, F>
where
    F: Fn(Card) -> bool,
{
    pub fn new(hand: &'a Hand, legal: F) -> Self {
        Self { hand, legal }
    }

    fn legal_slots(&self) -> impl Iterator<Item = (usize, Card)> + '_ {
        self.hand.slots().filter(|(_, card)| (self.legal)(*card))
    }

    /// Slot holding exactly this card. Legality is not consulted.
    pub fn exact(&self, suit: Suit, rank: Rank) -> Option<usize> {
        self.hand.index_of(Card::new(rank, suit))
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.hand.has_suit(suit)
    }

    /// Picks a card to lead. A preferred card wins, then a fallback card,
    /// then any legal card. The first preferred card in lead order is taken;
    /// for fallback and any-legal the cheapest (last) one is.
    pub fn lead<P, B>(&self, prefer: P, fallback: B) -> Option<usize>
    where
        P: Fn(Card) -> bool,
        B: Fn(Card) -> bool,
    {
        let mut ordered: Vec<(usize, Card)> = self.legal_slots().collect();
        ordered.sort_by_key(|(_, card)| lead_order_key(*card));

        if let Some((index, _)) = ordered.iter().find(|(_, card)| prefer(*card)) {
            return Some(*index);
        }
        if let Some((index, _)) = ordered.iter().rev().find(|(_, card)| fallback(*card)) {
            return Some(*index);
        }
        ordered.last().map(|(index, _)| *index)
    }

    /// Highest legal card of `reference`'s suit that ranks below it.
    pub fn lower_than(&self, reference: Card) -> Option<usize> {
        self.legal_slots()
            .filter(|(_, card)| card.suit == reference.suit && card.rank < reference.rank)
            .max_by_key(|(_, card)| card.rank)
            .map(|(index, _)| index)
    }

    /// Lowest legal card of `reference`'s suit that ranks above it.
    pub fn slightly_higher_than(&self, reference: Card) -> Option<usize> {
        self.legal_slots()
            .filter(|(_, card)| card.suit == reference.suit && card.rank > reference.rank)
            .min_by_key(|(_, card)| card.rank)
            .map(|(index, _)| index)
    }

    /// Highest-ranked legal card worth no points, optionally within `suit`.
    pub fn safe_high(&self, suit: Option<Suit>) -> Option<usize> {
        self.legal_slots()
            .filter(|(_, card)| !card.carries_points())
            .filter(|(_, card)| suit.is_none_or(|suit| card.suit == suit))
            .max_by_key(|(_, card)| card.rank)
            .map(|(index, _)| index)
    }

    /// Legal card worth the most points, ties broken by highest rank.
    pub fn max_points(&self) -> Option<usize> {
        self.legal_slots()
            .max_by_key(|(_, card)| (card.points(), card.rank))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::CardPicker;
    use hearts_core::model::card::Card;
    use hearts_core::model::hand::Hand;
    use hearts_core::model::rank::Rank;
    use hearts_core::model::suit::Suit;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn hand(cards: &[&str]) -> Hand {
        Hand::with_cards(cards.iter().map(|c| card(c)).collect())
    }

    fn picked(hand: &Hand, index: Option<usize>) -> Option<Card> {
        index.and_then(|index| hand.get(index))
    }

    #[test]
    fn exact_finds_card_regardless_of_legality() {
        let h = hand(&["2C", "QS", "5H"]);
        let picker = CardPicker::new(&h, |_| false);
        assert_eq!(picked(&h, picker.exact(Suit::Spades, Rank::Queen)), Some(card("QS")));
        assert_eq!(picker.exact(Suit::Spades, Rank::King), None);
        assert!(picker.has_suit(Suit::Hearts));
        assert!(!picker.has_suit(Suit::Diamonds));
    }

    #[test]
    fn lower_than_picks_closest_below() {
        let h = hand(&["3D", "7D", "9D", "KD", "5C"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(picked(&h, picker.lower_than(card("10D"))), Some(card("9D")));
        assert_eq!(picked(&h, picker.lower_than(card("3D"))), None);
        assert_eq!(picked(&h, picker.lower_than(card("AS"))), None);
    }

    #[test]
    fn slightly_higher_picks_closest_above() {
        let h = hand(&["3D", "7D", "9D", "KD"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(
            picked(&h, picker.slightly_higher_than(card("8D"))),
            Some(card("9D"))
        );
        assert_eq!(picked(&h, picker.slightly_higher_than(card("AD"))), None);
    }

    #[test]
    fn safe_high_skips_point_cards() {
        let h = hand(&["AS", "QS", "KH", "JD", "4S"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(
            picked(&h, picker.safe_high(Some(Suit::Spades))),
            Some(card("AS"))
        );
        assert_eq!(picked(&h, picker.safe_high(Some(Suit::Hearts))), None);
        assert_eq!(picked(&h, picker.safe_high(None)), Some(card("AS")));

        let only_points = hand(&["QS", "2H"]);
        let picker = CardPicker::new(&only_points, |_| true);
        assert_eq!(picker.safe_high(None), None);
    }

    #[test]
    fn max_points_prefers_queen_then_high_hearts() {
        let h = hand(&["QS", "AH", "3H", "AC"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(picked(&h, picker.max_points()), Some(card("QS")));

        let h = hand(&["3H", "AH", "AC"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(picked(&h, picker.max_points()), Some(card("AH")));

        let h = hand(&["4C", "9D"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(picked(&h, picker.max_points()), Some(card("9D")));
    }

    #[test]
    fn queries_respect_legality() {
        let h = hand(&["3D", "9D", "KS"]);
        let picker = CardPicker::new(&h, |c: Card| c.suit == Suit::Spades);
        assert_eq!(picker.lower_than(card("10D")), None);
        assert_eq!(picked(&h, picker.max_points()), Some(card("KS")));
        assert_eq!(picked(&h, picker.safe_high(None)), Some(card("KS")));
    }

    #[test]
    fn lead_ranks_preferred_then_fallback_then_any() {
        let h = hand(&["2D", "8D", "5C", "JS"]);
        let picker = CardPicker::new(&h, |_| true);

        let preferred = picker.lead(|c: Card| c.suit == Suit::Clubs, |_| true);
        assert_eq!(picked(&h, preferred), Some(card("5C")));

        let fallback = picker.lead(|_| false, |c: Card| c.suit == Suit::Diamonds);
        assert_eq!(picked(&h, fallback), Some(card("2D")));

        let any = picker.lead(|_| false, |_| false);
        assert_eq!(picked(&h, any), Some(card("2D")));
    }

    #[test]
    fn lead_prefers_point_cards_first_among_preferred() {
        let h = hand(&["4H", "KD"]);
        let picker = CardPicker::new(&h, |_| true);
        assert_eq!(picked(&h, picker.lead(|_| true, |_| false)), Some(card("4H")));
    }

    #[test]
    fn lead_without_legal_cards_is_none() {
        let h = hand(&["4H"]);
        let picker = CardPicker::new(&h, |_| false);
        assert_eq!(picker.lead(|_| true, |_| true), None);
        assert_eq!(picker.max_points(), None);
    }
}

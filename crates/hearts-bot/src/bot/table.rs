use hearts_core::model::card::Card;
use hearts_core::model::player::PlayerPosition;
use hearts_core::model::round::RoundState;

fn others_hold(
    round: &RoundState,
    seat: PlayerPosition,
    card: Card,
    beats: impl Fn(Card) -> bool,
) -> bool {
    PlayerPosition::LOOP
        .into_iter()
        .filter(|other| *other != seat)
        .flat_map(move |other| round.hand(other).iter())
        .any(|other_card| other_card.suit == card.suit && beats(other_card))
}

/// Whether another seat still holds a card of `card`'s suit ranked below it.
pub fn others_hold_lower(round: &RoundState, seat: PlayerPosition, card: Card) -> bool {
    others_hold(round, seat, card, |other| other.rank < card.rank)
}

/// Whether another seat still holds a card of `card`'s suit ranked above it.
pub fn others_hold_higher(round: &RoundState, seat: PlayerPosition, card: Card) -> bool {
    others_hold(round, seat, card, |other| other.rank > card.rank)
}

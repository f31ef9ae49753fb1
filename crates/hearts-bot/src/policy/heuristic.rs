use crate::bot::{CardPicker, others_hold_higher, others_hold_lower};
use hearts_core::game::{Policy, PolicyContext};
use hearts_core::model::card::Card;
use hearts_core::model::rank::Rank;
use hearts_core::model::suit::Suit;
use tracing::{Level, event};

/// A chosen slot plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub index: usize,
    pub card: Card,
    pub reason: &'static str,
}

/// The fixed rule-based strategy for automated seats.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Chooses a card for the seat in `ctx`. Returns `None` only when the
    /// seat has no legal card, which cannot happen on its turn.
    pub fn select_card(ctx: &PolicyContext<'_>) -> Option<Decision> {
        let round = ctx.round;
        let seat = ctx.seat;
        let hand = ctx.hand();
        let picker = CardPicker::new(hand, |card: Card| round.is_valid_play(seat, card));
        let decide = |index: Option<usize>, reason: &'static str| {
            index.and_then(|index| {
                hand.get(index).map(|card| Decision {
                    index,
                    card,
                    reason,
                })
            })
        };

        let trick = ctx.trick();
        let Some(highest) = trick.highest_of_lead() else {
            if round.is_first_trick() {
                if let Some(decision) =
                    decide(picker.exact(Suit::Clubs, Rank::Two), "open_two_of_clubs")
                {
                    return Some(decision);
                }
            }
            // Lead a card that is already the cheapest of its suit but not
            // the last one out; otherwise one somebody else can still duck.
            let lead = picker.lead(
                |card| {
                    !others_hold_lower(round, seat, card) && others_hold_higher(round, seat, card)
                },
                |card| others_hold_lower(round, seat, card),
            );
            return decide(lead, "lead");
        };
        let highest = highest.card;
        let first_trick = round.is_first_trick();
        let lead_suit = highest.suit;

        if highest.suit == Suit::Spades && highest.rank > Rank::Queen {
            if let Some(decision) = decide(picker.exact(Suit::Spades, Rank::Queen), "drop_queen") {
                return Some(decision);
            }
        }

        let is_trailing = trick.len() == 3;
        if !trick.has_points() && is_trailing {
            return decide(picker.safe_high(Some(lead_suit)), "last_safe_high")
                .or_else(|| {
                    first_trick
                        .then(|| decide(picker.safe_high(None), "last_safe_high_any"))
                        .flatten()
                })
                .or_else(|| decide(picker.max_points(), "last_unload"));
        }

        decide(picker.lower_than(highest), "duck")
            .or_else(|| {
                if is_trailing {
                    decide(picker.safe_high(Some(lead_suit)), "take_high")
                } else {
                    decide(picker.slightly_higher_than(highest), "overtake")
                }
            })
            .or_else(|| {
                first_trick
                    .then(|| decide(picker.safe_high(None), "safe_high_any"))
                    .flatten()
            })
            .or_else(|| decide(picker.max_points(), "unload"))
    }
}

impl Policy for HeuristicPolicy {
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> usize {
        let Some(decision) = Self::select_card(ctx) else {
            panic!("heuristic policy expected at least one legal card for {}", ctx.seat);
        };
        log_play_decision(ctx, &decision);
        decision.index
    }
}

fn log_play_decision(ctx: &PolicyContext<'_>, decision: &Decision) {
    if !tracing::enabled!(target: "hearts_bot::play", Level::DEBUG) {
        return;
    }

    let legal_count = ctx.round.legal_indices(ctx.seat).len();
    event!(
        target: "hearts_bot::play",
        Level::DEBUG,
        seat = %ctx.seat,
        chosen = %decision.card,
        reason = decision.reason,
        legal_count,
        hearts_broken = ctx.round.hearts_broken(),
        trick_cards = ctx.trick().len(),
        trick_number = ctx.round.trick_number(),
    );
}

#[cfg(test)]
mod tests {
    use super::HeuristicPolicy;
    use hearts_core::game::PolicyContext;
    use hearts_core::model::card::Card;
    use hearts_core::model::hand::Hand;
    use hearts_core::model::player::PlayerPosition;
    use hearts_core::model::round::RoundState;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn hand(cards: &[&str]) -> Hand {
        Hand::with_cards(cards.iter().map(|c| card(c)).collect())
    }

    /// Plays `cards` in turn from the leader onward.
    fn play_all(round: &mut RoundState, cards: &[&str]) {
        for text in cards {
            let seat = round.current_player().unwrap();
            let index = round.hand(seat).index_of(card(text)).unwrap();
            round.play_index(seat, index).unwrap();
        }
    }

    fn choose(round: &RoundState) -> (Card, &'static str) {
        let seat = round.current_player().unwrap();
        let decision = HeuristicPolicy::select_card(&PolicyContext::new(seat, round)).unwrap();
        assert!(round.is_valid_play(seat, decision.card));
        (decision.card, decision.reason)
    }

    #[test]
    fn opens_with_two_of_clubs() {
        let round = RoundState::from_hands(
            [hand(&["AS", "2C", "KD"]), hand(&[]), hand(&[]), hand(&[])],
            PlayerPosition::East,
        );
        assert_eq!(choose(&round), (card("2C"), "open_two_of_clubs"));
    }

    #[test]
    fn leads_lowest_outstanding_card_that_others_can_beat() {
        let round = RoundState::from_hands(
            [
                hand(&["3D", "9D", "KS", "5H"]),
                hand(&["7D", "2S", "6H"]),
                hand(&["JD", "AS"]),
                hand(&["4S"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(4, PlayerPosition::North);
        // 3D is the lowest diamond out and others hold higher diamonds.
        assert_eq!(choose(&round), (card("3D"), "lead"));
    }

    #[test]
    fn lead_never_breaks_hearts_early() {
        let round = RoundState::from_hands(
            [
                hand(&["2H", "AS"]),
                hand(&["KS", "3H"]),
                hand(&["QS"]),
                hand(&[]),
            ],
            PlayerPosition::North,
        )
        .with_progress(5, PlayerPosition::North);
        let (chosen, _) = choose(&round);
        assert_eq!(chosen, card("AS"));
    }

    #[test]
    fn drops_queen_under_king_of_spades() {
        let mut round = RoundState::from_hands(
            [
                hand(&["5S", "2D"]),
                hand(&["KS", "3D"]),
                hand(&["QS", "2S", "9S"]),
                hand(&["4D"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(3, PlayerPosition::North);
        play_all(&mut round, &["5S", "KS"]);
        assert_eq!(choose(&round), (card("QS"), "drop_queen"));
    }

    #[test]
    fn last_seat_dumps_high_card_on_a_clean_trick() {
        let mut round = RoundState::from_hands(
            [
                hand(&["4C", "2D"]),
                hand(&["6C", "3D"]),
                hand(&["9C", "4D"]),
                hand(&["3C", "AC", "QH"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(2, PlayerPosition::North);
        play_all(&mut round, &["4C", "6C", "9C"]);
        assert_eq!(choose(&round), (card("AC"), "last_safe_high"));
    }

    #[test]
    fn last_seat_void_unloads_worst_card_on_a_clean_trick() {
        let mut round = RoundState::from_hands(
            [
                hand(&["4C", "2D"]),
                hand(&["6C", "3D"]),
                hand(&["9C", "4D"]),
                hand(&["QS", "AH", "KD"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(2, PlayerPosition::North);
        play_all(&mut round, &["4C", "6C", "9C"]);
        assert_eq!(choose(&round), (card("QS"), "last_unload"));
    }

    #[test]
    fn first_trick_void_sheds_safe_high_card() {
        let mut round = RoundState::from_hands(
            [
                hand(&["2C", "3D"]),
                hand(&["QS", "KH", "JD", "8S"]),
                hand(&["5C"]),
                hand(&["9C"]),
            ],
            PlayerPosition::North,
        );
        play_all(&mut round, &["2C"]);
        assert_eq!(choose(&round), (card("JD"), "safe_high_any"));
    }

    #[test]
    fn last_seat_void_on_first_trick_sheds_safe_high_card() {
        let mut round = RoundState::from_hands(
            [
                hand(&["2C", "3D"]),
                hand(&["5C", "4D"]),
                hand(&["9C", "6D"]),
                hand(&["QS", "KH", "JD", "8S"]),
            ],
            PlayerPosition::North,
        );
        play_all(&mut round, &["2C", "5C", "9C"]);
        assert_eq!(choose(&round), (card("JD"), "last_safe_high_any"));
    }

    #[test]
    fn last_seat_holding_only_points_on_first_trick_sheds_top_heart() {
        let mut round = RoundState::from_hands(
            [
                hand(&["2C", "3D"]),
                hand(&["5C", "4D"]),
                hand(&["9C", "6D"]),
                hand(&["QS", "3H", "KH"]),
            ],
            PlayerPosition::North,
        );
        play_all(&mut round, &["2C", "5C", "9C"]);
        assert_eq!(choose(&round), (card("KH"), "last_unload"));
    }

    #[test]
    fn ducks_under_the_current_winner() {
        let mut round = RoundState::from_hands(
            [
                hand(&["10H", "2C"]),
                hand(&["3H", "8H", "AH", "4S"]),
                hand(&["2H"]),
                hand(&["5H"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(6, PlayerPosition::North)
        .with_taken(PlayerPosition::South, &[card("9H")]);
        play_all(&mut round, &["10H"]);
        assert_eq!(choose(&round), (card("8H"), "duck"));
    }

    #[test]
    fn overtakes_cheaply_when_unable_to_duck() {
        let mut round = RoundState::from_hands(
            [
                hand(&["4D", "2C"]),
                hand(&["9D", "JD", "KD"]),
                hand(&["5D"]),
                hand(&["6D"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(6, PlayerPosition::North);
        play_all(&mut round, &["4D"]);
        assert_eq!(choose(&round), (card("9D"), "overtake"));
    }

    #[test]
    fn last_seat_takes_with_its_highest_safe_card_when_points_are_in() {
        let mut round = RoundState::from_hands(
            [
                hand(&["4D", "2C"]),
                hand(&["QH", "3C"]),
                hand(&["3D", "5C"]),
                hand(&["9D", "KD", "AS"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(6, PlayerPosition::North)
        .with_taken(PlayerPosition::East, &[card("2H")]);
        play_all(&mut round, &["4D", "QH", "3D"]);
        assert_eq!(choose(&round), (card("KD"), "take_high"));
    }

    #[test]
    fn void_seat_unloads_points_after_the_first_trick() {
        let mut round = RoundState::from_hands(
            [
                hand(&["4D", "2C"]),
                hand(&["QS", "AH", "KC"]),
                hand(&["3D"]),
                hand(&["5D"]),
            ],
            PlayerPosition::North,
        )
        .with_progress(6, PlayerPosition::North);
        play_all(&mut round, &["4D"]);
        assert_eq!(choose(&round), (card("QS"), "unload"));
    }
}

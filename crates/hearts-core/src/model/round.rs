use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::hand::Hand;
use crate::model::player::{Player, PlayerPosition, SeatConfig, TableConfig};
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use std::collections::HashSet;
use std::fmt;

pub const TRICKS_PER_ROUND: u8 = 13;

/// State of one dealt round: the four players, the trick in progress and
/// how many tricks have been resolved.
#[derive(Debug, Clone)]
pub struct RoundState {
    players: [Player; 4],
    trick: Trick,
    trick_number: u8,
    discards: Vec<Card>,
}

impl RoundState {
    pub fn deal(deck: &Deck, config: &TableConfig) -> Self {
        let mut dealt: [Vec<Card>; 4] = Default::default();
        for (index, card) in deck.cards().iter().enumerate() {
            dealt[index % 4].push(*card);
        }
        let hands = dealt.map(Hand::with_cards);
        let players = PlayerPosition::LOOP
            .map(|seat| Player::new(config.seat(seat), hands[seat.index()].clone()));
        Self::from_players(players)
    }

    /// Builds a position from arbitrary hands, all seats automated. The
    /// leader is whoever holds the Two of Clubs, else `fallback_leader`.
    pub fn from_hands(hands: [Hand; 4], fallback_leader: PlayerPosition) -> Self {
        let players = PlayerPosition::LOOP.map(|seat| {
            Player::new(
                &SeatConfig::automated(seat.to_string()),
                hands[seat.index()].clone(),
            )
        });
        let mut round = Self::from_players(players);
        if round.holder_of(Card::TWO_OF_CLUBS).is_none() {
            round.trick = Trick::new(fallback_leader);
        }
        round
    }

    fn from_players(players: [Player; 4]) -> Self {
        let leader = PlayerPosition::LOOP
            .into_iter()
            .find(|seat| players[seat.index()].hand.contains(Card::TWO_OF_CLUBS))
            .unwrap_or(PlayerPosition::North);
        Self {
            players,
            trick: Trick::new(leader),
            trick_number: 0,
            discards: Vec::new(),
        }
    }

    /// Starts the round at a later trick with the given seat on lead.
    /// Used to construct mid-round positions.
    pub fn with_progress(mut self, trick_number: u8, leader: PlayerPosition) -> Self {
        assert!(self.trick.is_empty(), "cannot rewind a trick in progress");
        self.trick_number = trick_number.min(TRICKS_PER_ROUND);
        self.trick = Trick::new(leader);
        self
    }

    /// Credits previously captured cards to a seat, for constructed positions.
    pub fn with_taken(mut self, seat: PlayerPosition, cards: &[Card]) -> Self {
        self.players[seat.index()].taken.extend_from_slice(cards);
        self
    }

    pub fn players(&self) -> &[Player; 4] {
        &self.players
    }

    pub fn player(&self, seat: PlayerPosition) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: PlayerPosition) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.players[seat.index()].hand
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    pub fn trick_number(&self) -> u8 {
        self.trick_number
    }

    pub fn leader(&self) -> PlayerPosition {
        self.trick.leader()
    }

    /// Zero-point cards from resolved tricks, in the order they were played.
    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_number == 0
    }

    pub fn is_over(&self) -> bool {
        self.trick_number >= TRICKS_PER_ROUND
    }

    /// Hearts are broken once any heart has been captured.
    pub fn hearts_broken(&self) -> bool {
        self.players
            .iter()
            .any(|player| player.taken.iter().any(|card| card.suit.is_heart()))
    }

    /// Seat due to play, or `None` when the trick awaits resolution or the
    /// round is over.
    pub fn current_player(&self) -> Option<PlayerPosition> {
        if self.is_over() {
            return None;
        }
        self.trick.expected_position()
    }

    pub fn holder_of(&self, card: Card) -> Option<PlayerPosition> {
        PlayerPosition::LOOP
            .into_iter()
            .find(|seat| self.hand(*seat).contains(card))
    }

    /// Checks whether `seat` may play `card` now. Pure: never mutates.
    pub fn check_play(&self, seat: PlayerPosition, card: Card) -> Result<(), PlayError> {
        let hand = self.hand(seat);

        if self.is_first_trick() && self.trick.is_empty() {
            return if card == Card::TWO_OF_CLUBS {
                Ok(())
            } else {
                Err(PlayError::MustLeadTwoOfClubs)
            };
        }

        if self.is_first_trick() && card.carries_points() {
            // A hand of nothing but point cards may shed hearts, never the queen.
            return if hand.only_point_cards() && card.suit.is_heart() {
                Ok(())
            } else {
                Err(PlayError::NoPointsOnFirstTrick)
            };
        }

        let Some(lead_suit) = self.trick.lead_suit() else {
            if card.suit.is_heart() && !self.hearts_broken() && !hand.only_hearts() {
                return Err(PlayError::HeartsNotBroken);
            }
            return Ok(());
        };

        if card.suit != lead_suit && hand.has_suit(lead_suit) {
            return Err(PlayError::MustFollowSuit(lead_suit));
        }
        Ok(())
    }

    pub fn is_valid_play(&self, seat: PlayerPosition, card: Card) -> bool {
        self.check_play(seat, card).is_ok()
    }

    /// Hand indices `seat` may legally play.
    pub fn legal_indices(&self, seat: PlayerPosition) -> Vec<usize> {
        self.hand(seat)
            .slots()
            .filter(|(_, card)| self.is_valid_play(seat, *card))
            .map(|(index, _)| index)
            .collect()
    }

    /// Moves the card at `index` from `seat`'s hand into the trick.
    pub fn play_index(&mut self, seat: PlayerPosition, index: usize) -> Result<PlayOutcome, PlayError> {
        if self.is_over() {
            return Err(PlayError::RoundOver);
        }
        let Some(expected) = self.trick.expected_position() else {
            return Err(PlayError::TrickPending);
        };
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        let card = self.hand(seat).get(index).ok_or(PlayError::EmptySlot(index))?;
        self.check_play(seat, card)?;

        self.trick.play(seat, card).map_err(PlayError::Trick)?;
        self.players[seat.index()].hand.take(index);

        if self.trick.is_complete() {
            Ok(PlayOutcome::TrickComplete)
        } else {
            Ok(PlayOutcome::Played)
        }
    }

    /// Resolves a four-card trick: point cards go to the taker, the rest to
    /// the discard history, and the taker leads next. Returns `None` if the
    /// trick is not complete.
    pub fn resolve_trick(&mut self) -> Option<TrickResult> {
        let taker = self.trick.winner()?;
        let finished = std::mem::replace(&mut self.trick, Trick::new(taker));
        let points = finished.points();

        for card in finished.cards() {
            if card.carries_points() {
                self.players[taker.index()].taken.push(card);
            } else {
                self.discards.push(card);
            }
        }
        self.trick_number += 1;

        if self.is_over() {
            for player in &mut self.players {
                player.taken.sort_by_key(|card| card.sort_key());
            }
        }

        Some(TrickResult {
            taker,
            points,
            trick: finished,
        })
    }

    /// Point totals captured so far, indexed by seat.
    pub fn points(&self) -> [u8; 4] {
        PlayerPosition::LOOP.map(|seat| self.player(seat).points())
    }

    /// True when hands, trick, taken piles and discards hold each of the 52
    /// cards exactly once.
    pub fn partitions_deck(&self) -> bool {
        let cards: Vec<Card> = self
            .players
            .iter()
            .flat_map(|player| player.hand.iter().chain(player.taken.iter().copied()))
            .chain(self.trick.cards())
            .chain(self.discards.iter().copied())
            .collect();
        let unique: HashSet<Card> = cards.iter().copied().collect();
        cards.len() == DECK_SIZE && unique.len() == DECK_SIZE
    }
}

#[derive(Debug, Clone)]
pub struct TrickResult {
    pub taker: PlayerPosition,
    pub points: u8,
    pub trick: Trick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    /// Fourth card is down; the trick resolves on the next step.
    TrickComplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    RoundOver,
    TrickPending,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    EmptySlot(usize),
    MustLeadTwoOfClubs,
    NoPointsOnFirstTrick,
    HeartsNotBroken,
    MustFollowSuit(Suit),
    Trick(TrickError),
}

impl PlayError {
    /// True for violations of the card-play rules, as opposed to sequencing
    /// mistakes such as playing out of turn.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            PlayError::MustLeadTwoOfClubs
                | PlayError::NoPointsOnFirstTrick
                | PlayError::HeartsNotBroken
                | PlayError::MustFollowSuit(_)
        )
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::RoundOver => write!(f, "the round is over"),
            PlayError::TrickPending => write!(f, "the trick has not been collected yet"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "it is {expected}'s turn, not {actual}'s")
            }
            PlayError::EmptySlot(index) => write!(f, "no card in hand slot {index}"),
            PlayError::MustLeadTwoOfClubs => write!(f, "the first card must be the two of clubs"),
            PlayError::NoPointsOnFirstTrick => {
                write!(f, "you can't play a card worth points in the first trick")
            }
            PlayError::HeartsNotBroken => write!(f, "hearts haven't been broken"),
            PlayError::MustFollowSuit(suit) => write!(f, "you must follow suit ({suit})"),
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}

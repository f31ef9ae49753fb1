use crate::game::policy::{Policy, PolicyContext};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::{Player, PlayerPosition, TableConfig};
use crate::model::round::{PlayError, PlayOutcome, RoundState};
use crate::model::score::ScoreBoard;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

/// Where the round stands, derived from the round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingLead,
    TrickInProgress,
    TrickResolving,
    RoundOver,
}

/// One-way notifications for whoever presents the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    AwaitingHumanMove(PlayerPosition),
    PlayerThinking(PlayerPosition),
    CardPlayed {
        seat: PlayerPosition,
        index: usize,
        card: Card,
    },
    TrickTaken {
        taker: PlayerPosition,
        points: u8,
        trick_number: u8,
    },
    RoundEnded {
        scores: [u8; 4],
        winners: Vec<PlayerPosition>,
    },
}

/// Turn-based driver for one table.
///
/// Each call to [`Game::advance`] performs at most one step, so a caller may
/// pause between calls (for animation, say) without affecting the outcome.
pub struct Game<P> {
    config: TableConfig,
    rng: StdRng,
    seed: u64,
    round_number: u32,
    round: RoundState,
    policy: P,
}

impl<P: Policy> Game<P> {
    pub fn new(config: TableConfig, policy: P) -> Self {
        Self::with_seed(config, policy, rand::random())
    }

    pub fn with_seed(config: TableConfig, policy: P, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let round = RoundState::deal(&Deck::shuffled(&mut rng), &config);
        let game = Self {
            config,
            rng,
            seed,
            round_number: 1,
            round,
            policy,
        };
        game.log_deal();
        game
    }

    /// Reshuffles, redeals all 52 cards and resets the round. The host seat
    /// takes `player_name`. Any round in progress is abandoned.
    pub fn deal(&mut self, player_name: impl Into<String>) {
        let host = self.config.host;
        self.config.seats[host.index()].name = player_name.into();
        let deck = Deck::shuffled(&mut self.rng);
        self.round = RoundState::deal(&deck, &self.config);
        self.round_number += 1;
        self.log_deal();
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn player(&self, seat: PlayerPosition) -> &Player {
        self.round.player(seat)
    }

    pub fn phase(&self) -> Phase {
        if self.round.is_over() {
            Phase::RoundOver
        } else if self.round.trick().is_complete() {
            Phase::TrickResolving
        } else if self.round.trick().is_empty() {
            Phase::AwaitingLead
        } else {
            Phase::TrickInProgress
        }
    }

    /// Seat whose turn it is: the leader advanced by the cards already in
    /// the trick. `None` while a trick awaits resolution or after the round.
    pub fn current_player(&self) -> Option<PlayerPosition> {
        self.round.current_player()
    }

    pub fn set_human(&mut self, seat: PlayerPosition, is_human: bool) {
        self.config.seats[seat.index()].is_human = is_human;
        self.round.player_mut(seat).is_human = is_human;
    }

    /// Plays the card at `index` for `seat`, typically on behalf of a person.
    /// A rejected play leaves the game untouched.
    pub fn attempt_play(
        &mut self,
        seat: PlayerPosition,
        index: usize,
    ) -> Result<PlayOutcome, PlayError> {
        let card = self.round.hand(seat).get(index);
        match self.round.play_index(seat, index) {
            Ok(outcome) => {
                event!(
                    target: "hearts_core::game",
                    Level::DEBUG,
                    seat = %seat,
                    card = ?card,
                    trick_number = self.round.trick_number(),
                    "card played"
                );
                Ok(outcome)
            }
            Err(err) => {
                event!(
                    target: "hearts_core::game",
                    Level::DEBUG,
                    seat = %seat,
                    index,
                    reason = %err,
                    "play rejected"
                );
                Err(err)
            }
        }
    }

    /// Asks the policy which card it would play for `seat`. Works for human
    /// seats too, as a hint. `None` when it is not `seat`'s turn.
    pub fn suggest_play(&mut self, seat: PlayerPosition) -> Option<usize> {
        if self.current_player() != Some(seat) {
            return None;
        }
        let ctx = PolicyContext::new(seat, &self.round);
        Some(self.policy.choose_play(&ctx))
    }

    /// Plays the policy's choice for `seat`, whoever controls it.
    pub fn play_suggested(&mut self, seat: PlayerPosition) -> Result<PlayOutcome, PlayError> {
        let expected = self.current_player();
        let Some(index) = self.suggest_play(seat) else {
            return Err(match expected {
                Some(expected) => PlayError::OutOfTurn {
                    expected,
                    actual: seat,
                },
                None if self.round.is_over() => PlayError::RoundOver,
                None => PlayError::TrickPending,
            });
        };
        self.attempt_play(seat, index)
    }

    /// Performs one step and reports what happened.
    ///
    /// * a complete trick is resolved;
    /// * an automated seat to move plays its policy's card;
    /// * a human seat to move is announced, and nothing changes until
    ///   [`Game::attempt_play`] is called;
    /// * after the last trick this is a no-op returning no events.
    pub fn advance(&mut self) -> Vec<GameEvent> {
        match self.phase() {
            Phase::RoundOver => Vec::new(),
            Phase::TrickResolving => self.resolve_trick(),
            Phase::AwaitingLead | Phase::TrickInProgress => {
                let Some(seat) = self.current_player() else {
                    return Vec::new();
                };
                if self.round.player(seat).is_human {
                    return vec![GameEvent::AwaitingHumanMove(seat)];
                }
                self.play_automated(seat)
            }
        }
    }

    /// Advances until a human must move or the round ends, returning every
    /// event produced along the way.
    pub fn run_until_human(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        loop {
            let step = self.advance();
            let stop = step.is_empty()
                || step
                    .iter()
                    .any(|event| matches!(event, GameEvent::AwaitingHumanMove(_)));
            events.extend(step);
            if stop {
                return events;
            }
        }
    }

    pub fn is_round_over(&self) -> bool {
        self.round.is_over()
    }

    pub fn scores(&self) -> ScoreBoard {
        ScoreBoard::from_round(&self.round)
    }

    /// Winners of the finished round; empty while the round is in progress.
    pub fn winners(&self) -> Vec<PlayerPosition> {
        if !self.is_round_over() {
            return Vec::new();
        }
        self.scores().winners()
    }

    /// Whether `seat` won the finished round. Always false mid-round.
    pub fn is_winner(&self, seat: PlayerPosition) -> bool {
        self.is_round_over() && self.scores().is_winner(seat)
    }

    fn play_automated(&mut self, seat: PlayerPosition) -> Vec<GameEvent> {
        let index = {
            let ctx = PolicyContext::new(seat, &self.round);
            self.policy.choose_play(&ctx)
        };
        let card = self.round.hand(seat).get(index);
        if let Err(err) = self.round.play_index(seat, index) {
            panic!(
                "policy for {seat} chose slot {index} ({card:?}) which is not playable: {err}"
            );
        }
        let Some(card) = card else {
            unreachable!("play_index accepted an empty slot");
        };
        event!(
            target: "hearts_core::game",
            Level::DEBUG,
            seat = %seat,
            card = %card,
            trick_number = self.round.trick_number(),
            "automated play"
        );
        vec![
            GameEvent::PlayerThinking(seat),
            GameEvent::CardPlayed { seat, index, card },
        ]
    }

    fn resolve_trick(&mut self) -> Vec<GameEvent> {
        let Some(result) = self.round.resolve_trick() else {
            return Vec::new();
        };
        assert!(
            self.round.partitions_deck(),
            "deck partition violated after trick {}",
            self.round.trick_number()
        );

        let trick_number = self.round.trick_number();
        event!(
            target: "hearts_core::game",
            Level::INFO,
            taker = %result.taker,
            points = result.points,
            trick_number,
            "trick taken"
        );
        let mut events = vec![GameEvent::TrickTaken {
            taker: result.taker,
            points: result.points,
            trick_number,
        }];

        if self.round.is_over() {
            let scores = self.scores();
            let winners = scores.winners();
            event!(
                target: "hearts_core::game",
                Level::INFO,
                round = self.round_number,
                scores = ?scores.standings(),
                winners = ?winners,
                moon = ?scores.moon_shooter(),
                "round ended"
            );
            events.push(GameEvent::RoundEnded {
                scores: *scores.standings(),
                winners,
            });
        }
        events
    }

    fn log_deal(&self) {
        event!(
            target: "hearts_core::game",
            Level::INFO,
            seed = self.seed,
            round = self.round_number,
            leader = %self.round.leader(),
            "round dealt"
        );
    }
}

use super::engine::Game;
use super::policy::Policy;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

/// End-of-round record: who sat where, what they captured and who won.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundSummary {
    pub seed: u64,
    pub round_number: u32,
    pub names: [String; 4],
    pub scores: [u8; 4],
    pub winners: Vec<PlayerPosition>,
    #[serde(default)]
    pub moon_shooter: Option<PlayerPosition>,
    /// Captured point cards per seat, sorted by suit then rank.
    pub taken: [Vec<Card>; 4],
}

impl RoundSummary {
    /// Returns `None` until the round is over.
    pub fn capture<P: Policy>(game: &Game<P>) -> Option<Self> {
        if !game.is_round_over() {
            return None;
        }
        let round = game.round();
        let scores = game.scores();
        Some(RoundSummary {
            seed: game.seed(),
            round_number: game.round_number(),
            names: PlayerPosition::LOOP.map(|seat| round.player(seat).name.clone()),
            scores: *scores.standings(),
            winners: scores.winners(),
            moon_shooter: scores.moon_shooter(),
            taken: PlayerPosition::LOOP.map(|seat| round.player(seat).taken.clone()),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

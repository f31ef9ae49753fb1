use crate::model::card::TOTAL_POINTS;
use crate::model::player::PlayerPosition;
use crate::model::round::RoundState;

/// Points captured by each seat in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u8; 4],
}

impl ScoreBoard {
    pub const fn new(totals: [u8; 4]) -> Self {
        Self { totals }
    }

    pub fn from_round(round: &RoundState) -> Self {
        Self::new(round.points())
    }

    pub fn score(&self, seat: PlayerPosition) -> u8 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u8; 4] {
        &self.totals
    }

    pub fn total(&self) -> u32 {
        self.totals.iter().map(|&points| points as u32).sum()
    }

    /// The seat that captured every point, if any.
    pub fn moon_shooter(&self) -> Option<PlayerPosition> {
        PlayerPosition::LOOP
            .into_iter()
            .find(|seat| self.score(*seat) == TOTAL_POINTS)
    }

    /// A moon shooter wins alone; otherwise every seat tied at the lowest score.
    pub fn winners(&self) -> Vec<PlayerPosition> {
        if let Some(shooter) = self.moon_shooter() {
            return vec![shooter];
        }
        let Some(min) = self.totals.iter().copied().min() else {
            return Vec::new();
        };
        PlayerPosition::LOOP
            .into_iter()
            .filter(|seat| self.score(*seat) == min)
            .collect()
    }

    pub fn is_winner(&self, seat: PlayerPosition) -> bool {
        self.winners().contains(&seat)
    }
}

use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::round::RoundState;
use crate::model::trick::Trick;

/// Read-only view handed to a policy when its seat must play.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub round: &'a RoundState,
}

impl<'a> PolicyContext<'a> {
    pub fn new(seat: PlayerPosition, round: &'a RoundState) -> Self {
        Self { seat, round }
    }

    pub fn hand(&self) -> &'a Hand {
        self.round.hand(self.seat)
    }

    pub fn trick(&self) -> &'a Trick {
        self.round.trick()
    }
}

/// Chooses moves for automated seats.
pub trait Policy: Send {
    /// Returns the hand index to play. The engine treats an index that is
    /// empty or illegal as a defect and panics.
    fn choose_play(&mut self, ctx: &PolicyContext<'_>) -> usize;
}

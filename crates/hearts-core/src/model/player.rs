use crate::model::card::Card;
use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    /// Seating order; turns rotate clockwise through it.
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }

    /// The seat `steps` places clockwise from this one.
    pub const fn advance(self, steps: usize) -> PlayerPosition {
        Self::LOOP[(self.index() + steps) % 4]
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

/// Who sits in a seat and whether a person controls it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    #[serde(default)]
    pub is_human: bool,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn automated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub seats: [SeatConfig; 4],
    /// Seat renamed by `Game::deal`.
    pub host: PlayerPosition,
}

impl TableConfig {
    pub fn all_automated() -> Self {
        Self {
            seats: PlayerPosition::LOOP.map(|seat| SeatConfig::automated(seat.to_string())),
            host: PlayerPosition::South,
        }
    }

    pub fn seat(&self, seat: PlayerPosition) -> &SeatConfig {
        &self.seats[seat.index()]
    }
}

impl Default for TableConfig {
    /// One human in the South seat against three automated players.
    fn default() -> Self {
        let mut config = Self::all_automated();
        config.seats[PlayerPosition::South.index()].is_human = true;
        config
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub hand: Hand,
    /// Point cards captured this round.
    pub taken: Vec<Card>,
    pub is_human: bool,
}

impl Player {
    pub fn new(seat: &SeatConfig, hand: Hand) -> Self {
        Self {
            name: seat.name.clone(),
            hand,
            taken: Vec::new(),
            is_human: seat.is_human,
        }
    }

    pub fn points(&self) -> u8 {
        self.taken.iter().map(|card| card.points()).sum()
    }
}

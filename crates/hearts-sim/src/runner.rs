use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hearts_bot::HeuristicPolicy;
use hearts_core::game::{Game, GameEvent, RoundSummary};
use hearts_core::model::player::{PlayerPosition, TableConfig};
use hearts_core::model::round::PlayError;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimConfig};

/// Plays a configured number of seeded rounds and streams one JSONL row each.
pub struct SimRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    table: TableConfig,
}

/// Totals returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub names: [String; 4],
    pub total_points: [u32; 4],
    pub wins: [u32; 4],
    pub moons: usize,
}

#[derive(Debug, Serialize)]
struct RoundRow<'a> {
    run_id: &'a str,
    round_index: usize,
    human_moves: usize,
    #[serde(flatten)]
    summary: &'a RoundSummary,
}

impl SimRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }
        let mut table = config.table();
        if let Some(host_name) = config.host_name.as_ref() {
            table.seats[table.host.index()].name = host_name.clone();
        }
        Ok(Self {
            config,
            outputs,
            table,
        })
    }

    pub fn table(&self) -> &TableConfig {
        &self.table
    }

    /// Plays every round, writing rows as each one finishes.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);

        let mut game = Game::with_seed(
            self.table.clone(),
            HeuristicPolicy::new(),
            self.config.seed(),
        );
        let host_name = self.table.seat(self.table.host).name.clone();
        let mut summary = RunSummary {
            rounds_played: 0,
            rows_written: 0,
            jsonl_path: self.outputs.jsonl.clone(),
            names: self.table.seats.clone().map(|seat| seat.name),
            total_points: [0; 4],
            wins: [0; 4],
            moons: 0,
        };

        for round_index in 0..self.config.rounds {
            if round_index > 0 {
                game.deal(host_name.clone());
            }
            let human_moves = play_round(&mut game)?;
            let Some(round) = RoundSummary::capture(&game) else {
                return Err(RunnerError::game(format!(
                    "round {round_index} stopped before its last trick"
                )));
            };

            for seat in PlayerPosition::LOOP {
                summary.total_points[seat.index()] += u32::from(round.scores[seat.index()]);
            }
            for seat in &round.winners {
                summary.wins[seat.index()] += 1;
            }
            if round.moon_shooter.is_some() {
                summary.moons += 1;
            }

            let row = RoundRow {
                run_id: &self.config.run_id,
                round_index,
                human_moves,
                summary: &round,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            summary.rows_written += 1;
            summary.rounds_played += 1;

            event!(
                target: "hearts_sim::runner",
                Level::INFO,
                run_id = %self.config.run_id,
                round_index,
                scores = ?round.scores,
                winners = ?round.winners,
                "round recorded"
            );
        }

        writer.flush()?;
        Ok(summary)
    }
}

/// Drives one round to its end. Human seats follow the policy's hint, the
/// way a player taking every suggestion would. Returns the number of
/// moves made on behalf of humans.
fn play_round(game: &mut Game<HeuristicPolicy>) -> Result<usize, RunnerError> {
    let mut human_moves = 0usize;
    loop {
        let events = game.run_until_human();
        if game.is_round_over() {
            return Ok(human_moves);
        }
        let Some(seat) = events.iter().rev().find_map(|event| match event {
            GameEvent::AwaitingHumanMove(seat) => Some(*seat),
            _ => None,
        }) else {
            return Err(RunnerError::game(
                "engine stalled without awaiting a move".to_string(),
            ));
        };
        game.play_suggested(seat)
            .map_err(|source| RunnerError::Play { seat, source })?;
        human_moves += 1;
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("suggested play for {seat} was rejected: {source}")]
    Play {
        seat: PlayerPosition,
        #[source]
        source: PlayError,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requires exactly 4 seats but found {found}")]
    SeatCount { found: usize },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}

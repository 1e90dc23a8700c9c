//! State transitions for a single match.
//!
//! Every function here takes the current `Match` by reference and returns a
//! new value; nothing is persisted. Callers are responsible for serializing
//! transitions on the same match and for applying the returned stats updates
//! together with saving the new state.

use chrono::Utc;

use crate::models::game_match::{Match, MatchStatus, Move};
use crate::models::player_stats::{GameOutcome, StatsUpdate};
use crate::services::board_engine::{self, Terminal};
use crate::services::errors::match_errors::MatchError;

/// Result of a successful mutation.
///
/// `stats_updates` is empty unless this transition completed the match, in
/// which case it holds exactly one entry per participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub game: Match,
    pub stats_updates: Vec<StatsUpdate>,
}

pub fn create_match(initiator: &str, opponent: &str) -> Result<Match, MatchError> {
    if initiator.is_empty() || opponent.is_empty() {
        return Err(MatchError::InvalidPlayer);
    }
    if initiator == opponent {
        return Err(MatchError::InvalidOpponent);
    }
    Ok(Match::new(initiator, opponent))
}

pub fn submit_move(
    game: &Match,
    acting_player: &str,
    row: i64,
    col: i64,
) -> Result<Transition, MatchError> {
    if game.status != MatchStatus::Ongoing {
        return Err(MatchError::MatchAlreadyCompleted);
    }
    if game.player_to_move() != acting_player {
        return Err(MatchError::NotYourTurn);
    }

    let side = game.side_to_move;
    let board = board_engine::apply(&game.board, row, col, side)?;

    let now = Utc::now();
    let mut next = game.clone();
    next.board = board;
    next.moves.push(Move {
        match_id: game.id.clone(),
        player_id: acting_player.to_string(),
        side,
        // apply() has already bounded both coordinates to 0..3
        row: row as u8,
        col: col as u8,
        sequence: game.moves.len() as u32 + 1,
        created_at: now,
    });
    next.updated_at = now;
    next.version = game.version + 1;

    let stats_updates = match board_engine::terminal_state(&next.board) {
        Some(Terminal::Won(_)) => {
            next.status = MatchStatus::Completed;
            next.winner = Some(acting_player.to_string());
            paired_updates(&next, Some(acting_player))
        }
        Some(Terminal::Draw) => {
            next.status = MatchStatus::Completed;
            next.winner = None;
            paired_updates(&next, None)
        }
        None => {
            next.side_to_move = side.opponent();
            vec![]
        }
    };

    Ok(Transition {
        game: next,
        stats_updates,
    })
}

/// Out-of-band completion such as a resignation or an administrative result.
/// `winner` of `None` records a draw.
pub fn record_manual_completion(
    game: &Match,
    caller: &str,
    winner: Option<&str>,
) -> Result<Transition, MatchError> {
    if game.status != MatchStatus::Ongoing {
        return Err(MatchError::MatchAlreadyCompleted);
    }
    if !game.is_participant(caller) {
        return Err(MatchError::NotParticipant);
    }
    if let Some(winner_id) = winner {
        if !game.is_participant(winner_id) {
            return Err(MatchError::InvalidWinner(winner_id.to_string()));
        }
    }

    let mut next = game.clone();
    next.status = MatchStatus::Completed;
    next.winner = winner.map(str::to_string);
    next.updated_at = Utc::now();
    next.version = game.version + 1;
    let stats_updates = paired_updates(&next, winner);

    Ok(Transition {
        game: next,
        stats_updates,
    })
}

fn paired_updates(game: &Match, winner: Option<&str>) -> Vec<StatsUpdate> {
    match winner {
        Some(winner_id) => {
            let loser_id = if winner_id == game.player_first_id {
                &game.player_second_id
            } else {
                &game.player_first_id
            };
            vec![
                StatsUpdate::new(winner_id, GameOutcome::Won),
                StatsUpdate::new(loser_id, GameOutcome::Lost),
            ]
        }
        None => vec![
            StatsUpdate::new(&game.player_first_id, GameOutcome::Drawn),
            StatsUpdate::new(&game.player_second_id, GameOutcome::Drawn),
        ],
    }
}

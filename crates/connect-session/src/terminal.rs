//! Hot-seat terminal client.
//!
//! Two players share one terminal: each enters a name, then they take turns
//! picking columns until one of them ends the game or leaves it idle.

use anyhow::anyhow;
use connect_core::{GameSnapshot, Indicator, EMPTY, MAX_PLAYERS};
use std::io::Write;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use crate::protocol::{ClientRequest, STATUS_CONFLICT};
use crate::room::GameRoom;

/// What a player typed at the column prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChoice {
    /// End the game
    Close,
    /// Zero-based column
    Column(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Not an integer! - Pick again...")]
    NotInteger,

    #[error("Out of bounds! - Pick again...")]
    OutOfBounds,
}

/// A line read from the terminal
#[derive(Debug)]
pub enum Input {
    Line(String),
    TimedOut,
    /// Ctrl-C or end of input
    Interrupted,
}

/// Piece drawn for a player indicator
pub fn play_piece(indicator: Indicator) -> char {
    if indicator == 1 {
        'x'
    } else {
        'o'
    }
}

/// Parse a 1-based column number, where `0` ends the game
pub fn parse_column(input: &str, columns: usize) -> Result<ColumnChoice, InputError> {
    let number: i64 = input.trim().parse().map_err(|_| InputError::NotInteger)?;
    if number == 0 {
        return Ok(ColumnChoice::Close);
    }
    match usize::try_from(number) {
        Ok(n) if n <= columns => Ok(ColumnChoice::Column(number - 1)),
        _ => Err(InputError::OutOfBounds),
    }
}

/// Draw the board with a row of 1-based column numbers underneath
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut table: Vec<Vec<String>> = snapshot
        .grid
        .iter_rows()
        .map(|row| {
            row.iter()
                .map(|&cell| {
                    if cell == EMPTY {
                        "[   ]".to_string()
                    } else {
                        format!("[ {} ]", play_piece(cell))
                    }
                })
                .collect()
        })
        .collect();
    table.push((1..=snapshot.columns).map(|n| format!("[ {} ]", n)).collect());

    let widths: Vec<usize> = (0..snapshot.columns)
        .map(|c| {
            table
                .iter()
                .filter_map(|row| row.get(c))
                .map(String::len)
                .max()
                .unwrap_or(0)
        })
        .collect();

    table
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line reader over stdin with a per-turn timeout.
pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
    wait_timeout: Duration,
}

impl Terminal {
    pub fn new(wait_timeout: Duration) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            wait_timeout,
        }
    }

    /// Print `text` and wait for a line, giving up after the wait timeout
    /// when `timed` is set.
    pub async fn prompt(&mut self, text: &str, timed: bool) -> anyhow::Result<Input> {
        print!("{}", text);
        std::io::stdout().flush()?;

        let wait = timed.then_some(self.wait_timeout);
        let lines = &mut self.lines;
        let next = async move {
            match wait {
                Some(limit) => tokio::time::timeout(limit, lines.next_line()).await.ok(),
                None => Some(lines.next_line().await),
            }
        };

        tokio::select! {
            line = next => match line {
                None => Ok(Input::TimedOut),
                Some(Ok(Some(line))) => Ok(Input::Line(line)),
                Some(Ok(None)) => Ok(Input::Interrupted),
                Some(Err(e)) => Err(e.into()),
            },
            _ = tokio::signal::ctrl_c() => Ok(Input::Interrupted),
        }
    }
}

/// Ask for a player name until one is accepted. `None` if the user quits.
async fn join_player(
    room: &mut GameRoom,
    terminal: &mut Terminal,
    seat: usize,
) -> anyhow::Result<Option<String>> {
    let mut text = format!("Player {}, please enter your name: ", seat);
    loop {
        let name = match terminal.prompt(&text, false).await? {
            Input::Line(line) => line.trim().to_string(),
            Input::TimedOut | Input::Interrupted => return Ok(None),
        };
        if name.is_empty() {
            continue;
        }

        match room.handle(ClientRequest::Join {
            player_id: name.clone(),
        }) {
            Ok(_) => {
                println!("Hi {}! - Joined successfully", name);
                return Ok(Some(name));
            }
            Err(e) if e.status_code() == STATUS_CONFLICT => {
                println!("{}", e);
                text = "Please enter a different name: ".to_string();
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Ask the player to move for a column. `None` if they stayed idle.
async fn read_choice(
    terminal: &mut Terminal,
    player_id: &str,
    piece: char,
    columns: usize,
) -> anyhow::Result<Option<ColumnChoice>> {
    let text = format!(
        "{} [{}] - Pick a column ^, or press 0 to end game: ",
        player_id, piece
    );
    loop {
        match terminal.prompt(&text, true).await? {
            Input::TimedOut => return Ok(None),
            Input::Interrupted => return Ok(Some(ColumnChoice::Close)),
            Input::Line(line) => match parse_column(&line, columns) {
                Ok(choice) => return Ok(Some(choice)),
                Err(e) => println!("{}", e),
            },
        }
    }
}

/// Run a full session on `room` until the game is closed.
pub async fn run_client(room: &mut GameRoom, terminal: &mut Terminal) -> anyhow::Result<()> {
    let mut joined = Vec::with_capacity(MAX_PLAYERS);
    for seat in 1..=MAX_PLAYERS {
        match join_player(room, terminal, seat).await? {
            Some(name) => joined.push(name),
            None => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
    let first = &joined[0];
    let opponent = room.snapshot().opponent_of(first).map(str::to_string);
    println!(
        "{} vs {}, good luck!",
        first,
        opponent.as_deref().unwrap_or("nobody")
    );

    loop {
        let snapshot = room.snapshot();
        if let Some(closer) = &snapshot.closed {
            println!("Game closed by {}, goodbye!", closer);
            return Ok(());
        }

        let turn = snapshot
            .turn
            .clone()
            .ok_or_else(|| anyhow!("game has not started"))?;
        let piece = snapshot
            .players
            .indicator_of(&turn)
            .map(play_piece)
            .unwrap_or('?');
        println!("{}", render_board(&snapshot));

        match read_choice(terminal, &turn, piece, snapshot.columns).await? {
            None => {
                if room.close_if_idle(Instant::now()).is_some() {
                    println!("Closing game due to inactivity...");
                }
            }
            Some(ColumnChoice::Close) => {
                room.handle(ClientRequest::Close { player_id: turn })?;
            }
            Some(ColumnChoice::Column(column)) => {
                match room.handle(ClientRequest::Move {
                    player_id: turn,
                    column,
                }) {
                    Ok(after) => {
                        if let Some(winner) = &after.winner {
                            info!(winner = %winner, "Round finished");
                            println!("{}", render_board(&after));
                            println!("{} Wins! - Resetting", winner);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Move rejected");
                        println!("{}", e);
                    }
                }
            }
        }
    }
}

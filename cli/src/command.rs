use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

pub const USAGE: &str = "commands: r ROW COL (reveal), f ROW COL (flag), n (new game), q (quit)";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("expected ROW COL after {0:?}")]
    MissingCoords(String),
    #[error("invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("unexpected trailing input {0:?}")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(verb, &mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(verb, &mut words)?),
            "n" | "new" => Command::NewGame,
            "q" | "quit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(verb.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    verb: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, ParseCommandError> {
    let mut next = || -> Result<Coord, ParseCommandError> {
        let word = words
            .next()
            .ok_or_else(|| ParseCommandError::MissingCoords(verb.to_owned()))?;
        word.parse::<Coord>()
            .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}

use std::str::FromStr;

use sapper_core::{Coord2, Field, PixelPos, PointerButton, PressQueue, TILE_SIZE};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, expected r, f, p or q")]
    Unknown(String),
    #[error("Expected two numbers after {0:?}")]
    MissingPosition(String),
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
    #[error("Unknown button {0:?}, expected l, r or m")]
    UnknownButton(String),
}

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `r <col> <row>`: left click on a tile.
    Reveal(Coord2),
    /// `f <col> <row>`: right click on a tile.
    Flag(Coord2),
    /// `p <x> <y> [l|r|m]`: click at a raw pixel position.
    Press(PixelPos, PointerButton),
    /// `q`
    Quit,
}

impl Command {
    /// Turns the command into a pointer press.
    ///
    /// Tile commands press the center of the tile, so they round-trip
    /// through the field's pixel translation like a real click.
    pub fn press(self, field: &Field, pointer: &mut PressQueue) {
        let tile_center = |coords: Coord2| {
            let (x, y) = field.grid_to_pixel(coords);
            (x + TILE_SIZE / 2, y + TILE_SIZE / 2)
        };

        match self {
            Command::Reveal(coords) => pointer.push(tile_center(coords), PointerButton::Left),
            Command::Flag(coords) => pointer.push(tile_center(coords), PointerButton::Right),
            Command::Press(pos, button) => pointer.push(pos, button),
            Command::Quit => {}
        }
    }
}

fn parse_pair<T: FromStr>(
    name: &str,
    mut words: std::str::SplitWhitespace<'_>,
) -> Result<(T, T), CommandError> {
    let mut next = || -> Result<T, CommandError> {
        let word = words
            .next()
            .ok_or_else(|| CommandError::MissingPosition(name.to_owned()))?;
        word.parse()
            .map_err(|_| CommandError::InvalidNumber(word.to_owned()))
    };
    Ok((next()?, next()?))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        match name {
            "r" | "reveal" => Ok(Command::Reveal(parse_pair(name, words)?)),
            "f" | "flag" => Ok(Command::Flag(parse_pair(name, words)?)),
            "p" | "press" => {
                let pos = parse_pair(name, words.clone())?;
                let button = match words.nth(2) {
                    None | Some("l") => PointerButton::Left,
                    Some("r") => PointerButton::Right,
                    Some("m") => PointerButton::Middle,
                    Some(other) => return Err(CommandError::UnknownButton(other.to_owned())),
                };
                Ok(Command::Press(pos, button))
            }
            "q" | "quit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

//! Player markers and board cells.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two sides in a two-player game.
///
/// `X` is MARK_A and moves first; `O` is MARK_B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    #[serde(rename = "X")]
    X,
    #[serde(rename = "O")]
    O,
}

impl Marker {
    /// Returns the opposing marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    /// Returns the single-character symbol used on the wire and in prompts.
    pub fn symbol(self) -> &'static str {
        match self {
            Marker::X => "X",
            Marker::O => "O",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a string is not a recognized marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized marker '{0}', expected 'X' or 'O'")]
pub struct UnknownMarker(pub String);

impl FromStr for Marker {
    type Err = UnknownMarker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Marker::X),
            "O" => Ok(Marker::O),
            other => Err(UnknownMarker(other.to_string())),
        }
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Marker),
}

impl Cell {
    /// Parses the wire representation: `None` is empty, otherwise a marker symbol.
    pub fn parse(raw: Option<&str>) -> Result<Self, UnknownMarker> {
        match raw {
            None => Ok(Cell::Empty),
            Some(symbol) => symbol.parse::<Marker>().map(Cell::Occupied),
        }
    }

    /// Returns the marker occupying this cell, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(marker) => Some(marker),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

//! Estimation card deck
//!
//! The vote domain is a closed set; representing it as an enum makes
//! out-of-deck votes unrepresentable rather than a caller error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A planning poker card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Zero,
    Half,
    One,
    Two,
    Three,
    Five,
    Eight,
    Thirteen,
    TwentyOne,
    /// "?" - cannot estimate
    Unsure,
    /// "☕" - break requested
    Coffee,
}

impl Card {
    /// The full deck in display order
    pub const DECK: [Card; 11] = [
        Card::Zero,
        Card::Half,
        Card::One,
        Card::Two,
        Card::Three,
        Card::Five,
        Card::Eight,
        Card::Thirteen,
        Card::TwentyOne,
        Card::Unsure,
        Card::Coffee,
    ];

    /// Numeric point value, if the card carries one
    pub fn points(self) -> Option<f64> {
        match self {
            Card::Zero => Some(0.0),
            Card::Half => Some(0.5),
            Card::One => Some(1.0),
            Card::Two => Some(2.0),
            Card::Three => Some(3.0),
            Card::Five => Some(5.0),
            Card::Eight => Some(8.0),
            Card::Thirteen => Some(13.0),
            Card::TwentyOne => Some(21.0),
            Card::Unsure | Card::Coffee => None,
        }
    }

    /// The card face as shown on the deck
    pub fn face(self) -> &'static str {
        match self {
            Card::Zero => "0",
            Card::Half => "0.5",
            Card::One => "1",
            Card::Two => "2",
            Card::Three => "3",
            Card::Five => "5",
            Card::Eight => "8",
            Card::Thirteen => "13",
            Card::TwentyOne => "21",
            Card::Unsure => "?",
            Card::Coffee => "\u{2615}",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face())
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Card::Zero),
            "0.5" | ".5" | "1/2" => Ok(Card::Half),
            "1" => Ok(Card::One),
            "2" => Ok(Card::Two),
            "3" => Ok(Card::Three),
            "5" => Ok(Card::Five),
            "8" => Ok(Card::Eight),
            "13" => Ok(Card::Thirteen),
            "21" => Ok(Card::TwentyOne),
            "?" => Ok(Card::Unsure),
            "\u{2615}" | "coffee" => Ok(Card::Coffee),
            other => Err(Error::UnknownCard(other.to_string())),
        }
    }
}

//! Round records, offset ordering, and color sequence reassembly

use crate::card::{CardValue, Suit};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// One simulated hand as recorded upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Round {
    /// Dealt cards, up to 6
    #[serde(default)]
    pub cards: Vec<CardValue>,
    /// Round outcome, in whichever spelling the producer used
    #[serde(default, alias = "winner")]
    pub result: String,
    /// Player hand card labels
    #[serde(default, alias = "player_cards")]
    pub player: Vec<String>,
    /// Banker hand card labels
    #[serde(default, alias = "banker_cards")]
    pub banker: Vec<String>,
    #[serde(default)]
    pub player_point: Option<u8>,
    #[serde(default)]
    pub banker_point: Option<u8>,
    /// Per-card color markers ('R'/'B'/other), one per dealt card
    #[serde(default, alias = "colors")]
    pub color_seq: ColorSeq,
    /// Position of this round's first card within the full shoe
    #[serde(default)]
    pub start_index: Option<usize>,
    /// Trailing partial round
    #[serde(default)]
    pub is_tail: bool,
    /// Signal-index marker, display only
    #[serde(default)]
    pub is_sidx: bool,
    #[serde(default)]
    pub s_idx_ok: bool,
}

/// Color markers as either a string or an array of single characters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSeq {
    Text(String),
    Chars(Vec<String>),
}

impl Default for ColorSeq {
    fn default() -> Self {
        ColorSeq::Text(String::new())
    }
}

impl ColorSeq {
    /// Markers with whitespace stripped
    pub fn flattened(&self) -> String {
        match self {
            ColorSeq::Text(text) => text.chars().filter(|ch| !ch.is_whitespace()).collect(),
            ColorSeq::Chars(items) => items.concat(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ColorSeq::Text(text) => text.is_empty(),
            ColorSeq::Chars(items) => items.is_empty(),
        }
    }
}

/// Normalized round outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Banker,
    Player,
    Tie,
}

impl Outcome {
    /// Parse an outcome from the spellings upstream producers use
    pub fn parse(text: &str) -> Option<Outcome> {
        match text.trim() {
            "Banker" | "莊" | "B" => Some(Outcome::Banker),
            "Player" | "閒" | "P" => Some(Outcome::Player),
            "Tie" | "和" | "T" => Some(Outcome::Tie),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Banker => write!(f, "Banker"),
            Outcome::Player => write!(f, "Player"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

impl Round {
    /// Normalized outcome, if the result string is recognized
    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::parse(&self.result)
    }
}

/// Load a round list from a JSON file
pub fn load_rounds<P: AsRef<Path>>(path: P) -> Result<Vec<Round>> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
        path: path.as_ref().to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(Error::Json)
}

/// Order rounds by declared start offset.
///
/// Rounds carrying a `start_index` sort by it ascending; rounds without one
/// come after, preserving their original relative order. Ties are stable.
pub fn order_by_start(rounds: &[Round]) -> Vec<&Round> {
    let mut keyed: Vec<(usize, &Round)> = rounds.iter().enumerate().collect();
    keyed.sort_by(|a, b| match (a.1.start_index, b.1.start_index) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });
    keyed.into_iter().map(|(_, round)| round).collect()
}

/// Concatenate ordered per-round color markers into one shoe-length
/// sequence. Rounds with no markers contribute nothing, so the result may
/// be shorter than the shoe.
pub fn flatten_colors(rounds: &[Round]) -> String {
    order_by_start(rounds)
        .iter()
        .map(|round| round.color_seq.flattened())
        .collect()
}

/// Newline-joined card labels across ordered rounds plus a trailing tail
/// segment
pub fn vertical_dump(rounds: &[Round], tail: &[CardValue]) -> String {
    order_by_start(rounds)
        .iter()
        .flat_map(|round| round.cards.iter())
        .chain(tail.iter())
        .map(|card| card.label())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Card tallies per suit, zero-filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SuitCounts {
    pub s: usize,
    pub h: usize,
    pub d: usize,
    pub c: usize,
}

impl SuitCounts {
    pub fn get(&self, suit: Suit) -> usize {
        match suit {
            Suit::Spade => self.s,
            Suit::Heart => self.h,
            Suit::Diamond => self.d,
            Suit::Club => self.c,
        }
    }

    pub fn total(&self) -> usize {
        self.s + self.h + self.d + self.c
    }
}

/// Count cards per suit across all rounds plus the tail segment.
/// Cards whose suit does not resolve to one of the four codes are skipped.
pub fn suit_counts(rounds: &[Round], tail: &[CardValue]) -> SuitCounts {
    let mut counts = SuitCounts::default();
    let cards = rounds.iter().flat_map(|round| round.cards.iter()).chain(tail);
    for card in cards {
        match card.suit_letter().as_str() {
            "S" => counts.s += 1,
            "H" => counts.h += 1,
            "D" => counts.d += 1,
            "C" => counts.c += 1,
            _ => {}
        }
    }
    counts
}

//! Card label normalization: suits, ranks, and grid display digits

use serde::{Deserialize, Serialize};

/// One of the four suits of a standard deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    /// All suits in the display order used by upstream exports
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// Canonical single-letter code
    pub fn letter(&self) -> char {
        match self {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Diamond => 'D',
            Suit::Club => 'C',
        }
    }

    /// Unicode suit symbol
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spade => '\u{2660}',
            Suit::Heart => '\u{2665}',
            Suit::Diamond => '\u{2666}',
            Suit::Club => '\u{2663}',
        }
    }

    /// Localized display name shown in tooltips and tallies
    pub fn display_name(&self) -> &'static str {
        match self {
            Suit::Spade => "黑桃",
            Suit::Heart => "紅心",
            Suit::Diamond => "方塊",
            Suit::Club => "梅花",
        }
    }

    /// Map an uppercase letter code to a suit
    pub fn from_letter(ch: char) -> Option<Suit> {
        match ch {
            'S' => Some(Suit::Spade),
            'H' => Some(Suit::Heart),
            'D' => Some(Suit::Diamond),
            'C' => Some(Suit::Club),
            _ => None,
        }
    }

    /// Map a Unicode suit symbol to a suit
    pub fn from_symbol(ch: char) -> Option<Suit> {
        match ch {
            '\u{2660}' => Some(Suit::Spade),
            '\u{2665}' => Some(Suit::Heart),
            '\u{2666}' => Some(Suit::Diamond),
            '\u{2663}' => Some(Suit::Club),
            _ => None,
        }
    }

    /// Lenient selector parse: a single letter (any case) or symbol.
    /// Empty or whitespace-only input selects no suit.
    pub fn parse(input: &str) -> Option<Suit> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Suit::from_symbol(ch).or_else(|| Suit::from_letter(ch.to_ascii_uppercase()))
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A card as produced by upstream pipelines: either a bare label string
/// or a record carrying some combination of suit code, suit symbol, and label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardValue {
    Label(String),
    Record {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        short: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suit_symbol: Option<String>,
    },
}

impl CardValue {
    /// Best-effort single-letter suit code. Tries the explicit suit field,
    /// then the suit symbol, then the label. Total: never fails, empty
    /// input yields an empty string.
    pub fn suit_letter(&self) -> String {
        match self {
            CardValue::Label(label) => suit_letter_from_label(label),
            CardValue::Record {
                suit,
                suit_symbol,
                label,
                ..
            } => {
                for field in [suit, suit_symbol, label] {
                    if let Some(value) = field.as_deref() {
                        let letter = suit_letter_from_label(value);
                        if !letter.is_empty() {
                            return letter;
                        }
                    }
                }
                String::new()
            }
        }
    }

    /// Human-readable label, preferring the explicit label field over the
    /// short-form field. Empty string when neither is present.
    pub fn label(&self) -> String {
        match self {
            CardValue::Label(label) => label.clone(),
            CardValue::Record { label, short, .. } => label
                .clone()
                .or_else(|| short.clone())
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for CardValue {
    fn from(label: &str) -> Self {
        CardValue::Label(label.to_string())
    }
}

/// Resolve the suit letter from a raw label: the trailing character mapped
/// through the symbol table, else uppercased as-is
pub fn suit_letter_from_label(label: &str) -> String {
    let trimmed = label.trim();
    let Some(last) = trimmed.chars().last() else {
        return String::new();
    };
    if let Some(suit) = Suit::from_symbol(last) {
        return suit.letter().to_string();
    }
    last.to_uppercase().collect()
}

fn is_suit_char(ch: char) -> bool {
    Suit::from_symbol(ch).is_some() || matches!(ch.to_ascii_uppercase(), 'S' | 'H' | 'D' | 'C')
}

/// Strip suit symbols and suit letters (case-insensitive) from a label and
/// uppercase the remainder
pub fn rank_from_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .filter(|ch| !is_suit_char(*ch))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Single-character display value following Baccarat point truncation:
/// Ace is 1, tens and faces are 0, other numerals reduce modulo 10.
/// Unrecognized ranks pass through unchanged.
pub fn grid_digit(label: &str) -> String {
    let rank = rank_from_label(label);
    if rank.is_empty() {
        return String::new();
    }
    match rank.as_str() {
        "A" => "1".to_string(),
        "T" | "10" | "J" | "Q" | "K" => "0".to_string(),
        other => match other.parse::<u32>() {
            Ok(n) => (n % 10).to_string(),
            Err(_) => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suit_from_label_symbol() {
        assert_eq!(suit_letter_from_label("10♠"), "S");
        assert_eq!(suit_letter_from_label("A♥"), "H");
    }

    #[test]
    fn test_suit_from_label_letter() {
        assert_eq!(suit_letter_from_label("KH"), "H");
        assert_eq!(suit_letter_from_label("2d"), "D");
    }

    #[test]
    fn test_suit_from_label_unknown_degrades() {
        // Unrecognized trailing character is passed through uppercased
        assert_eq!(suit_letter_from_label("7x"), "X");
        assert_eq!(suit_letter_from_label(""), "");
        assert_eq!(suit_letter_from_label("   "), "");
    }

    #[test]
    fn test_card_value_suit_resolution_order() {
        let explicit: CardValue = serde_json::from_str(r#"{"suit":"D","label":"KH"}"#).unwrap();
        assert_eq!(explicit.suit_letter(), "D");

        let symbol: CardValue = serde_json::from_str(r#"{"suit_symbol":"♣"}"#).unwrap();
        assert_eq!(symbol.suit_letter(), "C");

        let label_only: CardValue = serde_json::from_str(r#"{"label":"9♦"}"#).unwrap();
        assert_eq!(label_only.suit_letter(), "D");

        let bare: CardValue = serde_json::from_str(r#""10♠""#).unwrap();
        assert_eq!(bare.suit_letter(), "S");
    }

    #[test]
    fn test_card_value_label() {
        let record: CardValue =
            serde_json::from_str(r#"{"label":"K♥","suit":"H"}"#).unwrap();
        assert_eq!(record.label(), "K♥");

        let short_only: CardValue = serde_json::from_str(r#"{"short":"KH"}"#).unwrap();
        assert_eq!(short_only.label(), "KH");

        let empty: CardValue = serde_json::from_str(r#"{"suit":"H"}"#).unwrap();
        assert_eq!(empty.label(), "");
    }

    #[test]
    fn test_rank_from_label() {
        assert_eq!(rank_from_label("10♠"), "10");
        assert_eq!(rank_from_label("kh"), "K");
        assert_eq!(rank_from_label("A♦"), "A");
        assert_eq!(rank_from_label(""), "");
    }

    #[test]
    fn test_grid_digit() {
        assert_eq!(grid_digit("A♠"), "1");
        assert_eq!(grid_digit("T♥"), "0");
        assert_eq!(grid_digit("10♦"), "0");
        assert_eq!(grid_digit("J♣"), "0");
        assert_eq!(grid_digit("QS"), "0");
        assert_eq!(grid_digit("KD"), "0");
        assert_eq!(grid_digit("7♥"), "7");
        assert_eq!(grid_digit("2c"), "2");
    }

    #[test]
    fn test_grid_digit_unrecognized_passthrough() {
        assert_eq!(grid_digit("?♠"), "?");
        assert_eq!(grid_digit(""), "");
    }

    #[test]
    fn test_suit_parse_selector() {
        assert_eq!(Suit::parse("h"), Some(Suit::Heart));
        assert_eq!(Suit::parse(" ♦ "), Some(Suit::Diamond));
        assert_eq!(Suit::parse(""), None);
        assert_eq!(Suit::parse("SH"), None);
        assert_eq!(Suit::parse("x"), None);
    }
}

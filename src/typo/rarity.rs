//! Rarity codes: which mutation family a typo comes from, and how codes are selected

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::mutations;
use super::neighbors::{NeighborTable, KEYBOARD_LETTERS, NUMPAD_DIGITS, VISUAL_CHARS, VISUAL_DIGITS};
use crate::error::TypoForgeError;

/// Mutation family, the first character of a rarity code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    /// Keyboard or numpad neighbor substitution
    A,
    /// Structural edits: deletion, swap, doubling
    B,
    /// Visual-similarity substitution
    C,
    /// Neighbor insertion before or after a character
    D,
}

impl Group {
    pub fn as_char(self) -> char {
        match self {
            Group::A => 'A',
            Group::B => 'B',
            Group::C => 'C',
            Group::D => 'D',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Group::A => "keyboard/numpad neighbor substitution",
            Group::B => "structural edits (delete/swap/double)",
            Group::C => "visual-similarity substitution",
            Group::D => "neighbor insertion before/after",
        }
    }
}

/// Two-character classification of a typo, e.g. `A1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RarityCode {
    A1,
    A2,
    B1,
    B2,
    B3,
    C1,
    C2,
    D1,
    D2,
}

/// How a rarity code turns a label into candidates
#[derive(Debug, Clone, Copy)]
pub enum Mutation {
    Substitute(&'static NeighborTable),
    Insert(&'static NeighborTable),
    OneOut,
    Swap,
    Double,
}

impl Mutation {
    pub fn apply(&self, label: &str) -> Vec<String> {
        match self {
            Mutation::Substitute(table) => mutations::replace_with_neighbor(label, table),
            Mutation::Insert(table) => mutations::insert_neighbor(label, table),
            Mutation::OneOut => mutations::one_out(label),
            Mutation::Swap => mutations::swap_pairs(label),
            Mutation::Double => mutations::double_letter(label),
        }
    }

    pub fn table(&self) -> Option<&'static NeighborTable> {
        match self {
            Mutation::Substitute(table) | Mutation::Insert(table) => Some(*table),
            _ => None,
        }
    }
}

impl RarityCode {
    /// Dispatch order; selection never re-orders it
    pub const ALL: [RarityCode; 9] = [
        RarityCode::A1,
        RarityCode::A2,
        RarityCode::B1,
        RarityCode::B2,
        RarityCode::B3,
        RarityCode::C1,
        RarityCode::C2,
        RarityCode::D1,
        RarityCode::D2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RarityCode::A1 => "A1",
            RarityCode::A2 => "A2",
            RarityCode::B1 => "B1",
            RarityCode::B2 => "B2",
            RarityCode::B3 => "B3",
            RarityCode::C1 => "C1",
            RarityCode::C2 => "C2",
            RarityCode::D1 => "D1",
            RarityCode::D2 => "D2",
        }
    }

    pub fn group(self) -> Group {
        match self {
            RarityCode::A1 | RarityCode::A2 => Group::A,
            RarityCode::B1 | RarityCode::B2 | RarityCode::B3 => Group::B,
            RarityCode::C1 | RarityCode::C2 => Group::C,
            RarityCode::D1 | RarityCode::D2 => Group::D,
        }
    }

    pub fn mutation(self) -> Mutation {
        match self {
            RarityCode::A1 => Mutation::Substitute(&KEYBOARD_LETTERS),
            RarityCode::A2 => Mutation::Substitute(&NUMPAD_DIGITS),
            RarityCode::B1 => Mutation::OneOut,
            RarityCode::B2 => Mutation::Swap,
            RarityCode::B3 => Mutation::Double,
            RarityCode::C1 => Mutation::Substitute(&VISUAL_CHARS),
            RarityCode::C2 => Mutation::Substitute(&VISUAL_DIGITS),
            RarityCode::D1 => Mutation::Insert(&KEYBOARD_LETTERS),
            RarityCode::D2 => Mutation::Insert(&NUMPAD_DIGITS),
        }
    }

    /// Candidates for `label`, in generation order
    pub fn mutate(self, label: &str) -> Vec<String> {
        self.mutation().apply(label)
    }
}

impl std::fmt::Display for RarityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RarityCode {
    type Err = TypoForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        RarityCode::ALL
            .into_iter()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| TypoForgeError::invalid_input(format!("Unknown rarity code: {}", s)))
    }
}

/// Codes selected by an optional filter.
///
/// No filter selects everything, one character selects a group, two characters
/// select a single code. Anything that matches nothing yields an empty list.
pub fn select_codes(filter: Option<&str>) -> Vec<RarityCode> {
    let filter = filter
        .map(|f| f.trim().to_uppercase())
        .filter(|f| !f.is_empty());

    let Some(filter) = filter else {
        return RarityCode::ALL.to_vec();
    };

    let chars: Vec<char> = filter.chars().collect();
    RarityCode::ALL
        .into_iter()
        .filter(|code| match chars.as_slice() {
            [group] => code.group().as_char() == *group,
            [_, _] => code.as_str() == filter,
            _ => false,
        })
        .collect()
}

//! Typo mutations over a domain label
//!
//! Every function returns its variants in a fixed order (position ascending,
//! then neighbor-table order), which callers rely on for reproducible output.

use super::neighbors::NeighborTable;

/// Remove one character at every position: `word` -> `ord`, `wrd`, `wod`, `wor`
pub fn one_out(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();

    (0..chars.len())
        .map(|idx| {
            chars[..idx]
                .iter()
                .chain(&chars[idx + 1..])
                .collect::<String>()
        })
        .collect()
}

/// Swap every adjacent pair: `word` -> `owrd`, `wrod`, `wodr`
pub fn swap_pairs(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();

    (0..chars.len().saturating_sub(1))
        .map(|idx| {
            let mut swapped = chars.clone();
            swapped.swap(idx, idx + 1);
            swapped.into_iter().collect()
        })
        .collect()
}

/// Double every character in place: `word` -> `wword`, `woord`, `worrd`, `wordd`
pub fn double_letter(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();

    (0..chars.len())
        .map(|idx| {
            chars[..=idx]
                .iter()
                .chain(&chars[idx..])
                .collect::<String>()
        })
        .collect()
}

/// Replace every character with each of its neighbors.
///
/// A character missing from the table stands in for itself, producing one
/// unchanged variant for that position.
pub fn replace_with_neighbor(word: &str, table: &NeighborTable) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut variants = Vec::new();

    for (idx, &letter) in chars.iter().enumerate() {
        for &neighbor in neighbors_or_self(table, &letter) {
            let mut replaced = chars.clone();
            replaced[idx] = neighbor;
            variants.push(replaced.into_iter().collect());
        }
    }

    variants
}

/// Insert each neighbor of every character right before it, then right after it.
pub fn insert_neighbor(word: &str, table: &NeighborTable) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut variants = Vec::new();

    for (idx, letter) in chars.iter().enumerate() {
        for &neighbor in neighbors_or_self(table, letter) {
            variants.push(insert_at(&chars, idx, neighbor));
            variants.push(insert_at(&chars, idx + 1, neighbor));
        }
    }

    variants
}

fn neighbors_or_self<'a>(table: &NeighborTable, letter: &'a char) -> &'a [char] {
    table
        .neighbors(*letter)
        .unwrap_or(std::slice::from_ref(letter))
}

fn insert_at(chars: &[char], idx: usize, c: char) -> String {
    let mut out = String::with_capacity(chars.len() + 1);
    out.extend(&chars[..idx]);
    out.push(c);
    out.extend(&chars[idx..]);
    out
}

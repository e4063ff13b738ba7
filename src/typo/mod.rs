//! Typo generation - mutation engine, neighbor tables and rarity codes
//!
//! Candidates are produced per rarity code, in code-table order, and fed to the
//! availability pipeline one at a time.

pub mod mutations;
pub mod neighbors;
pub mod pipeline;
pub mod rarity;

pub use neighbors::NeighborTable;
pub use pipeline::{AvailabilityStream, TypoPipeline};
pub use rarity::{select_codes, Group, Mutation, RarityCode};

/// A generated label (no TLD) and the code that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    /// Absent for batch-checked labels
    pub code: Option<RarityCode>,
}

impl Candidate {
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: None,
        }
    }
}

/// Lazily generate every candidate for `label` under the selected codes.
///
/// Mutations for a code run only once the previous code's candidates are consumed.
pub fn candidates(label: &str, filter: Option<&str>) -> impl Iterator<Item = Candidate> + Send {
    let label = label.to_string();
    select_codes(filter).into_iter().flat_map(move |code| {
        code.mutate(&label).into_iter().map(move |typo| Candidate {
            label: typo,
            code: Some(code),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_follow_code_order() {
        let all: Vec<Candidate> = candidates("go", Some("B")).collect();
        let labels: Vec<&str> = all.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["o", "g", "og", "ggo", "goo"]);
        assert_eq!(all[0].code, Some(RarityCode::B1));
        assert_eq!(all[2].code, Some(RarityCode::B2));
        assert_eq!(all[4].code, Some(RarityCode::B3));
    }

    #[test]
    fn test_candidates_empty_selection() {
        assert_eq!(candidates("test", Some("Z")).count(), 0);
    }

    #[test]
    fn test_plain_candidate() {
        assert_eq!(Candidate::plain("alpha").code, None);
    }
}

//! Description-field selection among visually similar editable regions.
//!
//! The remote editor exposes no machine-readable role for its text boxes,
//! so selection is a ranked policy over region text: content signal first,
//! then the positional convention (title, description), then a lone region
//! as a last resort.

use crate::links::{detect_legacy_link, MAP_LINK_LABEL};

/// How the description region was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConfidence {
    /// The region text carried a known content signal.
    Matched,
    /// Second of exactly two regions, by page-order convention.
    Positional,
    /// Only one region existed; used with low confidence.
    SoleCandidate,
}

/// A selected region: index into the page-order region list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChoice {
    pub index: usize,
    pub confidence: FieldConfidence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelectError {
    /// No region could be identified as the description.
    FieldNotFound { region_count: usize },
}

impl std::fmt::Display for FieldSelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSelectError::FieldNotFound { region_count } => {
                write!(f, "description field not found among {region_count} regions")
            }
        }
    }
}

impl std::error::Error for FieldSelectError {}

/// Selects the description region from the page-order region texts.
///
/// Ordered policy, first rule wins:
/// 1. any region containing the map-link label or a legacy-link match;
/// 2. exactly two regions: index 1 (the title occupies index 0);
/// 3. exactly one region: index 0, low confidence;
/// 4. otherwise `FieldNotFound`.
pub fn select_description(texts: &[&str]) -> Result<FieldChoice, FieldSelectError> {
    for (index, text) in texts.iter().enumerate() {
        if text.contains(MAP_LINK_LABEL) || detect_legacy_link(text).is_some() {
            return Ok(FieldChoice {
                index,
                confidence: FieldConfidence::Matched,
            });
        }
    }
    match texts.len() {
        2 => Ok(FieldChoice {
            index: 1,
            confidence: FieldConfidence::Positional,
        }),
        1 => Ok(FieldChoice {
            index: 0,
            confidence: FieldConfidence::SoleCandidate,
        }),
        n => Err(FieldSelectError::FieldNotFound { region_count: n }),
    }
}

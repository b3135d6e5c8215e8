//! Candidate validation and conversion into color records.

use hue_color::{ColorRecord, NamedColorIndex, is_valid_hex, normalize_hex};
use tracing::debug;

/// Convert extracted candidates into color records.
///
/// Invalid candidates are dropped; order and duplicates are kept. The result
/// may be empty.
pub fn normalize(candidates: &[String], index: &NamedColorIndex) -> Vec<ColorRecord> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let hex = normalize_hex(candidate);
            if !is_valid_hex(&hex) {
                debug!(candidate = %candidate, "Discarding invalid color candidate");
                return None;
            }
            ColorRecord::from_hex(&hex, index).ok()
        })
        .collect()
}

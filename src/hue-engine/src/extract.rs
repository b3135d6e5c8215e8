//! Hex candidate extraction from free-form model output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Six hex digits, optionally `#`-prefixed, not part of a longer word.
static HEX_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#?\b[0-9A-Fa-f]{6}\b").expect("hex token pattern is valid and tested")
});

/// Strategy that produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    #[serde(rename = "json-array")]
    JsonArray,
    #[serde(rename = "regex")]
    Regex,
    #[serde(rename = "none")]
    NoMatch,
}

impl ExtractionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionMethod::JsonArray => "json-array",
            ExtractionMethod::Regex => "regex",
            ExtractionMethod::NoMatch => "none",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidates found in a model response. Nothing here is validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: Vec<String>,
    pub method: ExtractionMethod,
}

/// Pull hex candidates out of `raw`.
///
/// Tries the first bracketed span as a JSON array, then a regex scan of the
/// whole text. Never fails; unusable input yields no candidates and
/// [`ExtractionMethod::NoMatch`].
pub fn extract(raw: &str) -> Extraction {
    if let Some(candidates) = json_array(raw) {
        debug!(count = candidates.len(), "Extracted candidates from JSON array");
        return Extraction {
            candidates,
            method: ExtractionMethod::JsonArray,
        };
    }

    let candidates: Vec<String> = HEX_TOKEN
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect();
    if !candidates.is_empty() {
        debug!(count = candidates.len(), "Extracted candidates by regex scan");
        return Extraction {
            candidates,
            method: ExtractionMethod::Regex,
        };
    }

    debug!("No color candidates in model output");
    Extraction {
        candidates: Vec::new(),
        method: ExtractionMethod::NoMatch,
    }
}

/// String elements of the first bracketed span. An array with no string
/// elements is not a color list.
fn json_array(raw: &str) -> Option<Vec<String>> {
    let start = raw.find('[')?;
    let end = start + raw[start..].find(']')?;

    let items: Vec<Value> = serde_json::from_str(&raw[start..=end]).ok()?;
    let candidates: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_array_with_prose() {
        let extraction = extract(r##"prefix ["#FF0000","#00FF00"] suffix"##);
        assert_eq!(extraction.candidates, vec!["#FF0000", "#00FF00"]);
        assert_eq!(extraction.method, ExtractionMethod::JsonArray);
    }

    #[test]
    fn test_regex_in_order() {
        let extraction = extract("use ff00aa and 00ccdd for accents");
        assert_eq!(extraction.candidates, vec!["ff00aa", "00ccdd"]);
        assert_eq!(extraction.method, ExtractionMethod::Regex);
    }

    #[test]
    fn test_regex_keeps_hash_prefix() {
        let extraction = extract("Primary: #1E88E5, secondary: #FFC107.");
        assert_eq!(extraction.candidates, vec!["#1E88E5", "#FFC107"]);
    }

    #[test]
    fn test_regex_ignores_longer_runs() {
        let extraction = extract("id 1234567890 then #abcdef12 then a1b2c3");
        assert_eq!(extraction.candidates, vec!["a1b2c3"]);
    }

    #[test]
    fn test_malformed_json_falls_through() {
        let extraction = extract(r##"colors: ["#FF0000", "#00FF00" and also 0000ff"##);
        assert_eq!(extraction.method, ExtractionMethod::Regex);
        assert_eq!(extraction.candidates, vec!["#FF0000", "#00FF00", "0000ff"]);
    }

    #[test]
    fn test_empty_array_falls_through() {
        let extraction = extract("[] but try 123abc");
        assert_eq!(extraction.method, ExtractionMethod::Regex);
        assert_eq!(extraction.candidates, vec!["123abc"]);
    }

    #[test]
    fn test_non_string_elements_are_dropped() {
        let extraction = extract(r##"["#FF0000", {"hex": "#00FF00"}, null, 7, 123456]"##);
        assert_eq!(extraction.method, ExtractionMethod::JsonArray);
        assert_eq!(extraction.candidates, vec!["#FF0000"]);
    }

    #[test]
    fn test_numeric_array_is_not_a_color_list() {
        let extraction = extract("[12, 882, 271] then #00FF00");
        assert_eq!(extraction.method, ExtractionMethod::Regex);
        assert_eq!(extraction.candidates, vec!["#00FF00"]);

        let extraction = extract("[1, 2, 3]");
        assert_eq!(extraction.method, ExtractionMethod::NoMatch);
    }

    #[test]
    fn test_nothing_found() {
        let extraction = extract("I'm sorry, I can't help with that.");
        assert!(extraction.candidates.is_empty());
        assert_eq!(extraction.method, ExtractionMethod::NoMatch);
        assert_eq!(extraction.method.to_string(), "none");
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&ExtractionMethod::JsonArray).unwrap(),
            "\"json-array\""
        );
        assert_eq!(serde_json::to_string(&ExtractionMethod::NoMatch).unwrap(), "\"none\"");
    }
}

use super::client::{MatchMetadata, RawMatchResult};
use serde::Serialize;

const DEFAULT_FUND_NAME: &str = "Unknown Fund";
const DEFAULT_FUNDER_NAME: &str = "Unknown";
const DEFAULT_REGION: &str = "Nationwide";
const DEFAULT_FUNDING_RANGE: &str = "Check with funder";
const DEFAULT_DEADLINE: &str = "Ongoing";

/// A single normalized funding-opportunity candidate. Recomputed on
/// every search; ranks are 1-based positions in the backend's ordering,
/// which is authoritative (never re-sorted by score).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunderMatch {
    pub rank: usize,
    pub fund_name: String,
    pub funder_name: String,
    pub region: String,
    pub funding_range: String,
    pub deadline: String,
    pub categories: Vec<String>,
    /// 0-100 percentage derived from the backend relevance signal.
    pub score: u8,
    /// Raw text blob kept for display only.
    pub document: String,
}

/// The relevance signal a raw result carried, resolved once so the
/// score rule reads as a single match.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MatchSignal {
    /// 0-1, higher is better.
    Relevance(f64),
    /// Legacy, lower is better; 0 maps to 100%, 2 to 0%.
    Distance(f64),
    Missing,
}

impl MatchSignal {
    fn resolve(raw: &RawMatchResult) -> Self {
        match (raw.relevance, raw.distance) {
            (Some(relevance), _) => MatchSignal::Relevance(relevance),
            (None, Some(distance)) => MatchSignal::Distance(distance),
            (None, None) => MatchSignal::Missing,
        }
    }

    fn score(self) -> u8 {
        let raw = match self {
            MatchSignal::Relevance(relevance) => (relevance * 100.0).round(),
            MatchSignal::Distance(distance) => (100.0 - distance * 50.0).round(),
            MatchSignal::Missing => 0.0,
        };
        raw.clamp(0.0, 100.0) as u8
    }
}

/// Normalize a raw result list into ranked matches, preserving backend
/// order. Individual results never fail: every missing field degrades
/// to its documented default.
pub fn normalize_matches(results: Vec<RawMatchResult>) -> Vec<FunderMatch> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| normalize_one(index + 1, raw))
        .collect()
}

fn normalize_one(rank: usize, raw: RawMatchResult) -> FunderMatch {
    let score = MatchSignal::resolve(&raw).score();
    let document = raw.document.unwrap_or_default();
    let metadata = raw.metadata.unwrap_or_default();

    let fund_name = resolve_field(
        metadata.fund_name,
        heading_line(&document),
        DEFAULT_FUND_NAME,
    );
    let funder_name = resolve_field(
        metadata.funder_name,
        labeled_line(&document, "**Funder:** "),
        DEFAULT_FUNDER_NAME,
    );
    let region = resolve_field(
        metadata.region,
        labeled_line(&document, "**Region:** "),
        DEFAULT_REGION,
    );
    let funding_range = resolve_field(
        metadata.funding_range,
        labeled_line(&document, "**Funding Range:** "),
        DEFAULT_FUNDING_RANGE,
    );
    let deadline = resolve_field(
        metadata.deadline,
        labeled_line(&document, "**Deadline:** "),
        DEFAULT_DEADLINE,
    );
    let categories = split_categories(metadata.categories.as_deref().unwrap_or_default());

    FunderMatch {
        rank,
        fund_name,
        funder_name,
        region,
        funding_range,
        deadline,
        categories,
        score,
        document,
    }
}

/// Structured metadata wins; the legacy inline-markdown extraction is
/// the fallback; the fixed default comes last.
fn resolve_field(metadata: Option<String>, legacy: Option<String>, default: &str) -> String {
    metadata
        .filter(|value| !value.is_empty())
        .or(legacy)
        .unwrap_or_else(|| default.to_string())
}

/// First single-`#` heading line of the document.
fn heading_line(document: &str) -> Option<String> {
    document.lines().find_map(|line| {
        let line = line.trim_end_matches('\r');
        line.strip_prefix("# ")
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    })
}

/// First line carrying a `**Label:** value` marker; the value runs to
/// the end of the line.
fn labeled_line(document: &str, marker: &str) -> Option<String> {
    document.lines().find_map(|line| {
        let line = line.trim_end_matches('\r');
        line.find(marker)
            .map(|at| line[at + marker.len()..].to_string())
            .filter(|rest| !rest.is_empty())
    })
}

fn split_categories(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawMatchResult {
        serde_json::from_value(json).expect("raw result parses")
    }

    #[test]
    fn relevance_maps_to_rounded_percentage() {
        let matches = normalize_matches(vec![raw(serde_json::json!({ "relevance": 0.87 }))]);
        assert_eq!(matches[0].score, 87);
    }

    #[test]
    fn relevance_is_clamped_to_bounds() {
        let matches = normalize_matches(vec![
            raw(serde_json::json!({ "relevance": 1.4 })),
            raw(serde_json::json!({ "relevance": -0.2 })),
        ]);
        assert_eq!(matches[0].score, 100);
        assert_eq!(matches[1].score, 0);
    }

    #[test]
    fn distance_maps_linearly_and_floors_at_zero() {
        let cases = [(0.0, 100), (1.0, 50), (2.0, 0), (3.0, 0)];
        for (distance, expected) in cases {
            let matches = normalize_matches(vec![raw(serde_json::json!({ "distance": distance }))]);
            assert_eq!(matches[0].score, expected, "distance {distance}");
        }
    }

    #[test]
    fn relevance_takes_priority_over_distance() {
        let matches = normalize_matches(vec![raw(serde_json::json!({
            "relevance": 0.6,
            "distance": 0.0,
        }))]);
        assert_eq!(matches[0].score, 60);
    }

    #[test]
    fn missing_signal_scores_zero() {
        let matches = normalize_matches(vec![raw(serde_json::json!({}))]);
        assert_eq!(matches[0].score, 0);
    }

    #[test]
    fn ranks_follow_backend_order_regardless_of_score() {
        let matches = normalize_matches(vec![
            raw(serde_json::json!({ "relevance": 0.2 })),
            raw(serde_json::json!({ "relevance": 0.9 })),
            raw(serde_json::json!({ "relevance": 0.5 })),
        ]);
        assert_eq!(
            matches.iter().map(|m| m.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            matches.iter().map(|m| m.score).collect::<Vec<_>>(),
            vec![20, 90, 50]
        );
    }

    #[test]
    fn metadata_fields_win_over_document_extraction() {
        let matches = normalize_matches(vec![raw(serde_json::json!({
            "document": "# Old Heading\n**Region:** Waikato",
            "metadata": {
                "fund_name": "TSB Community Trust Grant",
                "region": "Taranaki",
            },
        }))]);
        assert_eq!(matches[0].fund_name, "TSB Community Trust Grant");
        assert_eq!(matches[0].region, "Taranaki");
    }

    #[test]
    fn legacy_document_markers_fill_missing_metadata() {
        let document = "# Grassroots Fund\n\
                        Some descriptive text.\n\
                        **Funder:** Lion Foundation\n\
                        **Region:** Waikato\n\
                        **Funding Range:** $500 - $10,000\n\
                        **Deadline:** 30 June 2026";
        let matches = normalize_matches(vec![raw(serde_json::json!({ "document": document }))]);

        let first = &matches[0];
        assert_eq!(first.fund_name, "Grassroots Fund");
        assert_eq!(first.funder_name, "Lion Foundation");
        assert_eq!(first.region, "Waikato");
        assert_eq!(first.funding_range, "$500 - $10,000");
        assert_eq!(first.deadline, "30 June 2026");
        assert_eq!(first.document, document);
    }

    #[test]
    fn bare_result_falls_back_to_documented_defaults() {
        let matches = normalize_matches(vec![raw(serde_json::json!({}))]);
        let first = &matches[0];
        assert_eq!(first.fund_name, "Unknown Fund");
        assert_eq!(first.funder_name, "Unknown");
        assert_eq!(first.region, "Nationwide");
        assert_eq!(first.funding_range, "Check with funder");
        assert_eq!(first.deadline, "Ongoing");
        assert!(first.categories.is_empty());
        assert!(first.document.is_empty());
    }

    #[test]
    fn categories_split_trim_and_drop_empty_pieces() {
        let matches = normalize_matches(vec![raw(serde_json::json!({
            "metadata": { "categories": " Sport , Youth ,, Community ," },
        }))]);
        assert_eq!(matches[0].categories, vec!["Sport", "Youth", "Community"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_matches(Vec::new()).is_empty());
    }
}

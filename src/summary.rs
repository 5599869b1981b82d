use crate::types::{MatchResult, SummaryRow, UrlReport};

/// Fold the match results of one URL into its summary row.
///
/// Commutative: the order of `results` does not affect the output.
pub fn aggregate(url: &str, results: &[MatchResult]) -> SummaryRow {
    results.iter().fold(
        SummaryRow {
            url: url.to_string(),
            ..SummaryRow::default()
        },
        |mut row, result| {
            if result.present {
                row.count_present += 1;
                row.impressions_present = row.impressions_present.saturating_add(result.impressions);
                row.clicks_present = row.clicks_present.saturating_add(result.clicks);
            } else {
                row.count_absent += 1;
                row.impressions_absent = row.impressions_absent.saturating_add(result.impressions);
                row.clicks_absent = row.clicks_absent.saturating_add(result.clicks);
            }
            row
        },
    )
}

impl From<&UrlReport> for SummaryRow {
    fn from(report: &UrlReport) -> Self {
        aggregate(&report.url, &report.results)
    }
}

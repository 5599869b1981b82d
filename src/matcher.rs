use crate::normalize::normalize;
use crate::types::{KeywordRecord, MatchResult};
use std::collections::HashMap;

/// A keyword record keyed by its normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub keyword: String,
    pub clicks: u64,
    pub impressions: u64,
}

/// Collapse records whose keywords normalize to the same string.
///
/// Output order follows the first appearance of each normalized keyword;
/// clicks and impressions come from the last occurrence. Keywords that are
/// empty or whitespace-only after normalization are dropped.
pub fn dedup_records(records: &[KeywordRecord]) -> Vec<NormalizedRecord> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut out: Vec<NormalizedRecord> = Vec::with_capacity(records.len());

    for record in records {
        let keyword = normalize(&record.keyword);
        if keyword.trim().is_empty() {
            continue;
        }

        match index.get(&keyword) {
            Some(&i) => {
                out[i].clicks = record.clicks;
                out[i].impressions = record.impressions;
            }
            None => {
                index.insert(keyword.clone(), out.len());
                out.push(NormalizedRecord {
                    keyword,
                    clicks: record.clicks,
                    impressions: record.impressions,
                });
            }
        }
    }

    out
}

/// Decide, for every distinct keyword, whether it occurs in `page_text`.
///
/// Empty (or whitespace-only) page text yields no results: the caller
/// skips the URL instead of reporting every keyword as absent.
pub fn match_keywords(records: &[KeywordRecord], page_text: &str) -> Vec<MatchResult> {
    if page_text.trim().is_empty() {
        return Vec::new();
    }

    let text = normalize(page_text);

    dedup_records(records)
        .into_iter()
        .map(|record| MatchResult {
            present: text.contains(record.keyword.as_str()),
            keyword: record.keyword,
            clicks: record.clicks,
            impressions: record.impressions,
        })
        .collect()
}

/// Same as [`match_keywords`], with `None` standing for a failed fetch or parse.
pub fn match_page(records: &[KeywordRecord], page_text: Option<&str>) -> Vec<MatchResult> {
    match page_text {
        Some(text) => match_keywords(records, text),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(keyword: &str, clicks: u64, impressions: u64) -> KeywordRecord {
        KeywordRecord::new(keyword, clicks, impressions)
    }

    #[test]
    fn test_modelo_002_scenario() {
        let records = vec![rec("Modelo 002", 10, 100), rec("formulario", 5, 50)];
        let results = match_keywords(&records, "Rellena el Modelo 002 aquí");

        assert_eq!(
            results,
            vec![
                MatchResult {
                    keyword: "modelo 002".to_string(),
                    present: true,
                    clicks: 10,
                    impressions: 100,
                },
                MatchResult {
                    keyword: "formulario".to_string(),
                    present: false,
                    clicks: 5,
                    impressions: 50,
                },
            ]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let results = match_keywords(&[rec("Peticiones", 1, 1)], "peticiones");
        assert!(results[0].present);
    }

    #[test]
    fn test_accent_insensitive_both_ways() {
        let results = match_keywords(&[rec("información", 1, 1)], "informacion");
        assert!(results[0].present);

        let results = match_keywords(&[rec("solicitud de nomina", 1, 1)], "Solicitud de NÓMINA");
        assert!(results[0].present);
    }

    #[test]
    fn test_substring_semantics() {
        // containment, not whole-word matching
        let results = match_keywords(&[rec("model", 1, 1)], "modelos y formularios");
        assert!(results[0].present);

        // whitespace is not collapsed
        let results = match_keywords(&[rec("modelo 002", 1, 1)], "modelo  002");
        assert!(!results[0].present);
    }

    #[test]
    fn test_present_iff_normalized_substring() {
        let text = "El Modelo 303 de IVA: instrucciones y plazos";
        let normalized_text = normalize(text);
        for keyword in ["modelo 303", "IVA", "plazo", "modelo 390", "instrucción", "303 de", ":"] {
            let results = match_keywords(&[rec(keyword, 0, 0)], text);
            assert_eq!(
                results[0].present,
                normalized_text.contains(&normalize(keyword)),
                "keyword: {keyword:?}"
            );
        }
    }

    #[test]
    fn test_empty_page_yields_no_results() {
        let records = vec![rec("modelo", 1, 1)];
        assert!(match_keywords(&records, "").is_empty());
        assert!(match_keywords(&records, "   ").is_empty());
        assert!(match_page(&records, None).is_empty());
    }

    #[test]
    fn test_duplicates_last_occurrence_wins() {
        let records = vec![
            rec("Información", 1, 10),
            rec("otro", 2, 20),
            rec("informacion", 3, 30),
        ];
        let results = match_keywords(&records, "más información aquí");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].keyword, "informacion");
        assert_eq!(results[0].clicks, 3);
        assert_eq!(results[0].impressions, 30);
        assert!(results[0].present);
        assert_eq!(results[1].keyword, "otro");
    }

    #[test]
    fn test_degenerate_keywords_dropped() {
        let records = vec![rec("", 1, 1), rec("   ", 1, 1), rec("aquí", 1, 1)];
        let results = match_keywords(&records, "Rellena aquí");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].keyword, "aqui");
    }
}

use crate::error::GapError;

/// Most URLs accepted in one run
pub const MAX_URLS: usize = 30;

/// Split a comma-separated URL list, trimming each entry.
///
/// Rejects an empty list (or an empty first entry) and lists longer than
/// `max_urls`.
pub fn parse_url_list(input: &str, max_urls: usize) -> Result<Vec<String>, GapError> {
    let urls: Vec<String> = input.split(',').map(|url| url.trim().to_string()).collect();

    if urls.first().is_none_or(|url| url.is_empty()) {
        return Err(GapError::Validation("at least one URL is required".to_string()));
    }

    if urls.len() > max_urls {
        return Err(GapError::Validation(format!(
            "at most {} URLs are allowed, got {}",
            max_urls,
            urls.len()
        )));
    }

    Ok(urls)
}

/// Host part of `url`: text after `//` up to the next `/`
pub fn host_of(url: &str) -> &str {
    let rest = url.split_once("//").map(|(_, rest)| rest).unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_and_trims() {
        let urls = parse_url_list(" https://a.es/x , https://b.es/y/", MAX_URLS).unwrap();
        assert_eq!(urls, vec!["https://a.es/x", "https://b.es/y/"]);
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(parse_url_list("", MAX_URLS), Err(GapError::Validation(_))));
        assert!(matches!(parse_url_list("   ", MAX_URLS), Err(GapError::Validation(_))));
        assert!(matches!(parse_url_list(" , https://a.es", MAX_URLS), Err(GapError::Validation(_))));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let thirty = vec!["https://a.es/p"; 30].join(",");
        assert_eq!(parse_url_list(&thirty, MAX_URLS).unwrap().len(), 30);

        let thirty_one = vec!["https://a.es/p"; 31].join(",");
        let err = parse_url_list(&thirty_one, MAX_URLS).unwrap_err();
        assert!(err.to_string().contains("31"));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://modelosyformularios.es/modelos/modelo-002/"), "modelosyformularios.es");
        assert_eq!(host_of("http://a.es"), "a.es");
        assert_eq!(host_of("a.es/x"), "a.es");
    }
}

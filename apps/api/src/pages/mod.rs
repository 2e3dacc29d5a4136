//! Page views. Each handler returns the data one screen of the front end
//! renders; layout and styling live with the client.

pub mod handlers;

use crate::models::Provider;

/// Providers featured on the home page.
pub const TOP_PROVIDER_COUNT: usize = 3;

/// Directory filter used by the listing page: case-insensitive substring match
/// on name or service. A blank term keeps everything; otherwise the term is
/// matched as typed, surrounding whitespace included.
pub fn filter_providers(providers: Vec<Provider>, term: &str) -> Vec<Provider> {
    if term.trim().is_empty() {
        return providers;
    }
    providers
        .into_iter()
        .filter(|p| p.matches_search(term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::provider;

    fn providers() -> Vec<Provider> {
        vec![
            provider("p1", "Ace Plumbing", "Plumbing"),
            provider("p2", "Sparky", "Electrical"),
            provider("p3", "Pipe Dreams", "Gardening"),
        ]
    }

    #[test]
    fn test_blank_term_keeps_all() {
        assert_eq!(filter_providers(providers(), "   ").len(), 3);
    }

    #[test]
    fn test_term_matches_name_or_service() {
        let ids: Vec<_> = filter_providers(providers(), "PIP")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p3"]);

        let ids: Vec<_> = filter_providers(providers(), "plumb")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[test]
    fn test_term_is_not_trimmed_for_matching() {
        assert!(filter_providers(providers(), "plumb ").is_empty());
        assert_eq!(filter_providers(providers(), "Ace ").len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_providers(providers(), "roofing").is_empty());
    }
}

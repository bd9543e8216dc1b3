//! URL handling for clipper
//!
//! Provides the link classifier (is this URL an article link?) and the domain
//! allow-list check that fences the crawl onto the target site.

mod domain;

pub use domain::extract_domain;

/// Result of classifying a discovered URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// URL matches an article-link rule and is worth fetching
    Article,
    /// URL matched no rule
    NotArticle,
}

impl LinkClass {
    /// Returns true if the link should be enqueued for fetching
    pub fn is_article(&self) -> bool {
        matches!(self, Self::Article)
    }
}

/// Classifies a URL against the configured article-link rules
///
/// A URL is an article link iff it contains at least one rule substring.
/// Rules are literal substrings, there is no wildcard or regex syntax.
/// An empty rule set classifies nothing as an article.
///
/// # Examples
///
/// ```
/// use clipper::url::{classify_link, LinkClass};
///
/// let rules = vec!["/article/".to_string()];
/// assert_eq!(classify_link("https://site.com/article/42", &rules), LinkClass::Article);
/// assert_eq!(classify_link("https://site.com/about", &rules), LinkClass::NotArticle);
/// ```
pub fn classify_link(url: &str, rules: &[String]) -> LinkClass {
    for rule in rules {
        if url.contains(rule.as_str()) {
            return LinkClass::Article;
        }
    }
    LinkClass::NotArticle
}

/// Checks whether a domain is covered by the allow-list
///
/// A domain is allowed if it equals an allow-list entry or is a subdomain of
/// one ("lite.news.example" is covered by "news.example"). Both sides are
/// expected to be lowercase.
pub fn in_allowed_domains(domain: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| {
        domain == entry.as_str() || domain.ends_with(&format!(".{}", entry))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_matching_rule() {
        let rules = rules(&["news.example/category/article", "news.example/2024"]);
        assert_eq!(
            classify_link("https://news.example/category/article/hello", &rules),
            LinkClass::Article
        );
        assert_eq!(
            classify_link("https://news.example/2024/01/story", &rules),
            LinkClass::Article
        );
    }

    #[test]
    fn test_classify_no_match() {
        let rules = rules(&["/article/"]);
        assert_eq!(
            classify_link("https://site.com/about", &rules),
            LinkClass::NotArticle
        );
    }

    #[test]
    fn test_classify_substring_anywhere() {
        // Rules are plain substrings, position does not matter
        let rules = rules(&["/post/"]);
        assert_eq!(
            classify_link("https://site.com/post/42?from=/post/41", &rules),
            LinkClass::Article
        );
    }

    #[test]
    fn test_empty_rules_classify_nothing() {
        let rules: Vec<String> = vec![];
        assert_eq!(
            classify_link("https://site.com/article/42", &rules),
            LinkClass::NotArticle
        );
    }

    #[test]
    fn test_is_article() {
        assert!(LinkClass::Article.is_article());
        assert!(!LinkClass::NotArticle.is_article());
    }

    #[test]
    fn test_allowed_exact_match() {
        let allowed = rules(&["news.example"]);
        assert!(in_allowed_domains("news.example", &allowed));
    }

    #[test]
    fn test_allowed_subdomain() {
        let allowed = rules(&["news.example"]);
        assert!(in_allowed_domains("lite.news.example", &allowed));
        assert!(in_allowed_domains("a.b.news.example", &allowed));
    }

    #[test]
    fn test_allowed_rejects_other_domains() {
        let allowed = rules(&["news.example"]);
        assert!(!in_allowed_domains("evil.example", &allowed));
        assert!(!in_allowed_domains("fakenews.example", &allowed));
        assert!(!in_allowed_domains("news.example.evil.com", &allowed));
    }

    #[test]
    fn test_allowed_multiple_entries() {
        let allowed = rules(&["news.example", "archive.example"]);
        assert!(in_allowed_domains("archive.example", &allowed));
        assert!(in_allowed_domains("news.example", &allowed));
        assert!(!in_allowed_domains("other.example", &allowed));
    }
}

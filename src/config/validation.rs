use crate::config::types::{Config, CrawlerConfig, MarkerConfig, SiteConfig, StorageConfig};
use crate::url::in_allowed_domains;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_marker_config(&config.markers)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 64, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "site must have at least one seed URL".to_string(),
        ));
    }

    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domains cannot be empty".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_string(domain)?;
    }

    for seed in &config.seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use an http(s) scheme",
                seed
            )));
        }

        let host = url.host_str().ok_or_else(|| {
            ConfigError::InvalidUrl(format!("Seed URL '{}' has no host", seed))
        })?;

        if !in_allowed_domains(&host.to_lowercase(), &config.allowed_domains) {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' is outside the allowed domains",
                seed
            )));
        }
    }

    // An empty rule list is legal: the frontier then never grows past the seeds.
    for rule in &config.article_link_rules {
        if rule.is_empty() {
            return Err(ConfigError::Validation(
                "article_link_rules entries cannot be empty strings".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_marker_config(config: &MarkerConfig) -> Result<(), ConfigError> {
    if config.article.is_empty() {
        return Err(ConfigError::Validation(
            "markers.article cannot be empty".to_string(),
        ));
    }

    if config.list.is_empty() {
        return Err(ConfigError::Validation(
            "markers.list cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.visited_path.is_empty() {
        return Err(ConfigError::Validation(
            "visited_path cannot be empty".to_string(),
        ));
    }

    if config.articles_path.is_empty() {
        return Err(ConfigError::Validation(
            "articles_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain string from the allow-list
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "Allowed domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}

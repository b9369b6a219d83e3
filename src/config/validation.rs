use crate::config::types::{Config, CrawlerConfig, TrustEntry, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sites(&config.sites)?;
    validate_trusts(&config.trusts)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 1 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be >= 1, got {}",
            config.max_depth
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.page_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "page_budget must be >= 1, got {}",
            config.page_budget
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the ordered site list
fn validate_sites(sites: &[String]) -> Result<(), ConfigError> {
    if sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one site root URL is required".to_string(),
        ));
    }

    for site in sites {
        let url = Url::parse(site)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site URL '{}': {}", site, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Site URL '{}' must use an http(s) scheme",
                site
            )));
        }
    }

    Ok(())
}

/// Validates trust metadata entries
fn validate_trusts(trusts: &[TrustEntry]) -> Result<(), ConfigError> {
    for entry in trusts {
        Url::parse(&entry.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid trust URL '{}': {}", entry.url, e))
        })?;

        if entry.abbrev.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Trust '{}' must have a non-empty abbreviation",
                entry.url
            )));
        }

        if entry.name.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Trust '{}' must have a non-empty name",
                entry.url
            )));
        }
    }

    Ok(())
}

/// Basic shape check for contact email addresses
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let mut parts = email.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || parts.next().is_some() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact_email '{}' is not a valid email address",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{Config, CrawlerConfig, TrustEntry, UserAgentConfig};

    fn valid_config() -> Config {
        Config {
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            sites: vec!["https://example.com/".to_string()],
            trusts: vec![TrustEntry {
                url: "https://example.com/".to_string(),
                abbrev: "EX".to_string(),
                name: "Example".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_max_depth_rejected() {
        let mut config = valid_config();
        config.crawler.max_depth = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_sites_rejected() {
        let mut config = valid_config();
        config.sites.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_non_http_site_rejected() {
        let mut config = valid_config();
        config.sites = vec!["ftp://example.com/".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_crawler_name_rejected() {
        let mut config = valid_config();
        config.user_agent.crawler_name = "Test Crawler!".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut config = valid_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_trust_without_abbrev_rejected() {
        let mut config = valid_config();
        config.trusts[0].abbrev = String::new();
        assert!(validate(&config).is_err());
    }
}

use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(
                "max-pages must be >= 1 when set".to_string(),
            ));
        }
    }

    if config.safety_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "safety-limit must be >= 1, got {}",
            config.safety_limit
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "progress-interval must be >= 1, got {}",
            config.progress_interval
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid contact-url: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = Some(0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_safety_limit_rejected() {
        let mut config = Config::default();
        config.crawler.safety_limit = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_progress_interval_rejected() {
        let mut config = Config::default();
        config.crawler.progress_interval = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_crawler_name_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_with_spaces_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "bad name".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_contact_url_rejected() {
        let mut config = Config::default();
        config.user_agent.contact_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }
}

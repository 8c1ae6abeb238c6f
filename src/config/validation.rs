use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::url::PatternSet;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
pub(crate) fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_parallelism(config.parallelism)?;

    // max_depth and timeout_seconds are unsigned; 0 is a valid "visit nothing"

    for page in &config.start_pages {
        if page.trim().is_empty() {
            return Err(ConfigError::Validation(
                "start_pages cannot contain empty URLs".to_string(),
            ));
        }
    }

    PatternSet::compile(&config.ignored_urls)?;
    PatternSet::compile(&config.ignored_words)?;

    Ok(())
}

/// Validates the requested worker count
pub(crate) fn validate_parallelism(parallelism: usize) -> Result<(), ConfigError> {
    if parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be >= 1, got {}",
            parallelism
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if !config.result_path.is_empty() && config.result_path == config.profile_output_path {
        return Err(ConfigError::Validation(format!(
            "result_path and profile_output_path must differ, both are '{}'",
            config.result_path
        )));
    }
    Ok(())
}

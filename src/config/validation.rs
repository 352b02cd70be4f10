use crate::config::types::{Config, FetchConfig, OutputConfig, SelfcheckConfig, TransportConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_transport_config(&config.transport)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    validate_selfcheck_config(&config.selfcheck)?;
    Ok(())
}

/// Validates transport configuration
fn validate_transport_config(config: &TransportConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.use_proxy {
        // host:port; the host may be a name, so only the shape is checked here
        let valid = match config.proxy_address.rsplit_once(':') {
            Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
            None => false,
        };
        if !valid {
            return Err(ConfigError::Validation(format!(
                "proxy-address must be host:port, got '{}'",
                config.proxy_address
            )));
        }
    }

    Ok(())
}

/// Validates fetch engine configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_concurrent < 1 || config.max_concurrent > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent must be between 1 and 100, got {}",
            config.max_concurrent
        )));
    }

    if config.max_body_bytes < 1 {
        return Err(ConfigError::Validation(format!(
            "max-body-bytes must be >= 1, got {}",
            config.max_body_bytes
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.report_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates self-check configuration
fn validate_selfcheck_config(config: &SelfcheckConfig) -> Result<(), ConfigError> {
    if config.enabled {
        Url::parse(&config.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid selfcheck url: {}", e)))?;
    }

    Ok(())
}

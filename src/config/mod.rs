use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Symbol prefixed to every rendered money value
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Where tracing output goes; logging is disabled when unset so it can
    /// never write over the terminal UI
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Parse environment variables into Config struct
        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Format a money value for display: two decimals behind the configured
    /// currency symbol. Stored values stay unrounded; this is the only place
    /// rounding happens.
    pub fn money(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, value)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    // Load the configuration
    let config = Config::load()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_rounds_only_at_display_time() {
        let config = Config {
            currency_symbol: "₹".to_string(),
            log_file: None,
        };
        assert_eq!(config.money(1180.0), "₹1180.00");
        assert_eq!(config.money(90.006), "₹90.01");
    }
}

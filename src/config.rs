use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

/// Runtime settings resolved from flags, environment and `.env`.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub analysis_model: String,
    pub generation_model: String,
    pub timeout: Option<Duration>,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_key: cli.api_key.clone().filter(|k| !k.trim().is_empty()),
            api_base: cli.api_base.clone(),
            analysis_model: cli.analysis_model.clone().unwrap_or_else(|| cli.model.clone()),
            generation_model: cli.generation_model.clone().unwrap_or_else(|| cli.model.clone()),
            timeout: cli.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            log_file: cli.log_file.clone(),
        }
    }
}

// Never print the key itself.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("analysis_model", &self.analysis_model)
            .field("generation_model", &self.generation_model)
            .field("timeout", &self.timeout)
            .field("log_file", &self.log_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn per_call_models_fall_back_to_shared_model() {
        let cli = Cli::try_parse_from([
            "script-cloner",
            "--api-key",
            "secret",
            "--model",
            "m-shared",
            "--generation-model",
            "m-gen",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.analysis_model, "m-shared");
        assert_eq!(config.generation_model, "m-gen");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn zero_timeout_means_none() {
        let cli = Cli::try_parse_from(["script-cloner", "--timeout-secs", "0"]).unwrap();
        assert_eq!(Config::from_cli(&cli).timeout, None);
    }

    #[test]
    fn debug_output_redacts_key() {
        let cli = Cli::try_parse_from(["script-cloner", "--api-key", "secret"]).unwrap();
        let dbg = format!("{:?}", Config::from_cli(&cli));
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("<redacted>"));
    }
}

use std::env;

use config::{Config, ConfigError, Environment, File};
use feedbot::{FeedbackOptions, GithubTarget};
use glob::glob;
use serde_derive::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize, Clone)]
pub struct Github {
    pub repository: String,
    pub token: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub api_base: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Feedback {
    pub package_info: bool,
    pub device_info: bool,
    pub allow_empty_text: bool,
    pub allow_prod_emulator_feedback: bool,
    pub image_width: u32,
}

impl Default for Feedback {
    fn default() -> Self {
        let defaults = FeedbackOptions::default();
        Self {
            package_info: defaults.package_info,
            device_info: defaults.device_info,
            allow_empty_text: defaults.allow_empty_text,
            allow_prod_emulator_feedback: defaults.allow_prod_emulator_feedback,
            image_width: defaults.image_width,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub github: Github,
    #[serde(default)]
    pub feedback: Feedback,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let cwd = match env::current_dir() {
            Ok(cwd) => cwd.display().to_string(),
            Err(_) => ".".to_string(),
        };

        debug!(
            "Looking for configuration file {cwd}/config and/or configuration files in {cwd}{}",
            "/config/"
        );

        let config_dir = glob(&format!("{cwd}/config/*"))
            .map_err(|e| ConfigError::Message(e.to_string()))?
            .filter_map(Result::ok)
            .map(File::from)
            .collect::<Vec<_>>();

        let config = Config::builder()
            .add_source(File::with_name(&format!("{cwd}/config")).required(false))
            .add_source(config_dir)
            .add_source(Environment::with_prefix("FEEDBOT").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn github_target(&self) -> GithubTarget {
        GithubTarget {
            repository: self.github.repository.clone(),
            token: self.github.token.clone(),
            branch: self.github.branch.clone(),
            api_base: self.github.api_base.clone(),
        }
    }

    /// Per-submission options; title and extra data come from the user.
    pub fn feedback_options(&self, title: Option<String>, extra_data: Option<String>) -> FeedbackOptions {
        FeedbackOptions {
            title,
            labels: self.github.labels.clone(),
            package_info: self.feedback.package_info,
            device_info: self.feedback.device_info,
            extra_data,
            allow_empty_text: self.feedback.allow_empty_text,
            allow_prod_emulator_feedback: self.feedback.allow_prod_emulator_feedback,
            image_width: self.feedback.image_width,
        }
    }
}

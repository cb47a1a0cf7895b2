use crate::error::ConfigError;
use std::env;
use std::str::FromStr;

pub const DEFAULT_POINTS_FIELD: &str = "customfield_10003";

/// What to do when a subtask cannot be fetched or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtaskFailure {
    /// Fail the parent decode with the subtask's error.
    #[default]
    Abort,
    /// Leave the subtask out and log a warning.
    Skip,
}

impl FromStr for SubtaskFailure {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "abort" => Ok(SubtaskFailure::Abort),
            "skip" => Ok(SubtaskFailure::Skip),
            _ => Err(ConfigError::Invalid {
                name: "JIRA_SUBTASK_FAILURE",
                value: value.to_string(),
            }),
        }
    }
}

/// Per-call decoding settings. Passed by reference into every decode; never
/// held globally.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Jira host name, used to build browse URLs.
    pub server: String,
    pub include_subtasks: bool,
    pub verbose: bool,
    /// Custom field holding story points.
    pub points_field: String,
    pub subtask_failure: SubtaskFailure,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: String::new(),
            include_subtasks: false,
            verbose: false,
            points_field: DEFAULT_POINTS_FIELD.to_string(),
            subtask_failure: SubtaskFailure::default(),
        }
    }
}

impl Config {
    /// Reads settings from the environment (and a `.env` file if present).
    /// `JIRA_SERVER` is required, everything else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server = lookup("JIRA_SERVER").ok_or(ConfigError::Missing("JIRA_SERVER"))?;
        let mut config = Config {
            server,
            ..Default::default()
        };
        if let Some(value) = lookup("JIRA_INCLUDE_SUBTASKS") {
            config.include_subtasks = parse_flag("JIRA_INCLUDE_SUBTASKS", &value)?;
        }
        if let Some(value) = lookup("JIRA_VERBOSE") {
            config.verbose = parse_flag("JIRA_VERBOSE", &value)?;
        }
        if let Some(value) = lookup("JIRA_POINTS_FIELD") {
            config.points_field = value;
        }
        if let Some(value) = lookup("JIRA_SUBTASK_FAILURE") {
            config.subtask_failure = value.parse()?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

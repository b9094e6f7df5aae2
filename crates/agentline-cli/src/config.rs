//! Configuration file loading.
//!
//! The file is JSON; every section and field is optional:
//!
//! ```json
//! {
//!   "parser": { "final_answer_marker": "Final Answer:" },
//!   "notifier": { "agent_name": "Researcher", "task_name": "Find cats" }
//! }
//! ```

use std::path::Path;

use agentline_core::{NotifierConfig, ParserConfig};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub notifier: NotifierConfig,
}

/// Load the config file, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents).map_err(|source| CliError::Json {
        context: path.display().to_string(),
        source,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Command-line overrides for the notifier section.
#[derive(Debug, Default, Clone)]
pub struct NotifierOverrides {
    pub agent_name: Option<String>,
    pub task_name: Option<String>,
    pub tools_description: Option<String>,
}

impl NotifierOverrides {
    pub fn apply(self, mut config: NotifierConfig) -> NotifierConfig {
        if let Some(agent_name) = self.agent_name {
            config.agent_name = agent_name;
        }
        if let Some(task_name) = self.task_name {
            config.task_name = task_name;
        }
        if let Some(tools_description) = self.tools_description {
            config.tools_description = tools_description;
        }
        config
    }
}

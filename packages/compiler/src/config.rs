//! Component Configuration
//!
//! Search-path prefixes consulted before the fixed `Includes/<name>` and
//! `<name>` fallbacks. The value is passed to the renderer explicitly; tests
//! override it by building their own.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPONENT_PATH: &str = "components";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    #[serde(default = "default_component_paths")]
    pub component_paths: Vec<String>,
}

fn default_component_paths() -> Vec<String> {
    vec![DEFAULT_COMPONENT_PATH.to_string()]
}

impl Default for ComponentConfig {
    fn default() -> Self {
        ComponentConfig {
            component_paths: default_component_paths(),
        }
    }
}

impl ComponentConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ComponentConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_component_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComponentConfig {
            component_paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

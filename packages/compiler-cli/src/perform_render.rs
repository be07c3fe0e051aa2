//! Perform Render
//!
//! `compc render`: renders one component from a template directory with
//! JSON properties.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use component_compiler::{
    ComponentConfig, ComponentRenderer, FileTemplateLoader, PropertyMap, Value, Viewer,
};

use crate::logging::Logger;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    /// JSON object source; each key becomes one property.
    pub props: Option<String>,
}

/// Converts a JSON object into a property map, keeping key order.
pub fn parse_props(json: &str) -> anyhow::Result<PropertyMap> {
    let parsed: serde_json::Value =
        serde_json::from_str(json).context("Failed to parse properties")?;
    let serde_json::Value::Object(map) = parsed else {
        bail!("Properties must be a JSON object");
    };
    Ok(map
        .iter()
        .map(|(key, value)| (key.clone(), Value::from(value)))
        .collect())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ComponentConfig> {
    match path {
        Some(path) => ComponentConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ComponentConfig::default()),
    }
}

pub fn perform_render(
    component: &str,
    options: &RenderOptions,
    logger: &dyn Logger,
) -> anyhow::Result<String> {
    let config = load_config(options.config.as_deref())?;
    logger.debug(&format!(
        "Component paths: {}",
        config.component_paths.join(", ")
    ));

    let props = match options.props.as_deref() {
        Some(json) => parse_props(json)?,
        None => PropertyMap::new(),
    };

    let renderer = ComponentRenderer::new(
        config,
        Viewer::new(FileTemplateLoader::new(&options.root)),
    );
    let rendered = renderer.render(component, props)?;
    Ok(rendered.to_html())
}

/// Reads `--props` either inline or from `@file.json`.
pub fn read_props_arg(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        None => Ok(arg.to_string()),
    }
}

//! Component Resolver and Renderer
//!
//! Maps a component name to a template through the configured search paths
//! and renders it against an isolated context built from the property map.

use crate::config::ComponentConfig;
use crate::error::{RenderError, RenderResult};
use crate::output::output_ast::Statement;
use crate::view::interpreter::{ComponentHost, Interpreter, PropertyMap};
use crate::view::scope::Scope;
use crate::view::template_parser::parse_template;
use crate::view::value::{Record, Value};
use crate::view::viewer::TemplateHost;

/// Fallback folder searched after the configured component paths.
pub const INCLUDES_PATH: &str = "Includes";

/// Built-in lookup answering the component's own name.
pub const COMPONENT_NAME_FIELD: &str = "ComponentName";

/// Field names already taken by the base view-model.
pub const RESERVED_PROPERTIES: &[&str] = &["failover", "customisedObject", "objCache"];

/// Candidate template paths for `name`, in resolution order.
pub fn search_paths(config: &ComponentConfig, name: &str) -> Vec<String> {
    let mut candidates: Vec<String> = config
        .component_paths
        .iter()
        .map(|path| format!("{}/{}", path.trim_end_matches('/'), name))
        .collect();
    candidates.push(format!("{}/{}", INCLUDES_PATH, name));
    candidates.push(name.to_string());
    candidates
}

/// The data context a component template renders against.
#[derive(Debug, Clone)]
pub struct ComponentData {
    name: String,
    props: PropertyMap,
}

impl ComponentData {
    pub fn new(name: &str, props: PropertyMap) -> RenderResult<Self> {
        if let Some(reserved) = props
            .keys()
            .find(|key| RESERVED_PROPERTIES.contains(&key.as_str()))
        {
            return Err(RenderError::ReservedProperty {
                property: reserved.clone(),
                component: name.to_string(),
            });
        }
        Ok(ComponentData {
            name: name.to_string(),
            props,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> &PropertyMap {
        &self.props
    }

    /// Record with exactly the props as fields; `ComponentName` is added
    /// only when no prop already uses it.
    pub fn into_context(self) -> Value {
        let mut record: Record = self.props.into_iter().collect();
        if !record.contains(COMPONENT_NAME_FIELD) {
            record.insert(COMPONENT_NAME_FIELD.to_string(), Value::Text(self.name));
        }
        Value::record(record)
    }
}

pub struct ComponentRenderer<H: TemplateHost> {
    config: ComponentConfig,
    host: H,
}

impl<H: TemplateHost> ComponentRenderer<H> {
    pub fn new(config: ComponentConfig, host: H) -> Self {
        ComponentRenderer { config, host }
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resolves `name` and renders it with `props`. The result is final
    /// markup and must not be escaped again.
    pub fn render(&self, name: &str, props: PropertyMap) -> RenderResult<Value> {
        let candidates = search_paths(&self.config, name);
        let template = self
            .host
            .resolve_template(&candidates)?
            .ok_or(RenderError::TemplateNotFound { candidates })?;
        let data = ComponentData::new(name, props)?;
        let html = self.host.execute(&template, data.into_context(), self)?;
        Ok(Value::Html(html))
    }

    /// Renders a page template given as source against `data`.
    pub fn render_template(&self, source: &str, data: Value) -> RenderResult<String> {
        let statements = parse_template(source).map_err(|err| RenderError::Template {
            path: "<string>".to_string(),
            source: err,
        })?;
        self.render_page(&statements, data)
    }

    /// Runs already compiled page statements, typically markup with
    /// compiled invocations spliced in, against `data`.
    pub fn render_page(&self, statements: &[Statement], data: Value) -> RenderResult<String> {
        Interpreter::new(self, Scope::new(data)).run(statements)
    }
}

impl<H: TemplateHost> ComponentHost for ComponentRenderer<H> {
    fn render_component(
        &self,
        name: &str,
        props: PropertyMap,
        _scope: &Scope,
    ) -> RenderResult<Value> {
        self.render(name, props)
    }
}
